use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use tonal::backend::ollama::OllamaBackend;
use tonal::backend::openai::OpenAiBackend;
use tonal::backend::traits::CompletionBackend;
use tonal::config::Config;
use tonal::scoring::analyzer::CommentAnalyzer;
use tonal::scoring::response::{ScoreOutcome, PARSE_FAILURE_SENTINEL};
use tonal::translate::nllb::NllbTranslator;
use tonal::translate::traits::Translator;

/// Tonal: sentiment and offensive-language scoring for social media comments.
///
/// Routes comments through a language model — a local Ollama daemon or the
/// OpenAI API — and extracts two 1-5 ratings from its reply.
#[derive(Parser)]
#[command(name = "tonal", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a comment for sentiment and offensive language
    Score {
        /// The comment text (Turkish when using --local)
        comment: String,

        /// Use the local Ollama backend, translating the comment to
        /// English first (default: OpenAI, no translation)
        #[arg(long)]
        local: bool,
    },

    /// Translate Turkish text to English without scoring it
    Translate {
        /// The text to translate
        text: String,
    },

    /// Download the NLLB ONNX translation model (~600 MB)
    DownloadModel,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tonal=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { comment, local } => {
            let config = Config::load()?;
            let analyzer = create_analyzer(&config, local)?;

            let outcome = analyzer.analyze(&comment).await?;

            match outcome {
                ScoreOutcome::Scored(scores) => {
                    println!("{}", "Scores".bold());
                    println!("  Sentiment:          {}  {}", scores.sentiment, sentiment_label(scores.sentiment).dimmed());
                    println!("  Offensive language: {}  {}", scores.offensive, offensive_label(scores.offensive).dimmed());
                }
                ScoreOutcome::Unparseable => {
                    println!("{PARSE_FAILURE_SENTINEL}");
                    println!(
                        "{}",
                        "The model's reply could not be parsed into scores.".yellow()
                    );
                }
            }
        }

        Commands::Translate { text } => {
            let config = Config::load()?;
            config.require_translator()?;

            let translator = NllbTranslator::load(&config.model_dir)?;
            let translated = translator.translate(&text).await?;

            println!("{translated}");
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading NLLB ONNX model...");
            println!("  Destination: {}", model_dir.display());

            tonal::translate::download::download_model(model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `tonal score --local \"...\"`.");
        }
    }

    Ok(())
}

/// Build the analyzer for the requested mode.
///
/// Local mode pairs the Ollama backend with the Turkish-to-English
/// translator (the local model scores English text only). Remote mode uses
/// OpenAI directly — no translation. The backend is constructed once here
/// and injected; the pipeline itself never branches on the mode.
fn create_analyzer(config: &Config, local: bool) -> Result<CommentAnalyzer> {
    if local {
        config.require_translator()?;
        info!(model = %config.ollama_model, "Using local Ollama backend");

        let backend: Box<dyn CompletionBackend> = Box::new(OllamaBackend::new(
            &config.ollama_url,
            &config.ollama_model,
            config.request_timeout,
        )?);
        let translator = NllbTranslator::load(&config.model_dir)?;

        Ok(CommentAnalyzer::with_translator(backend, Box::new(translator)))
    } else {
        config.require_openai()?;
        info!(model = %config.openai_model, "Using OpenAI backend");

        let backend: Box<dyn CompletionBackend> = Box::new(OpenAiBackend::new(
            &config.openai_base_url,
            &config.openai_api_key,
            &config.openai_model,
            config.request_timeout,
        )?);

        Ok(CommentAnalyzer::new(backend))
    }
}

/// Human-readable label for a sentiment rating. Out-of-rubric values get
/// no label — the pipeline passes them through unvalidated.
fn sentiment_label(score: i64) -> &'static str {
    match score {
        1 => "(Very Negative)",
        2 => "(Negative)",
        3 => "(Neutral)",
        4 => "(Positive)",
        5 => "(Very Positive)",
        _ => "",
    }
}

/// Human-readable label for an offensiveness rating.
fn offensive_label(score: i64) -> &'static str {
    match score {
        1 => "(Not Offensive)",
        2 => "(Slightly Offensive)",
        3 => "(Moderately Offensive)",
        4 => "(Offensive)",
        5 => "(Highly Offensive)",
        _ => "",
    }
}
