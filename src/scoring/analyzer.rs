// The orchestrator — drives translate -> prompt -> invoke -> parse.
//
// A linear pipeline with exactly one locally-absorbed failure: a reply that
// doesn't parse becomes ScoreOutcome::Unparseable. Translation and backend
// failures are fatal to the call and propagate to the caller unretried —
// there is no fallback to the alternate backend.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::backend::traits::CompletionBackend;
use crate::scoring::prompt::build_scoring_prompt;
use crate::scoring::response::{parse_scores, ScoreOutcome};
use crate::translate::traits::Translator;

/// Scores comments through an injected backend, optionally translating the
/// comment first.
///
/// Construct once at startup with the chosen backend — selection happens
/// at the composition root, not inside the pipeline. The translator is
/// present exactly when the scoring prompt's language differs from the
/// comment's (the local model is English-only; the hosted model is not).
pub struct CommentAnalyzer {
    backend: Box<dyn CompletionBackend>,
    translator: Option<Box<dyn Translator>>,
}

impl CommentAnalyzer {
    /// Analyzer that sends the comment to the backend as-is.
    pub fn new(backend: Box<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            translator: None,
        }
    }

    /// Analyzer that translates the comment before scoring.
    pub fn with_translator(
        backend: Box<dyn CompletionBackend>,
        translator: Box<dyn Translator>,
    ) -> Self {
        Self {
            backend,
            translator: Some(translator),
        }
    }

    /// Score one comment for sentiment and offensiveness.
    ///
    /// Returns the parsed outcome — or the error from translation or the
    /// backend call, both of which are fatal to this invocation.
    pub async fn analyze(&self, comment: &str) -> Result<ScoreOutcome> {
        info!(backend = self.backend.name(), original = comment, "Scoring comment");

        let working_text = match &self.translator {
            Some(translator) => {
                let translated = translator
                    .translate(comment)
                    .await
                    .context("Translation failed")?;
                info!(translated = %translated, "Translated comment");
                translated
            }
            None => comment.to_string(),
        };

        let prompt = build_scoring_prompt(&working_text);

        let reply = self
            .backend
            .complete(&prompt)
            .await
            .with_context(|| format!("{} backend call failed", self.backend.name()))?;

        debug!(reply = %reply, "Raw backend reply");

        Ok(parse_scores(&reply))
    }
}
