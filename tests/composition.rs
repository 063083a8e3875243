// Composition tests — the orchestrator driven end-to-end with fake
// collaborators.
//
// A fake backend records the prompts it receives and replies with a fixed
// string; a fake translator records its calls. Together they verify the
// dispatch rules (local mode translates first, remote mode never touches
// the translator), error propagation, and the caller-facing outcome.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tonal::backend::error::BackendError;
use tonal::backend::traits::CompletionBackend;
use tonal::scoring::analyzer::CommentAnalyzer;
use tonal::scoring::response::{CommentScores, ScoreOutcome};
use tonal::translate::traits::Translator;

/// Backend that replies with a fixed string and records every prompt.
struct FakeBackend {
    reply: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    fn new(reply: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                reply: reply.to_string(),
                prompts: Arc::clone(&prompts),
            },
            prompts,
        )
    }
}

#[async_trait]
impl CompletionBackend for FakeBackend {
    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Backend that always fails with a reported error.
struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(&self, _prompt: &str) -> Result<String, BackendError> {
        Err(BackendError::Reported("model not found".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Translator that returns a fixed output and counts invocations.
struct FakeTranslator {
    output: String,
    calls: Arc<AtomicUsize>,
}

impl FakeTranslator {
    fn new(output: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                output: output.to_string(),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, _text: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

/// Translator that always fails.
struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _text: &str) -> anyhow::Result<String> {
        anyhow::bail!("model files corrupted")
    }
}

// ============================================================
// Dispatch rules
// ============================================================

#[tokio::test]
async fn remote_mode_embeds_original_text_and_never_translates() {
    let (backend, prompts) = FakeBackend::new(r#"{"sentiment_score":1,"offensive_score":1}"#);
    let analyzer = CommentAnalyzer::new(Box::new(backend));

    let outcome = analyzer.analyze("Bu ürün çok kötü").await.unwrap();

    assert_eq!(
        outcome,
        ScoreOutcome::Scored(CommentScores {
            sentiment: 1,
            offensive: 1
        })
    );

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1, "backend must be invoked exactly once");
    assert!(
        prompts[0].contains("<Bu ürün çok kötü>"),
        "remote mode sends the comment untranslated, between delimiters"
    );
}

#[tokio::test]
async fn local_mode_translates_before_building_the_prompt() {
    let (backend, prompts) = FakeBackend::new(r#"{"sentiment_score":2,"offensive_score":1}"#);
    let (translator, calls) = FakeTranslator::new("This product is very bad");
    let analyzer = CommentAnalyzer::with_translator(Box::new(backend), Box::new(translator));

    let outcome = analyzer.analyze("Bu ürün çok kötü").await.unwrap();

    assert!(outcome.scores().is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1, "translator runs once");

    let prompts = prompts.lock().unwrap();
    assert!(
        prompts[0].contains("<This product is very bad>"),
        "the prompt must embed the translated text"
    );
    assert!(
        !prompts[0].contains("Bu ürün"),
        "the original text must not leak into the prompt"
    );
}

// ============================================================
// End-to-end outcomes
// ============================================================

#[tokio::test]
async fn unparseable_reply_becomes_the_fallback_outcome() {
    let (backend, _) = FakeBackend::new("I cannot help with that.");
    let analyzer = CommentAnalyzer::new(Box::new(backend));

    let outcome = analyzer.analyze("some comment").await.unwrap();
    assert_eq!(outcome, ScoreOutcome::Unparseable);
}

#[tokio::test]
async fn scores_pass_through_exactly_as_replied() {
    let (backend, _) = FakeBackend::new(r#"{"sentiment_score":5,"offensive_score":3}"#);
    let analyzer = CommentAnalyzer::new(Box::new(backend));

    let outcome = analyzer.analyze("harika bir gün").await.unwrap();
    assert_eq!(
        outcome.scores(),
        Some(CommentScores {
            sentiment: 5,
            offensive: 3
        })
    );
}

// ============================================================
// Error propagation
// ============================================================

#[tokio::test]
async fn backend_failure_is_fatal_to_the_call() {
    let analyzer = CommentAnalyzer::new(Box::new(FailingBackend));

    let err = analyzer.analyze("anything").await.unwrap_err();
    let chain = format!("{err:#}");
    assert!(
        chain.contains("model not found"),
        "the backend's message must survive propagation, got: {chain}"
    );
}

#[tokio::test]
async fn translation_failure_propagates_without_invoking_the_backend() {
    let (backend, prompts) = FakeBackend::new(r#"{"sentiment_score":3,"offensive_score":1}"#);
    let analyzer =
        CommentAnalyzer::with_translator(Box::new(backend), Box::new(FailingTranslator));

    let err = analyzer.analyze("bir yorum").await.unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("model files corrupted"));
    assert!(
        prompts.lock().unwrap().is_empty(),
        "the backend must not be invoked when translation fails"
    );
}
