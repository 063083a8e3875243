use anyhow::Result;
use async_trait::async_trait;

/// Trait for source-to-scoring-language translation. Stateless from the
/// caller's perspective: text in, text out. Implementations must be async
/// because inference is offloaded off the calling thread.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one text into the scoring language.
    async fn translate(&self, text: &str) -> Result<String>;
}
