// Completion backend trait — the swap-ready abstraction.
//
// Both scoring backends (local Ollama daemon, hosted OpenAI API) reduce to
// the same capability: send a prompt, get back one complete reply string.
// The orchestrator only ever sees this trait.

use async_trait::async_trait;

use super::error::BackendError;

/// Trait for text-completion backends. Implementations must be async because
/// both providers sit behind HTTP calls.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a single prompt and return the backend's complete reply text.
    ///
    /// The reply carries no structural guarantee — it may or may not be
    /// parseable JSON. Protocol-level failures map to BackendError; the
    /// caller decides what a malformed reply *content* means.
    async fn complete(&self, prompt: &str) -> Result<String, BackendError>;

    /// Short provider name for diagnostics.
    fn name(&self) -> &'static str;
}
