use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

/// Default Ollama endpoint — the daemon's standard local port.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Base URL of the local Ollama daemon.
    pub ollama_url: String,
    /// Model tag served by Ollama (e.g. "mistral").
    pub ollama_model: String,
    /// OpenAI API key — only needed for the remote backend.
    pub openai_api_key: String,
    /// OpenAI chat model identifier.
    pub openai_model: String,
    /// OpenAI API base URL (overridable for proxies / compatible servers).
    pub openai_base_url: String,
    /// Directory containing the NLLB ONNX translation model files.
    pub model_dir: PathBuf,
    /// Connect/read timeout applied to backend calls. The local stream
    /// blocks for an externally-controlled duration; this bounds it.
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a usable default except OPENAI_API_KEY, which is
    /// only required when the remote backend is actually selected.
    pub fn load() -> Result<Self> {
        let request_timeout = env::var("TONAL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(120));

        let model_dir = env::var("TONAL_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::translate::download::default_model_dir());

        Ok(Self {
            ollama_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "mistral".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4-1106-preview".to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            model_dir,
            request_timeout,
        })
    }

    /// Check that the OpenAI API key is configured.
    /// Call this before any operation that scores via the remote backend.
    pub fn require_openai(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            anyhow::bail!(
                "OPENAI_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the translation model files are present.
    /// Call this before any operation that uses the local backend —
    /// local scoring always translates the comment to English first.
    pub fn require_translator(&self) -> Result<()> {
        if !crate::translate::download::model_files_present(&self.model_dir) {
            anyhow::bail!(
                "NLLB model files not found in {}\n\
                 Run `tonal download-model` to download them.\n\
                 Or score without --local to use the OpenAI backend instead.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}
