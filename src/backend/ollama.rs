// Local Ollama backend — streaming NDJSON over HTTP.
//
// Ollama's /api/generate endpoint streams the completion as newline-delimited
// JSON objects, each carrying a partial text fragment. This adapter reads the
// body incrementally (the daemon may emit an unbounded or slow stream), splits
// it into lines as bytes arrive, and reassembles the fragments into one reply
// string. The stream ends on the first chunk with `done: true`, on an error
// chunk, or when the connection closes.
//
// API docs: https://github.com/ollama/ollama/blob/main/docs/api.md

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::BackendError;
use super::traits::CompletionBackend;

/// One decoded line of the wire stream.
///
/// Unknown fields (model, created_at, timing stats) are ignored — only the
/// fragment, the terminator, and the error channel matter here.
#[derive(Debug, Deserialize)]
pub struct StreamChunk {
    /// Partial text fragment; absent on the final bookkeeping chunk.
    #[serde(default)]
    pub response: Option<String>,
    /// True exactly once, on the terminating chunk.
    #[serde(default)]
    pub done: bool,
    /// Error message from the daemon (e.g. unknown model tag).
    #[serde(default)]
    pub error: Option<String>,
}

/// Reassembles a complete reply from a sequence of stream lines.
///
/// Pure over lines — the network loop feeds it, and tests can drive it
/// directly without a running daemon. Fragments are accumulated in arrival
/// order; `push_line` reports when the terminating chunk has been seen so
/// the caller stops reading.
#[derive(Default)]
pub struct StreamAssembler {
    parts: Vec<String>,
    done: bool,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one line and fold it into the buffer.
    ///
    /// Empty lines are skipped. An undecodable line is a protocol error; an
    /// error chunk fails immediately with the daemon's message — no further
    /// lines should be fed after either.
    pub fn push_line(&mut self, line: &str) -> Result<(), BackendError> {
        if line.trim().is_empty() {
            return Ok(());
        }

        let chunk: StreamChunk = serde_json::from_str(line)
            .map_err(|e| BackendError::Protocol(format!("undecodable stream chunk: {e}")))?;

        if let Some(message) = chunk.error {
            return Err(BackendError::Reported(message));
        }

        self.parts.push(chunk.response.unwrap_or_default());

        if chunk.done {
            self.done = true;
        }
        Ok(())
    }

    /// Whether the terminating chunk has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Join the accumulated fragments, trimmed of surrounding whitespace.
    pub fn finish(self) -> String {
        self.parts.concat().trim().to_string()
    }
}

/// Request body for /api/generate. `stream: true` is explicit — the
/// reassembly below depends on the newline-delimited format.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    stream: bool,
}

/// Backend served by a local Ollama daemon.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a backend pointing at the given daemon URL and model tag.
    ///
    /// `timeout` bounds both the connect and each read — a stuck connection
    /// fails instead of blocking the caller indefinitely.
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| BackendError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            prompt,
            model: &self.model,
            stream: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // The daemon reports errors as JSON even on non-2xx responses
            if let Ok(chunk) = serde_json::from_str::<StreamChunk>(&body) {
                if let Some(message) = chunk.error {
                    return Err(BackendError::Reported(message));
                }
            }
            return Err(BackendError::Unavailable(format!(
                "daemon returned {status}: {body}"
            )));
        }

        // Read the body incrementally: buffer bytes, peel off complete lines,
        // feed each to the assembler. Never hold the whole body in memory.
        let mut assembler = StreamAssembler::new();
        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();

        'read: while let Some(bytes) = stream.next().await {
            let bytes = bytes
                .map_err(|e| BackendError::Unavailable(format!("stream read failed: {e}")))?;
            buffer.extend_from_slice(&bytes);

            while let Some(newline) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                let line = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
                assembler.push_line(&line)?;
                if assembler.is_done() {
                    break 'read;
                }
            }
        }

        // A final line without a trailing newline can remain when the
        // connection ends; it still counts.
        if !assembler.is_done() && !buffer.is_empty() {
            let line = String::from_utf8_lossy(&buffer).into_owned();
            assembler.push_line(&line)?;
        }

        let reply = assembler.finish();
        debug!(chars = reply.len(), model = %self.model, "Ollama stream complete");
        Ok(reply)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
