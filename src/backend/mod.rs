// Completion backends — trait-based abstraction for swappable providers.
//
// The CompletionBackend trait defines the interface. OllamaBackend implements
// it against a local streaming daemon; OpenAiBackend against the hosted chat
// completion API. The orchestrator takes a boxed backend, so swapping one for
// the other never touches the scoring pipeline.

pub mod error;
pub mod ollama;
pub mod openai;
pub mod traits;
