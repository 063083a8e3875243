// Scoring pipeline — prompt contract, reply parsing, and orchestration.
//
// The prompt and parser are two halves of one contract with the model:
// prompt.rs asks for a JSON object with two integer keys, response.rs
// extracts exactly those keys and collapses every failure to parse into
// a single fallback outcome. analyzer.rs drives the whole pipeline.

pub mod analyzer;
pub mod prompt;
pub mod response;
