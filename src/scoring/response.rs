// Parsing the model's free-text reply into scores.
//
// The reply carries no structural guarantee. Decode it strictly as a JSON
// object with the two required integer keys; every possible failure — not
// JSON at all, a missing key, a wrong-shape value — collapses into the
// single Unparseable outcome. A malformed reply is an expected occurrence
// at this layer, not an error to raise.

use serde::Deserialize;

/// Value rendered in place of a score pair when the reply is unparseable.
/// The caller-facing contract is: a valid pair, or this.
pub const PARSE_FAILURE_SENTINEL: i64 = -1;

/// The two ratings extracted from a well-formed reply.
///
/// Values are passed through uninterpreted — an out-of-range integer from
/// the model is NOT re-validated against the 1-5 rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentScores {
    pub sentiment: i64,
    pub offensive: i64,
}

/// Outcome of one scoring call: both ratings, or a single fallback that
/// deliberately does not distinguish *why* the reply failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    Scored(CommentScores),
    Unparseable,
}

impl ScoreOutcome {
    /// The scores, if the reply parsed.
    pub fn scores(&self) -> Option<CommentScores> {
        match self {
            ScoreOutcome::Scored(scores) => Some(*scores),
            ScoreOutcome::Unparseable => None,
        }
    }
}

/// Reply shape the prompt asks for. Extra keys are tolerated; both score
/// keys are required and must be integers.
#[derive(Deserialize)]
struct RawScores {
    sentiment_score: i64,
    offensive_score: i64,
}

/// Decode a backend reply into a score outcome. Never fails.
pub fn parse_scores(reply: &str) -> ScoreOutcome {
    match serde_json::from_str::<RawScores>(reply) {
        Ok(raw) => ScoreOutcome::Scored(CommentScores {
            sentiment: raw.sentiment_score,
            offensive: raw.offensive_score,
        }),
        Err(_) => ScoreOutcome::Unparseable,
    }
}
