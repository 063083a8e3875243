// Unit tests for the reply parser.
//
// The contract: any reply that is a JSON object with both integer score
// keys parses to exactly those values (no range re-validation); everything
// else — non-JSON, missing keys, wrong-shape values — collapses to the
// single Unparseable outcome.

use tonal::scoring::response::{parse_scores, CommentScores, ScoreOutcome, PARSE_FAILURE_SENTINEL};

// ============================================================
// Identity for well-formed replies
// ============================================================

#[test]
fn valid_reply_parses_to_exact_pair() {
    let outcome = parse_scores(r#"{"sentiment_score":1,"offensive_score":1}"#);
    assert_eq!(
        outcome,
        ScoreOutcome::Scored(CommentScores {
            sentiment: 1,
            offensive: 1
        })
    );
}

#[test]
fn key_order_does_not_matter() {
    let outcome = parse_scores(r#"{"offensive_score":2,"sentiment_score":5}"#);
    assert_eq!(
        outcome.scores(),
        Some(CommentScores {
            sentiment: 5,
            offensive: 2
        })
    );
}

#[test]
fn extra_keys_are_tolerated() {
    let outcome =
        parse_scores(r#"{"sentiment_score":3,"offensive_score":1,"explanation":"neutral"}"#);
    assert_eq!(
        outcome.scores(),
        Some(CommentScores {
            sentiment: 3,
            offensive: 1
        })
    );
}

#[test]
fn surrounding_whitespace_is_fine() {
    let outcome = parse_scores("  \n{\"sentiment_score\":4,\"offensive_score\":2}\n  ");
    assert!(outcome.scores().is_some());
}

#[test]
fn out_of_range_values_pass_through_unvalidated() {
    // The 1-5 rubric is a prompt-level contract only; the parser does not
    // re-check it
    let outcome = parse_scores(r#"{"sentiment_score":9,"offensive_score":0}"#);
    assert_eq!(
        outcome.scores(),
        Some(CommentScores {
            sentiment: 9,
            offensive: 0
        })
    );
}

#[test]
fn negative_values_pass_through_unvalidated() {
    let outcome = parse_scores(r#"{"sentiment_score":-3,"offensive_score":1}"#);
    assert_eq!(
        outcome.scores(),
        Some(CommentScores {
            sentiment: -3,
            offensive: 1
        })
    );
}

// ============================================================
// Fallback for everything else
// ============================================================

#[test]
fn plain_text_is_unparseable() {
    assert_eq!(parse_scores("not json"), ScoreOutcome::Unparseable);
}

#[test]
fn refusal_sentence_is_unparseable() {
    assert_eq!(
        parse_scores("I cannot help with that."),
        ScoreOutcome::Unparseable
    );
}

#[test]
fn empty_reply_is_unparseable() {
    assert_eq!(parse_scores(""), ScoreOutcome::Unparseable);
}

#[test]
fn missing_offensive_key_is_unparseable() {
    assert_eq!(
        parse_scores(r#"{"sentiment_score":3}"#),
        ScoreOutcome::Unparseable
    );
}

#[test]
fn missing_sentiment_key_is_unparseable() {
    assert_eq!(
        parse_scores(r#"{"offensive_score":3}"#),
        ScoreOutcome::Unparseable
    );
}

#[test]
fn string_valued_score_is_unparseable() {
    assert_eq!(
        parse_scores(r#"{"sentiment_score":"three","offensive_score":1}"#),
        ScoreOutcome::Unparseable
    );
}

#[test]
fn fractional_score_is_unparseable() {
    assert_eq!(
        parse_scores(r#"{"sentiment_score":3.5,"offensive_score":1}"#),
        ScoreOutcome::Unparseable
    );
}

#[test]
fn json_array_is_unparseable() {
    assert_eq!(parse_scores(r#"[3,1]"#), ScoreOutcome::Unparseable);
}

#[test]
fn json_wrapped_in_prose_is_unparseable() {
    // Models sometimes narrate around the JSON; the strict decode rejects it
    assert_eq!(
        parse_scores(r#"Sure! Here you go: {"sentiment_score":3,"offensive_score":1}"#),
        ScoreOutcome::Unparseable
    );
}

// ============================================================
// Outcome surface
// ============================================================

#[test]
fn unparseable_outcome_has_no_scores() {
    assert_eq!(ScoreOutcome::Unparseable.scores(), None);
}

#[test]
fn sentinel_is_minus_one() {
    assert_eq!(PARSE_FAILURE_SENTINEL, -1);
}
