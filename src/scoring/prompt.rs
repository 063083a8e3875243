// The fixed scoring-task prompt.
//
// Two closed-ended 1-5 rubrics, and an instruction to answer as a JSON
// object with exactly the two score keys. The parser in response.rs is
// written against this contract — changing the key names here without
// changing the parser breaks every reply.

/// JSON key the model must use for the sentiment rating.
pub const SENTIMENT_KEY: &str = "sentiment_score";

/// JSON key the model must use for the offensiveness rating.
pub const OFFENSIVE_KEY: &str = "offensive_score";

/// Render the scoring prompt around a comment.
///
/// The comment is interpolated verbatim between angle brackets. A comment
/// that itself contains those delimiters can corrupt the model's view of
/// where the comment ends; no escaping is attempted.
pub fn build_scoring_prompt(comment: &str) -> String {
    format!(
        "\
Your task is to perform the following actions based on the social media comment, delimited by <>:

1 - Generate the sentiment analysis for the comment, assign a score from 1 to 5, where:
    1 = Very Negative
    2 = Negative
    3 = Neutral
    4 = Positive
    5 = Very Positive
2 - Generate the offensive language detection for the comment, assign a score from 1 to 5, where:
    1 = Not Offensive
    2 = Slightly Offensive
    3 = Moderately Offensive
    4 = Offensive
    5 = Highly Offensive

Format your response as a JSON object with the keys '{SENTIMENT_KEY}' and '{OFFENSIVE_KEY}'.

Comment: <{comment}>"
    )
}
