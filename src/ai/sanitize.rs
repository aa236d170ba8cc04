//! Recovery of JSON objects from raw model output.
//!
//! Models are asked for a bare JSON object but often wrap it in code fences, bold
//! markers or a sentence of preamble. [`parse_model_json`] strips those artifacts
//! and parses what remains. It is a best-effort layer, not a JSON repair tool:
//! unbalanced braces and trailing commas still fail.

use regex::Regex;
use serde_json::{Deserializer, Value};
use std::sync::LazyLock;
use tracing::debug;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json").expect("valid fence pattern"));

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("valid newline pattern"));

/// Removes fences and bold markers, collapses newline runs and trims.
pub fn clean_model_output(raw: &str) -> String {
    let without_fences = JSON_FENCE.replace_all(raw, "");
    let stripped = without_fences.replace("```", "").replace("**", "");
    NEWLINE_RUNS.replace_all(&stripped, "\n").trim().to_string()
}

/// Parses the JSON object contained in raw model output.
///
/// Steps, in order: strip artifacts (see [`clean_model_output`]), drop everything
/// before the first `{`, parse the first JSON value. Prose after a complete object
/// is tolerated as long as it contains no further braces. Returns `None` for empty
/// input, non-JSON text, non-object values and any parse error.
///
/// # Examples
///
/// ```
/// use moodlog::ai::parse_model_json;
/// use serde_json::json;
///
/// let raw = "```json\n{\"mood\":\"Calm\"}\n```";
/// assert_eq!(parse_model_json(raw), Some(json!({"mood": "Calm"})));
///
/// assert_eq!(parse_model_json("hello world"), None);
/// ```
pub fn parse_model_json(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }

    let cleaned = clean_model_output(raw);
    let start = cleaned.find('{')?;
    let candidate = &cleaned[start..];

    let mut stream = Deserializer::from_str(candidate).into_iter::<Value>();
    let value = match stream.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            debug!("Model output is not valid JSON: {}", e);
            return None;
        }
        None => return None,
    };

    let trailing = &candidate[stream.byte_offset()..];
    if trailing.contains(['{', '}']) {
        debug!("Model output has unbalanced braces after the JSON object");
        return None;
    }

    if !value.is_object() {
        return None;
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_json_is_returned_unchanged() {
        let original = json!({
            "mood": "Hopeful",
            "summary": "Excited about a new job.",
            "advice": "1. Celebrate.\n2. Prepare questions."
        });
        let raw = serde_json::to_string(&original).unwrap();
        assert_eq!(parse_model_json(&raw), Some(original.clone()));

        let pretty = serde_json::to_string_pretty(&original).unwrap();
        assert_eq!(parse_model_json(&pretty), Some(original));
    }

    #[test]
    fn test_code_fences_are_stripped() {
        let raw = "```json\n{\"mood\":\"Calm\"}\n```";
        assert_eq!(parse_model_json(raw), Some(json!({"mood": "Calm"})));

        let upper = "```JSON\n{\"mood\":\"Calm\"}\n```";
        assert_eq!(parse_model_json(upper), Some(json!({"mood": "Calm"})));

        let bare = "```\n{\"mood\":\"Calm\"}\n```";
        assert_eq!(parse_model_json(bare), Some(json!({"mood": "Calm"})));
    }

    #[test]
    fn test_bold_markers_are_stripped() {
        let raw = "**{\"mood\": \"Sad\", \"summary\": \"**Rough** day\"}**";
        assert_eq!(
            parse_model_json(raw),
            Some(json!({"mood": "Sad", "summary": "Rough day"}))
        );
    }

    #[test]
    fn test_leading_prose_is_discarded() {
        let raw = "Sure! Here is the analysis you asked for:\n\n{\"mood\": \"Anxious\"}";
        assert_eq!(parse_model_json(raw), Some(json!({"mood": "Anxious"})));
    }

    #[test]
    fn test_trailing_prose_is_tolerated() {
        let raw = "{\"mood\": \"Happy\"} Hope that helps!";
        assert_eq!(parse_model_json(raw), Some(json!({"mood": "Happy"})));
    }

    #[test]
    fn test_newline_runs_are_collapsed() {
        assert_eq!(clean_model_output("a\n\n\n\nb\n"), "a\nb");
    }

    #[test]
    fn test_non_json_returns_none() {
        assert_eq!(parse_model_json("hello world"), None);
        assert_eq!(parse_model_json(""), None);
        assert_eq!(parse_model_json("   \n "), None);
        assert_eq!(parse_model_json("[1, 2, 3]"), None);
    }

    #[test]
    fn test_unbalanced_braces_return_none() {
        assert_eq!(parse_model_json("{\"mood\": \"Calm\""), None);
        assert_eq!(parse_model_json("{\"mood\": {\"inner\": 1}"), None);
        assert_eq!(parse_model_json("{\"mood\": \"Calm\"}}"), None);
    }

    #[test]
    fn test_trailing_comma_is_not_repaired() {
        assert_eq!(parse_model_json("{\"mood\": \"Calm\",}"), None);
    }
}
