//! Core analysis types without I/O operations.
//!
//! This module holds the values that flow through the response pipeline: the
//! request built by a caller, the prior exchanges used as chat context, and the
//! structured result handed back. Nothing here talks to the network or the disk.

use crate::constants::{DEFAULT_CHAT_SUMMARY, DEFAULT_MOOD};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clarification shown when the validation gate rejects input without giving a reason.
pub const DEFAULT_CLARIFICATION: &str = "I couldn't quite understand that. Could you write a few sentences about how you're feeling or what's on your mind?";

/// One past turn of a conversation, as projected from a stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorExchange {
    /// What the user wrote
    pub user_text: String,
    /// What the assistant replied
    pub assistant_text: String,
}

impl PriorExchange {
    /// Creates a new exchange.
    pub fn new(user_text: impl Into<String>, assistant_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            assistant_text: assistant_text.into(),
        }
    }
}

/// Input to the response pipeline.
///
/// Construction trims the text and refuses empty or whitespace-only input, so a
/// pipeline never sees text that a caller should have rejected.
///
/// # Examples
///
/// ```
/// use moodlog::journal_core::AnalysisRequest;
///
/// let request = AnalysisRequest::new("  I slept well today \n", Vec::new()).unwrap();
/// assert_eq!(request.text(), "I slept well today");
///
/// assert!(AnalysisRequest::new("   ", Vec::new()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    text: String,
    history: Vec<PriorExchange>,
}

impl AnalysisRequest {
    /// Builds a request from raw user text and prior exchanges (oldest first).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal` if `raw_text` is empty after trimming.
    pub fn new(raw_text: impl AsRef<str>, history: Vec<PriorExchange>) -> AppResult<Self> {
        let text = raw_text.as_ref().trim();
        if text.is_empty() {
            return Err(AppError::Journal(
                "Entry text cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            text: text.to_string(),
            history,
        })
    }

    /// The trimmed user text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Prior exchanges, oldest first.
    pub fn history(&self) -> &[PriorExchange] {
        &self.history
    }
}

/// Structured outcome of the pipeline.
///
/// A `None` mood marks a validation rejection: `advice` then carries a request for
/// clarification rather than supportive content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One- or two-word mood label
    pub mood: Option<String>,
    /// Neutral paraphrase (journal) or short topic tag (chat)
    pub summary: Option<String>,
    /// Supportive message, or the clarification request on rejection
    pub advice: String,
}

/// Shape the model is asked to produce. Unknown fields are ignored.
#[derive(Deserialize)]
struct ModelAnalysis {
    mood: String,
    summary: String,
    advice: String,
}

impl AnalysisResult {
    /// Builds a successful result.
    pub fn new(
        mood: impl Into<String>,
        summary: impl Into<String>,
        advice: impl Into<String>,
    ) -> Self {
        Self {
            mood: Some(mood.into()),
            summary: Some(summary.into()),
            advice: advice.into(),
        }
    }

    /// Builds a validation rejection carrying a clarification message.
    pub fn rejection(message: impl Into<String>) -> Self {
        Self {
            mood: None,
            summary: None,
            advice: message.into(),
        }
    }

    /// Fixed result for journal analysis when the model reply is unusable.
    pub fn journal_fallback() -> Self {
        Self::new(
            DEFAULT_MOOD,
            "No summary provided.",
            "Keep journaling. Self-expression brings healing and clarity, and every entry is a step toward understanding yourself a little better.",
        )
    }

    /// Fixed result for a chat turn when the model reply is unusable.
    pub fn chat_fallback() -> Self {
        Self::new(
            DEFAULT_MOOD,
            DEFAULT_CHAT_SUMMARY,
            "I hit a small hiccup processing that, but I'm still here with you. Could you tell me a little more about what's on your mind?",
        )
    }

    /// Returns true if this result is a validation rejection.
    pub fn is_rejection(&self) -> bool {
        self.mood.is_none()
    }

    /// Checks a sanitized model object against the `{mood, summary, advice}` schema.
    ///
    /// All three fields must be strings; none of them may be blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use moodlog::journal_core::{AnalysisResult, ParsedOutput};
    /// use serde_json::json;
    ///
    /// let ok = AnalysisResult::from_model_value(&json!({
    ///     "mood": "Calm", "summary": "A quiet day.", "advice": "Rest well."
    /// }));
    /// assert!(matches!(ok, ParsedOutput::Success(_)));
    ///
    /// let bad = AnalysisResult::from_model_value(&json!({"mood": "Calm"}));
    /// assert_eq!(bad, ParsedOutput::Malformed);
    /// ```
    pub fn from_model_value(value: &Value) -> ParsedOutput {
        let Ok(raw) = ModelAnalysis::deserialize(value) else {
            return ParsedOutput::Malformed;
        };

        let mood = raw.mood.trim();
        let summary = raw.summary.trim();
        if mood.is_empty() || summary.is_empty() || raw.advice.trim().is_empty() {
            return ParsedOutput::Malformed;
        }

        ParsedOutput::Success(AnalysisResult::new(mood, summary, raw.advice))
    }
}

/// Result of checking model output against the analysis schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOutput {
    /// The output matched the schema
    Success(AnalysisResult),
    /// The output was missing, not JSON, or the wrong shape
    Malformed,
}

impl ParsedOutput {
    /// Returns the parsed result or the given fallback.
    pub fn unwrap_or(self, fallback: AnalysisResult) -> AnalysisResult {
        match self {
            ParsedOutput::Success(result) => result,
            ParsedOutput::Malformed => fallback,
        }
    }
}

/// Verdict returned by the validation model: `{"isValid": bool, "message"?: string}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GateVerdict {
    /// Whether the text is reflective, intelligible input
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    /// Optional clarification to show the user
    #[serde(default)]
    pub message: Option<String>,
}

impl GateVerdict {
    /// Checks a sanitized model object against the verdict schema.
    ///
    /// Returns `None` when `isValid` is missing or not a boolean.
    pub fn from_model_value(value: &Value) -> Option<Self> {
        GateVerdict::deserialize(value).ok()
    }
}
