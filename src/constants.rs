//! Constants used throughout the application.
//!
//! This module contains all constants used in the moodlog application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moodlog";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A mood journal with AI reflections and gentle advice";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "moodlog";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Configuration Keys & Environment Variables
/// Environment variable holding the generation backend secret.
pub const ENV_VAR_API_KEY: &str = "MOODLOG_API_KEY";
/// Fallback environment variable for the backend secret.
pub const ENV_VAR_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable overriding the generation endpoint base URL.
pub const ENV_VAR_ENDPOINT: &str = "MOODLOG_ENDPOINT";
/// Environment variable holding the comma-separated model priority list.
pub const ENV_VAR_MODELS: &str = "MOODLOG_MODELS";
/// Environment variable for the journal entry file.
pub const ENV_VAR_JOURNAL_FILE: &str = "MOODLOG_JOURNAL_FILE";
/// Environment variable for the per-request HTTP timeout, in seconds.
pub const ENV_VAR_TIMEOUT_SECS: &str = "MOODLOG_TIMEOUT_SECS";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default journal file, relative to the user's home directory.
pub const DEFAULT_JOURNAL_FILE: &str = ".moodlog/journal.json";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Generation Backend
/// Base URL of the generation backend.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Model ids tried in order, most capable first.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-2.0-flash-lite",
];
/// Default per-request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// Generation Settings
/// Temperature for single-shot journal analysis.
pub const JOURNAL_TEMPERATURE: f32 = 0.4;
/// Output budget for journal analysis (long-form advice).
pub const JOURNAL_MAX_OUTPUT_TOKENS: u32 = 4096;
/// Temperature for conversational replies.
pub const CHAT_TEMPERATURE: f32 = 0.6;
/// Output budget for conversational replies.
pub const CHAT_MAX_OUTPUT_TOKENS: u32 = 1024;
/// Temperature for the input validation check.
pub const VALIDATION_TEMPERATURE: f32 = 0.1;
/// Output budget for the input validation check.
pub const VALIDATION_MAX_OUTPUT_TOKENS: u32 = 256;

// Conversation
/// Name of the counselor persona used in chat mode.
pub const ASSISTANT_NAME: &str = "Sage";
/// Number of most recent exchanges embedded in a chat prompt.
pub const CONTEXT_WINDOW_TURNS: usize = 10;

// Moods & Fallback Content
/// Mood used when the model gives none or the reply is unusable.
pub const DEFAULT_MOOD: &str = "Neutral";
/// Summary stored for chat turns that came back without one.
pub const DEFAULT_CHAT_SUMMARY: &str = "Chat";
/// Dominant mood reported when there are no entries.
pub const NO_DATA_MOOD: &str = "No Data";
/// Moods that are always present in the mood distribution, in display order.
pub const SEEDED_MOODS: &[&str] = &["Happy", "Sad", "Neutral", "Anxious", "Excited", "Angry"];
/// Number of trailing days covered by the activity timeline.
pub const ACTIVITY_TIMELINE_DAYS: u32 = 14;

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
