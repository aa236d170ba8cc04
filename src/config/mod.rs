//! Configuration management for the moodlog application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `MOODLOG_API_KEY` (or `GEMINI_API_KEY`): Generation backend secret
//! - `MOODLOG_ENDPOINT`: Base URL of the generation backend
//! - `MOODLOG_MODELS`: Comma-separated model ids, most preferred first
//! - `MOODLOG_JOURNAL_FILE`: Journal file (defaults to ~/.moodlog/journal.json)
//! - `MOODLOG_TIMEOUT_SECS`: Per-request HTTP timeout (defaults to 60)
//! - `HOME`: Used for expanding the default journal file path

use crate::ai::ModelChain;
use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_JOURNAL_FILE, DEFAULT_TIMEOUT_SECS, ENV_VAR_API_KEY,
    ENV_VAR_ENDPOINT, ENV_VAR_GEMINI_API_KEY, ENV_VAR_HOME, ENV_VAR_JOURNAL_FILE, ENV_VAR_MODELS,
    ENV_VAR_TIMEOUT_SECS, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the moodlog application.
///
/// # Examples
///
/// Loading configuration from environment variables:
/// ```no_run
/// use moodlog::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
/// println!("Trying models: {:?}", config.models.ids());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Generation backend secret. Empty when not configured.
    pub api_key: String,

    /// Base URL of the generation backend's models collection.
    pub endpoint: String,

    /// Model ids tried in order.
    pub models: ModelChain,

    /// JSON file holding journal entries.
    pub journal_file: PathBuf,

    /// Per-request HTTP timeout, in seconds.
    pub request_timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &REDACTED_PLACEHOLDER)
            .field("endpoint", &self.endpoint)
            .field("models", &self.models.ids())
            .field("journal_file", &"[REDACTED_PATH]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for Config {
    /// Creates a new Config with default values and no API key.
    fn default() -> Self {
        Config {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            models: ModelChain::default(),
            journal_file: PathBuf::from(""),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// A missing API key is not an error here; commands that call the backend
    /// check it with [`Config::require_api_key`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - `MOODLOG_MODELS` is set but lists no model ids
    /// - `MOODLOG_TIMEOUT_SECS` is not a positive integer
    /// - The journal file path expansion fails or yields an empty path
    pub fn load() -> AppResult<Self> {
        let api_key = non_empty_var(ENV_VAR_API_KEY)
            .or_else(|| non_empty_var(ENV_VAR_GEMINI_API_KEY))
            .unwrap_or_default();

        let endpoint =
            non_empty_var(ENV_VAR_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let models = match env::var(ENV_VAR_MODELS) {
            Ok(list) => ModelChain::parse(&list)?,
            Err(_) => ModelChain::default(),
        };

        let request_timeout_secs = match non_empty_var(ENV_VAR_TIMEOUT_SECS) {
            Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                AppError::Config(format!(
                    "{} must be a positive number of seconds, got '{}'",
                    ENV_VAR_TIMEOUT_SECS, raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let journal_file_str = non_empty_var(ENV_VAR_JOURNAL_FILE).unwrap_or_else(|| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_JOURNAL_FILE)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&journal_file_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let journal_file = PathBuf::from(expanded_path.into_owned());

        let config = Config {
            api_key,
            endpoint,
            models,
            journal_file,
            request_timeout_secs,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the endpoint is not an http(s) URL, the journal
    /// file path is empty, or the timeout is zero.
    pub fn validate(&self) -> AppResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "Endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }

        if self.journal_file.as_os_str().is_empty() {
            return Err(AppError::Config("Journal file path is empty".to_string()));
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the API key, or an error if none is configured.
    pub fn require_api_key(&self) -> AppResult<&str> {
        if self.api_key.is_empty() {
            return Err(AppError::Config(format!(
                "No API key configured. Set {} (or {})",
                ENV_VAR_API_KEY, ENV_VAR_GEMINI_API_KEY
            )));
        }
        Ok(&self.api_key)
    }

    /// The per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
