//! Error handling utilities for the moodlog application.
//!
//! `AppError` is the single error type returned by the library and `AppResult` its
//! result alias. Backend failures are described by `AIError` and journal-file locking
//! failures by `LockError`; both convert into `AppError` with `?`.
//!
//! Only a subset of failures ever reach a caller of the analysis pipeline. Malformed
//! model output and rejected input are values, not errors: see
//! [`crate::journal_core::ParsedOutput`] and [`crate::ops::gate::GateState`].

use crate::ai::dispatch::ModelAttempt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to take the exclusive lock guarding journal writes.
///
/// # Examples
///
/// ```
/// use moodlog::errors::LockError;
///
/// let busy = LockError::FileBusy { path: "/home/me/.moodlog/journal.json".into() };
/// assert!(busy.to_string().contains("in use"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process holds the journal lock.
    #[error("Journal file is in use by another moodlog process: {path}. Please wait for it to finish.")]
    FileBusy {
        /// Journal file path
        path: PathBuf,
    },

    /// The lock file could not be opened or locked.
    #[error("Could not lock journal file {path}: {source}")]
    AcquisitionFailed {
        /// Journal file path
        path: PathBuf,
        /// Cause
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur when calling the generation backend.
///
/// `Transport` and `HttpStatus` describe a single failed attempt against one model;
/// the fallback dispatcher absorbs them. `AllModelsFailed` is terminal for a call and
/// is the only variant that propagates out of the response pipeline.
///
/// # Examples
///
/// ```
/// use moodlog::errors::AIError;
///
/// let error = AIError::HttpStatus {
///     model: "gemini-2.5-pro".to_string(),
///     status: 429,
///     body: "quota".to_string(),
/// };
/// assert!(format!("{}", error).contains("gemini-2.5-pro"));
/// assert!(format!("{}", error).contains("429"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// The request never produced an HTTP response (connect error, timeout, ...).
    #[error("Request to model {model} failed: {source}")]
    Transport {
        /// The model id that was being called
        model: String,
        /// The underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("Model {model} returned HTTP {status}: {body}")]
    HttpStatus {
        /// The model id that was being called
        model: String,
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The backend answered 2xx but the envelope could not be decoded.
    #[error("Invalid response from generation backend: {0}")]
    InvalidResponse(String),

    /// Every configured model was tried once and none succeeded.
    #[error("All {} configured models failed", attempts.len())]
    AllModelsFailed {
        /// Attempts in the order they were made
        attempts: Vec<ModelAttempt>,
    },
}

impl AIError {
    /// Returns true when this is the terminal `AllModelsFailed` outcome.
    pub fn is_all_models_failed(&self) -> bool {
        matches!(self, AIError::AllModelsFailed { .. })
    }
}

/// Crate-wide error type.
///
/// Callers of the response pipeline only ever see `AI(AIError::AllModelsFailed)` or
/// `Journal` (empty input rejected by [`crate::journal_core::AnalysisRequest::new`]).
/// The remaining variants come from configuration and the journal store.
///
/// # Examples
///
/// ```
/// use moodlog::errors::{AIError, AppError};
///
/// let error: AppError = AIError::AllModelsFailed { attempts: Vec::new() }.into();
/// assert!(matches!(error, AppError::AI(ref e) if e.is_all_models_failed()));
/// assert_eq!(format!("{}", error), "AI error: All 0 configured models failed");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad environment settings, or no API key when one is needed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem failures in the journal store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal input (e.g. empty text handed to the pipeline).
    #[error("Invalid journal input: {0}")]
    Journal(String),

    /// Errors reading, writing or querying the journal entry file.
    #[error("Journal store error: {0}")]
    Store(String),

    /// Errors related to locking the journal file.
    #[error("Journal lock error: {0}")]
    Lock(#[from] LockError),

    /// Errors related to the generation backend.
    ///
    /// Once returned by the pipeline this is always `AIError::AllModelsFailed`.
    #[error("AI error: {0}")]
    AI(#[from] AIError),
}

/// Result alias used throughout the crate.
pub type AppResult<T> = Result<T, AppError>;
