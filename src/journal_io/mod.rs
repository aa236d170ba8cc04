//! Journal entry storage backed by a single JSON file.
//!
//! This module is the persistence collaborator for the command-line caller: the
//! response pipeline never touches it. Entries are kept as a JSON array, oldest
//! first. Every write takes an exclusive lock on a sidecar `.lock` file and
//! replaces the journal atomically through a temporary file in the same directory.

use crate::constants::{DEFAULT_CHAT_SUMMARY, DEFAULT_MOOD};
use crate::errors::{AppError, AppResult, LockError};
use crate::journal_core::{AnalysisResult, PriorExchange};
use crate::ops::stats::MoodSample;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

#[cfg(unix)]
use crate::constants::{DEFAULT_DIR_PERMISSIONS, DEFAULT_FILE_PERMISSIONS};
#[cfg(unix)]
use std::fs::Permissions;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// A stored journal entry: the user's text plus the analysis it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique id
    pub id: Uuid,
    /// What the user wrote
    pub text: String,
    /// Mood label
    pub mood: String,
    /// Summary or topic tag
    pub summary: String,
    /// Advice or chat reply
    pub advice: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&JournalEntry> for PriorExchange {
    fn from(entry: &JournalEntry) -> Self {
        PriorExchange::new(entry.text.clone(), entry.advice.clone())
    }
}

impl From<&JournalEntry> for MoodSample {
    fn from(entry: &JournalEntry) -> Self {
        MoodSample::new(Some(entry.mood.clone()), entry.created_at)
    }
}

/// JSON-file store for journal entries.
#[derive(Debug, Clone)]
pub struct JournalStore {
    path: PathBuf,
}

/// Exclusive lock held for the duration of a read-modify-write.
struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

impl JournalStore {
    /// Creates a store for the journal file at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every entry, oldest first. A missing file is an empty journal.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read, or `AppError::Store` if it
    /// is not a valid journal.
    pub fn load(&self) -> AppResult<Vec<JournalEntry>> {
        if !self.path.exists() {
            debug!("Journal file does not exist yet");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| AppError::Store(format!("Journal file is not valid JSON: {}", e)))
    }

    /// Lists entries newest first.
    pub fn list(&self) -> AppResult<Vec<JournalEntry>> {
        let mut entries = self.load()?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Prior exchanges for chat context, oldest first.
    pub fn history(&self) -> AppResult<Vec<PriorExchange>> {
        let mut entries = self.load()?;
        entries.sort_by_key(|e| e.created_at);
        Ok(entries.iter().map(PriorExchange::from).collect())
    }

    /// Appends a new entry built from `text` and its analysis.
    ///
    /// A missing mood or blank summary is stored as "Neutral" / "Chat".
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if `result` is a validation rejection or `text`
    /// is empty, and `AppError::Lock` if another process holds the journal.
    pub fn append(
        &self,
        text: &str,
        result: &AnalysisResult,
        created_at: DateTime<Utc>,
    ) -> AppResult<JournalEntry> {
        if result.is_rejection() {
            return Err(AppError::Store(
                "Rejected input cannot be saved as a journal entry".to_string(),
            ));
        }
        if text.trim().is_empty() || result.advice.trim().is_empty() {
            return Err(AppError::Store("Missing required fields".to_string()));
        }

        let entry = JournalEntry {
            id: Uuid::new_v4(),
            text: text.trim().to_string(),
            mood: result
                .mood
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MOOD.to_string()),
            summary: result
                .summary
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CHAT_SUMMARY.to_string()),
            advice: result.advice.clone(),
            created_at,
        };

        let _lock = self.lock()?;
        let mut entries = self.load()?;
        entries.push(entry.clone());
        self.write_all(&entries)?;

        debug!("Saved journal entry {}", entry.id);
        Ok(entry)
    }

    /// Deletes the entry with `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if no entry has that id.
    pub fn delete(&self, id: Uuid) -> AppResult<JournalEntry> {
        let _lock = self.lock()?;
        let mut entries = self.load()?;

        let position = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::Store(format!("Journal entry not found: {}", id)))?;
        let removed = entries.remove(position);
        self.write_all(&entries)?;

        debug!("Deleted journal entry {}", id);
        Ok(removed)
    }

    fn ensure_parent_dir(&self) -> AppResult<PathBuf> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create journal directory: {}", e),
                ))
            })?;

            #[cfg(unix)]
            {
                fs::set_permissions(&parent, Permissions::from_mode(DEFAULT_DIR_PERMISSIONS))?;
                debug!("Set 0o700 permissions on journal directory");
            }
        }

        Ok(parent)
    }

    fn lock(&self) -> AppResult<StoreLock> {
        self.ensure_parent_dir()?;

        let mut lock_path = self.path.clone().into_os_string();
        lock_path.push(".lock");
        let lock_path = PathBuf::from(lock_path);

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        file.try_lock_exclusive().map_err(|e| {
            if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                LockError::FileBusy {
                    path: self.path.clone(),
                }
            } else {
                LockError::AcquisitionFailed {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        Ok(StoreLock { file })
    }

    fn write_all(&self, entries: &[JournalEntry]) -> AppResult<()> {
        let parent = self.ensure_parent_dir()?;
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Store(format!("Failed to serialize journal: {}", e)))?;

        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;

        #[cfg(unix)]
        fs::set_permissions(
            temp.path(),
            Permissions::from_mode(DEFAULT_FILE_PERMISSIONS),
        )?;

        temp.persist(&self.path).map_err(|e| AppError::Io(e.error))?;
        Ok(())
    }
}
