// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only record of completed job identifiers.
//!
//! The done-log is the sole completion oracle: dependency checks re-read
//! it from disk on every call rather than caching, because external
//! processes may also consult (or have just appended to) it.

use crate::StorageError;
use stagehand_core::JobId;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One identifier per LF-terminated line, UTF-8.
#[derive(Debug, Clone)]
pub struct DoneLog {
    path: PathBuf,
}

impl DoneLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recreate the log empty. Fresh runs only; resume keeps the log.
    pub fn truncate(&self) -> Result<(), StorageError> {
        std::fs::write(&self.path, b"")?;
        tracing::info!(path = %self.path.display(), "created empty done-log");
        Ok(())
    }

    /// Append one identifier.
    ///
    /// The identifier and its terminator go out in a single write call so
    /// concurrent readers never observe a torn line.
    pub fn append(&self, id: &JobId) -> Result<(), StorageError> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(format!("{id}\n").as_bytes())?;
        tracing::debug!(job_id = %id, "appended to done-log");
        Ok(())
    }

    /// Fresh read: is `id` recorded as completed?
    pub fn contains(&self, id: &JobId) -> Result<bool, StorageError> {
        Ok(self.read_ids()?.iter().any(|done| done == id))
    }

    /// Fresh read: are all of `ids` recorded as completed?
    pub fn contains_all(&self, ids: &[JobId]) -> Result<bool, StorageError> {
        if ids.is_empty() {
            return Ok(true);
        }
        let done = self.read_ids()?;
        Ok(ids.iter().all(|id| done.contains(id)))
    }

    /// Every identifier in the log, in append order.
    ///
    /// A missing file reads as empty, since the scheduler may consult the
    /// log before the first completion.
    pub fn read_ids(&self) -> Result<Vec<JobId>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(JobId::from)
            .collect())
    }
}

#[cfg(test)]
#[path = "done_log_tests.rs"]
mod tests;
