// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resume marker written on graceful stop.

use crate::{remove_if_present, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of the scheduler data file.
///
/// The file's *presence* is what signals "resume"; the fields are
/// informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerData {
    pub save_data: bool,
    pub len_queued_tasks: usize,
    pub len_running_tasks: usize,
    pub written_at: DateTime<Utc>,
}

impl SchedulerData {
    pub fn new(save_data: bool, len_queued_tasks: usize, len_running_tasks: usize) -> Self {
        Self { save_data, len_queued_tasks, len_running_tasks, written_at: Utc::now() }
    }
}

/// Marker file governing resume-after-stop.
#[derive(Debug, Clone)]
pub struct ResumeMarker {
    path: PathBuf,
}

impl ResumeMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Present means the previous process stopped gracefully and left
    /// state behind to resume.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn write(&self, data: &SchedulerData) -> Result<(), StorageError> {
        std::fs::write(&self.path, serde_json::to_string_pretty(data)?)?;
        tracing::info!(
            queued = data.len_queued_tasks,
            running = data.len_running_tasks,
            "wrote scheduler data file"
        );
        Ok(())
    }

    pub fn load(&self) -> Result<SchedulerData, StorageError> {
        Ok(serde_json::from_str(&std::fs::read_to_string(&self.path)?)?)
    }

    pub fn remove(&self) -> Result<(), StorageError> {
        remove_if_present(&self.path)
    }
}

#[cfg(test)]
#[path = "marker_tests.rs"]
mod tests;
