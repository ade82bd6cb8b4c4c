// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Marker-file demo job; typically depends on [`crate::MakeDirsJob`].

use serde::{Deserialize, Serialize};
use stagehand_core::{Job, JobState, StageError, StageOutcome};
use std::path::PathBuf;

/// Registry tag for [`TouchFilesJob`].
pub const TOUCH_FILES_KIND: &str = "touch-files";

/// Name of the file placed in each target directory.
pub const MARKER_FILE: &str = "testfile.txt";

/// Creates one empty marker file per directory per stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchFilesJob {
    state: JobState,
    /// Directories still to visit; drained one per stage.
    remaining: Vec<PathBuf>,
    /// Pristine target list, restored by `reset`.
    targets: Vec<PathBuf>,
}

impl TouchFilesJob {
    pub fn new(state: JobState, dirs: Vec<PathBuf>) -> Self {
        Self { state, remaining: dirs.clone(), targets: dirs }
    }
}

impl Job for TouchFilesJob {
    fn state(&self) -> &JobState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut JobState {
        &mut self.state
    }

    fn kind(&self) -> &str {
        TOUCH_FILES_KIND
    }

    fn advance(&mut self) -> Result<StageOutcome, StageError> {
        let Some(dir) = self.remaining.pop() else {
            return Ok(StageOutcome::Exhausted);
        };
        let path = dir.join(MARKER_FILE);
        std::fs::write(&path, b"")?;
        tracing::info!(job_id = %self.state.id, file = %path.display(), "created file");
        Ok(StageOutcome::Progress)
    }

    fn reset(&mut self) {
        self.remaining = self.targets.clone();
    }

    fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
#[path = "touch_files_tests.rs"]
mod tests;
