// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory-creation demo job.

use serde::{Deserialize, Serialize};
use stagehand_core::{Job, JobState, StageError, StageOutcome};
use std::path::PathBuf;

/// Registry tag for [`MakeDirsJob`].
pub const MAKE_DIRS_KIND: &str = "make-dirs";

/// Creates one directory per stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeDirsJob {
    state: JobState,
    /// Directories still to create; drained one per stage.
    remaining: Vec<PathBuf>,
    /// Pristine target list, restored by `reset`.
    targets: Vec<PathBuf>,
}

impl MakeDirsJob {
    pub fn new(state: JobState, dirs: Vec<PathBuf>) -> Self {
        Self { state, remaining: dirs.clone(), targets: dirs }
    }
}

impl Job for MakeDirsJob {
    fn state(&self) -> &JobState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut JobState {
        &mut self.state
    }

    fn kind(&self) -> &str {
        MAKE_DIRS_KIND
    }

    fn advance(&mut self) -> Result<StageOutcome, StageError> {
        let Some(dir) = self.remaining.pop() else {
            return Ok(StageOutcome::Exhausted);
        };
        std::fs::create_dir_all(&dir)?;
        tracing::info!(job_id = %self.state.id, dir = %dir.display(), "created directory");
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
#[path = "make_dirs_tests.rs"]
mod tests;
