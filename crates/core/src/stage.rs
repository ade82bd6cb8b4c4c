// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage outcomes and completion markers.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Result of driving one stage of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// A stage ran to completion and control was yielded; call again later.
    Progress,
    /// No stages remain; the job is complete.
    Exhausted,
    /// The job detected a recoverable error and requests re-initialisation
    /// of its stage sequence.
    Retry,
}

impl std::fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageOutcome::Progress => write!(f, "progress"),
            StageOutcome::Exhausted => write!(f, "exhausted"),
            StageOutcome::Retry => write!(f, "retry"),
        }
    }
}

/// Unrecoverable failure inside a stage.
///
/// Anything a job cannot express as a retry-signal travels through here;
/// the scheduler logs it with context and drops the job.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

impl StageError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Ordered record of fully-completed stage names.
///
/// A marker is set only after the stage's work has finished, so a job
/// re-materialised from a snapshot skips exactly the stages that completed
/// and re-runs whichever stage was mid-execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageMarkers {
    done: Vec<SmolStr>,
}

impl StageMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `stage` as fully completed. Idempotent.
    pub fn complete(&mut self, stage: &str) {
        if !self.is_complete(stage) {
            self.done.push(SmolStr::new(stage));
        }
    }

    pub fn is_complete(&self, stage: &str) -> bool {
        self.done.iter().any(|s| s.as_str() == stage)
    }

    /// Forget every marker so the next attempt starts from stage zero.
    pub fn clear(&mut self) {
        self.done.clear();
    }

    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
