// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stagehand-storage: the scheduler's durable artifacts (done-log,
//! stop flag, per-job snapshots, resume marker).

pub mod done_log;
pub mod marker;
pub mod snapshot;
pub mod stop_flag;

pub use done_log::DoneLog;
pub use marker::{ResumeMarker, SchedulerData};
pub use snapshot::SnapshotStore;
pub use stop_flag::StopFlag;

use std::path::Path;
use thiserror::Error;

/// Errors from the on-disk artifacts.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Remove a file, treating "already gone" as success.
pub(crate) fn remove_if_present(path: &Path) -> Result<(), StorageError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
