// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types.

use thiserror::Error;

/// Which stop channel fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    /// The on-disk stop flag read `false`.
    Flag,
    /// OS interrupt (ctrl-c).
    Interrupt,
    /// The in-process cancellation token fired.
    Cancelled,
}

impl std::fmt::Display for StopCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopCause::Flag => write!(f, "stop flag"),
            StopCause::Interrupt => write!(f, "interrupt"),
            StopCause::Cancelled => write!(f, "cancellation token"),
        }
    }
}

/// Errors surfaced by the scheduler.
///
/// Per-job failures (retry signals, timeouts, stage errors) are handled
/// inside the loop and never reach this type; what does reach it is a
/// broken durable artifact.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("storage error: {0}")]
    Storage(#[from] stagehand_storage::StorageError),
    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryError),
}
