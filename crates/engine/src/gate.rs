// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission gates: scheduled start time and dependency completion.

use stagehand_core::{Clock, JobState};
use stagehand_storage::{DoneLog, StorageError};

/// Verdict of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admit,
    /// Scheduled start time not reached yet.
    NotDue,
    /// At least one dependency is missing from the done-log.
    AwaitingDependencies,
}

impl std::fmt::Display for Admission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Admission::Admit => write!(f, "admit"),
            Admission::NotDue => write!(f, "not due"),
            Admission::AwaitingDependencies => write!(f, "awaiting dependencies"),
        }
    }
}

/// Decides whether a pending job may enter the running set.
#[derive(Debug, Clone)]
pub struct AdmissionGate<C: Clock> {
    done_log: DoneLog,
    clock: C,
}

impl<C: Clock> AdmissionGate<C> {
    pub fn new(done_log: DoneLog, clock: C) -> Self {
        Self { done_log, clock }
    }

    /// Check both gates for one job.
    ///
    /// The done-log is read fresh from disk on every dependency check: it
    /// is the durable source of truth, and it is small and consulted only
    /// once per denied admission pass.
    pub fn check(&self, state: &JobState) -> Result<Admission, StorageError> {
        if !state.is_due(self.clock.epoch_ms()) {
            return Ok(Admission::NotDue);
        }
        if !self.done_log.contains_all(&state.dependencies)? {
            return Ok(Admission::AwaitingDependencies);
        }
        Ok(Admission::Admit)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
