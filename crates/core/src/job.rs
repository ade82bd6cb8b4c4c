// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job contract: control state plus the advance/reset surface.

use crate::clock::Clock;
use crate::id::JobId;
use crate::stage::{StageError, StageOutcome};
use serde::{Deserialize, Serialize};

/// Serialisable control block embedded by every job implementation.
///
/// The scheduler's gates and retry machinery only ever look at this
/// struct; everything else a job carries is its own business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobState {
    pub id: JobId,
    /// Earliest admissible wall-clock time, epoch milliseconds.
    pub start_at_ms: u64,
    /// Wall-clock budget measured from `start_at_ms`, not from first
    /// admission, so a job whose dependencies are slow burns budget while
    /// it waits. `None` means no deadline.
    #[serde(default)]
    pub max_working_time_ms: Option<u64>,
    /// Additional retries allowed after the first attempt.
    #[serde(default)]
    pub max_tries: u32,
    /// Attempt counter; incremented on each retry.
    #[serde(default)]
    pub tries: u32,
    /// Identifiers that must appear in the done-log before admission.
    #[serde(default)]
    pub dependencies: Vec<JobId>,
}

impl JobState {
    /// New control state with a generated id, admissible immediately.
    pub fn new(clock: &impl Clock) -> Self {
        Self::with_id(JobId::generate(), clock)
    }

    /// New control state with a host-chosen stable id.
    pub fn with_id(id: impl Into<JobId>, clock: &impl Clock) -> Self {
        Self {
            id: id.into(),
            start_at_ms: clock.epoch_ms(),
            max_working_time_ms: None,
            max_tries: 0,
            tries: 0,
            dependencies: Vec::new(),
        }
    }

    /// Defer admission until the given wall-clock time.
    pub fn start_at_ms(mut self, start_at_ms: u64) -> Self {
        self.start_at_ms = start_at_ms;
        self
    }

    /// Give the job a working-time budget, counted from `start_at_ms`.
    pub fn max_working_time_ms(mut self, budget_ms: u64) -> Self {
        self.max_working_time_ms = Some(budget_ms);
        self
    }

    pub fn max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }

    pub fn dependencies(mut self, dependencies: Vec<JobId>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Start gate: has the scheduled start time been reached?
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.start_at_ms <= now_ms
    }

    /// Deadline gate: has the working-time budget elapsed since `start_at_ms`?
    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.max_working_time_ms {
            Some(budget) => now_ms.saturating_sub(self.start_at_ms) > budget,
            None => false,
        }
    }

    /// True while another retry is allowed.
    pub fn has_retry_budget(&self) -> bool {
        self.tries < self.max_tries
    }

    /// Count a retry against the budget.
    pub fn record_retry(&mut self) {
        self.tries += 1;
    }
}

/// A schedulable unit of work: a finite sequence of stages driven one
/// `advance` call at a time.
pub trait Job: Send {
    /// Control state consulted by the scheduler's gates and retry machinery.
    fn state(&self) -> &JobState;

    fn state_mut(&mut self) -> &mut JobState;

    /// Stable type tag used to look up the decoder when a snapshot is
    /// re-materialised. Must be registered with the engine's job registry.
    fn kind(&self) -> &str;

    /// Drive one stage of work.
    ///
    /// Implementations must set their stage markers only after the
    /// stage's work has fully completed, so a re-materialised job skips
    /// completed stages and re-runs the one that was interrupted.
    fn advance(&mut self) -> Result<StageOutcome, StageError>;

    /// Clear stage-completion markers so the next attempt starts from
    /// stage zero.
    fn reset(&mut self);

    /// Serialise the whole job: control state, stage markers and payload.
    fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error>;
}

/// On-disk envelope for one persisted job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub kind: String,
    pub job: serde_json::Value,
}

impl JobSnapshot {
    /// Capture `job` into an envelope ready for the snapshot store.
    pub fn capture(job: &dyn Job) -> Result<Self, serde_json::Error> {
        Ok(Self { kind: job.kind().to_string(), job: job.snapshot()? })
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
