// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers shared across crates (enabled via the `test-support` feature).

use crate::clock::Clock;
use crate::job::{Job, JobState};
use crate::stage::{StageError, StageMarkers, StageOutcome};
use serde::{Deserialize, Serialize};

/// Registry tag for [`ScriptedJob`].
pub const SCRIPTED_JOB_KIND: &str = "scripted";

/// Scripted multi-stage job for scheduler tests.
///
/// Runs `stages` named stages (`s0`, `s1`, …), one per `advance` call,
/// with optional failure injection:
///
/// - [`retry_until_try`](Self::retry_until_try): attempts with
///   `tries < n` signal a retry when they reach `fail_stage`;
/// - [`retry_always`](Self::retry_always): every attempt signals a retry
///   (for exhausting the budget);
/// - [`error_stage`](Self::error_stage): that stage returns a
///   [`StageError`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedJob {
    pub state: JobState,
    pub markers: StageMarkers,
    pub stages: u32,
    #[serde(default)]
    pub fail_stage: u32,
    #[serde(default)]
    pub retry_until_try: u32,
    #[serde(default)]
    pub error_at: Option<u32>,
    /// Stages executed across all attempts; not cleared by `reset`.
    #[serde(default)]
    pub executed: u32,
}

impl ScriptedJob {
    pub fn new(stages: u32, clock: &impl Clock) -> Self {
        Self {
            state: JobState::new(clock),
            markers: StageMarkers::new(),
            stages,
            fail_stage: 0,
            retry_until_try: 0,
            error_at: None,
            executed: 0,
        }
    }

    pub fn with_state(mut self, state: JobState) -> Self {
        self.state = state;
        self
    }

    /// Signal a retry at `fail_stage` on every attempt with `tries < n`.
    pub fn retry_until_try(mut self, n: u32) -> Self {
        self.retry_until_try = n;
        self
    }

    /// Signal a retry on every attempt, regardless of `tries`.
    pub fn retry_always(mut self) -> Self {
        self.retry_until_try = u32::MAX;
        self
    }

    /// Stage index at which injected retries fire (default 0).
    pub fn fail_stage(mut self, stage: u32) -> Self {
        self.fail_stage = stage;
        self
    }

    /// Return a [`StageError`] when this stage is reached.
    pub fn error_at(mut self, stage: u32) -> Self {
        self.error_at = Some(stage);
        self
    }

    fn stage_name(index: u32) -> String {
        format!("s{index}")
    }
}

impl Job for ScriptedJob {
    fn state(&self) -> &JobState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut JobState {
        &mut self.state
    }

    fn kind(&self) -> &str {
        SCRIPTED_JOB_KIND
    }

    fn advance(&mut self) -> Result<StageOutcome, StageError> {
        for index in 0..self.stages {
            let name = Self::stage_name(index);
            if self.markers.is_complete(&name) {
                continue;
            }
            if self.state.tries < self.retry_until_try && index == self.fail_stage {
                return Ok(StageOutcome::Retry);
            }
            if self.error_at == Some(index) {
                return Err(StageError::other(format!("scripted failure at {name}")));
            }
            self.executed += 1;
            self.markers.complete(&name);
            return Ok(StageOutcome::Progress);
        }
        Ok(StageOutcome::Exhausted)
    }

    fn reset(&mut self) {
        self.markers.clear();
    }

    fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
