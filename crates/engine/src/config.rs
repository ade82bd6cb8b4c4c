// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler configuration: admission width, filesystem paths, tick.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default admission width per tick.
pub const POOL_SIZE: usize = 10;
/// Default snapshot directory for jobs still in the ready queue.
pub const QUEUED_TASKS_DIR: &str = "queued_tasks";
/// Default snapshot directory for jobs that were running at stop time.
pub const RUNNING_TASKS_DIR: &str = "running_tasks";
/// Default done-log path.
pub const DONE_TASKS: &str = "_done_tasks.txt";
/// Default stop-flag path.
pub const CONDITION_CACHE: &str = "_condition_cache.json";
/// Default resume-marker path.
pub const SCHEDULER_DATA: &str = "scheduler_data.json";
/// Default quiescent sleep between ticks.
pub const TICK: Duration = Duration::from_secs(1);

/// Paths and limits for one scheduler instance.
///
/// Every path is an explicit field so tests (and hosts running several
/// schedulers) can isolate runs. The defaults match the constants above,
/// relative to the working directory.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Jobs examined for admission per tick. Bounds tick latency, not
    /// parallelism.
    pub pool_size: usize,
    pub queued_dir: PathBuf,
    pub running_dir: PathBuf,
    pub done_log: PathBuf,
    pub stop_flag: PathBuf,
    pub scheduler_data: PathBuf,
    /// Quiescent sleep between ticks.
    pub tick: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::under(Path::new("."))
    }
}

impl SchedulerConfig {
    /// Scope every path beneath `root`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            pool_size: POOL_SIZE,
            queued_dir: root.join(QUEUED_TASKS_DIR),
            running_dir: root.join(RUNNING_TASKS_DIR),
            done_log: root.join(DONE_TASKS),
            stop_flag: root.join(CONDITION_CACHE),
            scheduler_data: root.join(SCHEDULER_DATA),
            tick: TICK,
        }
    }

    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}
