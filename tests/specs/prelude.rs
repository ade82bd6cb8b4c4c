// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for scheduler specs.

pub use stagehand_core::{Clock, FakeClock, JobState, ScriptedJob, SystemClock, SCRIPTED_JOB_KIND};
pub use stagehand_engine::{JobRegistry, RunOutcome, Scheduler, SchedulerConfig, StopCause};
pub use stagehand_storage::{DoneLog, StopFlag};
pub use std::time::Duration;

use stagehand_engine::config;
use std::path::Path;

/// Millisecond ticks so a spec finishes in tens of milliseconds.
pub fn fast_config(root: &Path) -> SchedulerConfig {
    SchedulerConfig::under(root).tick(Duration::from_millis(2))
}

pub fn scripted_registry() -> JobRegistry {
    JobRegistry::new().with::<ScriptedJob>(SCRIPTED_JOB_KIND)
}

/// Identifiers in the done-log, in append order.
pub fn done_ids(root: &Path) -> Vec<String> {
    DoneLog::new(root.join(config::DONE_TASKS))
        .read_ids()
        .unwrap()
        .into_iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

pub fn stop_flag(root: &Path) -> StopFlag {
    StopFlag::new(root.join(config::CONDITION_CACHE))
}

/// Snapshot file stems (= job identifiers) across both role directories,
/// sorted.
pub fn snapshot_union(root: &Path) -> Vec<String> {
    let mut ids = Vec::new();
    for dir in [config::QUEUED_TASKS_DIR, config::RUNNING_TASKS_DIR] {
        let dir = root.join(dir);
        let Ok(entries) = std::fs::read_dir(&dir) else { continue };
        ids.extend(
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned())),
        );
    }
    ids.sort();
    ids
}

pub fn resume_marker_present(root: &Path) -> bool {
    root.join(config::SCHEDULER_DATA).is_file()
}

/// True when every transient control file is gone and both snapshot
/// directories are empty.
pub fn control_files_absent(root: &Path) -> bool {
    snapshot_union(root).is_empty()
        && !root.join(config::CONDITION_CACHE).exists()
        && !root.join(config::SCHEDULER_DATA).exists()
}
