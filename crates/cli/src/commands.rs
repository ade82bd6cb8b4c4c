// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations.

use anyhow::Result;
use stagehand_core::{JobState, SystemClock};
use stagehand_engine::{JobRegistry, Scheduler, SchedulerConfig};
use stagehand_jobs::{
    FetchPagesJob, MakeDirsJob, TouchFilesJob, FETCH_PAGES_KIND, MAKE_DIRS_KIND, TOUCH_FILES_KIND,
};
use stagehand_storage::{DoneLog, ResumeMarker, SnapshotStore, StopFlag};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Drive the demo pipeline: create directories, put a marker file in
/// each, then archive a few pages, the latter two gated on their
/// predecessor through the done-log.
pub async fn run(root: &Path, pool_size: usize, tick_ms: u64) -> Result<()> {
    let config = SchedulerConfig::under(root)
        .pool_size(pool_size)
        .tick(Duration::from_millis(tick_ms));
    let clock = SystemClock;
    let mut scheduler = Scheduler::new(config, demo_registry(), clock.clone())?;

    // A resumed scheduler already carries its jobs; only a fresh run gets
    // the demo pipeline scheduled.
    if scheduler.queued_len() == 0 && scheduler.running_len() == 0 {
        schedule_demo_pipeline(&mut scheduler, root, &clock);
    }

    let outcome = scheduler.run().await?;
    tracing::info!(?outcome, "scheduler finished");
    Ok(())
}

/// Flip the stop flag; the running scheduler checkpoints at its next step.
pub fn stop(root: &Path) -> Result<()> {
    let config = SchedulerConfig::under(root);
    StopFlag::new(&config.stop_flag).request_stop()?;
    println!("stop requested; the scheduler will checkpoint at its next step");
    Ok(())
}

/// Report what the state files say without touching them.
pub fn status(root: &Path) -> Result<()> {
    let config = SchedulerConfig::under(root);

    let done = DoneLog::new(&config.done_log).read_ids()?;
    println!("done: {}", done.len());
    for id in &done {
        println!("  {id}");
    }

    let store = SnapshotStore::new(&config.queued_dir, &config.running_dir);
    println!("queued snapshots: {}", store.load_queued()?.len());
    println!("running snapshots: {}", store.load_running()?.len());

    let marker = ResumeMarker::new(&config.scheduler_data);
    println!("resume marker: {}", if marker.exists() { "present" } else { "absent" });
    Ok(())
}

fn demo_registry() -> JobRegistry {
    JobRegistry::new()
        .with::<MakeDirsJob>(MAKE_DIRS_KIND)
        .with::<TouchFilesJob>(TOUCH_FILES_KIND)
        .with::<FetchPagesJob>(FETCH_PAGES_KIND)
}

fn schedule_demo_pipeline(scheduler: &mut Scheduler<SystemClock>, root: &Path, clock: &SystemClock) {
    let dirs: Vec<PathBuf> = (1..=5).map(|i| root.join(format!("demo/dir{i}"))).collect();
    let urls = vec![
        "https://example.com/".to_string(),
        "https://www.rust-lang.org/".to_string(),
        "https://httpbin.org/html".to_string(),
    ];

    scheduler.schedule(MakeDirsJob::new(
        JobState::with_id("demo-dirs", clock).max_tries(3),
        dirs.clone(),
    ));
    scheduler.schedule(TouchFilesJob::new(
        JobState::with_id("demo-files", clock)
            .max_tries(3)
            .dependencies(vec!["demo-dirs".into()]),
        dirs,
    ));
    scheduler.schedule(FetchPagesJob::new(
        JobState::with_id("demo-pages", clock)
            .max_tries(3)
            .dependencies(vec!["demo-files".into()]),
        urls,
        root.join("demo"),
    ));
}
