// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency gating: a job is admitted only once every dependency
//! identifier has reached the done-log.

use crate::prelude::*;

#[tokio::test]
async fn dependent_scheduled_first_still_completes_second() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    // B arrives first but depends on A: it must be requeued until A is done.
    scheduler.schedule(
        ScriptedJob::new(2, &clock)
            .with_state(JobState::with_id("b", &clock).dependencies(vec!["a".into()])),
    );
    scheduler.schedule(ScriptedJob::new(2, &clock).with_state(JobState::with_id("a", &clock)));

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);
    assert_eq!(done_ids(root.path()), vec!["a", "b"]);
}

#[tokio::test]
async fn chain_of_three_completes_in_dependency_order() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    scheduler.schedule(
        ScriptedJob::new(1, &clock)
            .with_state(JobState::with_id("pages", &clock).dependencies(vec!["files".into()])),
    );
    scheduler.schedule(
        ScriptedJob::new(1, &clock)
            .with_state(JobState::with_id("files", &clock).dependencies(vec!["dirs".into()])),
    );
    scheduler.schedule(ScriptedJob::new(1, &clock).with_state(JobState::with_id("dirs", &clock)));

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);
    assert_eq!(done_ids(root.path()), vec!["dirs", "files", "pages"]);
}

#[tokio::test]
async fn diamond_dependencies_respect_every_edge() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    scheduler.schedule(ScriptedJob::new(1, &clock).with_state(
        JobState::with_id("sink", &clock).dependencies(vec!["left".into(), "right".into()]),
    ));
    scheduler.schedule(
        ScriptedJob::new(1, &clock)
            .with_state(JobState::with_id("left", &clock).dependencies(vec!["source".into()])),
    );
    scheduler.schedule(
        ScriptedJob::new(3, &clock)
            .with_state(JobState::with_id("right", &clock).dependencies(vec!["source".into()])),
    );
    scheduler.schedule(ScriptedJob::new(1, &clock).with_state(JobState::with_id("source", &clock)));

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);

    let done = done_ids(root.path());
    let pos = |name: &str| done.iter().position(|id| id == name).unwrap();
    assert!(pos("source") < pos("left"));
    assert!(pos("source") < pos("right"));
    assert!(pos("left") < pos("sink"));
    assert!(pos("right") < pos("sink"));
}
