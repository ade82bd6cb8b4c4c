// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Happy path: one three-stage job, no dependencies.

use crate::prelude::*;

#[tokio::test]
async fn single_job_completes_and_cleans_up() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    scheduler.schedule(ScriptedJob::new(3, &clock).with_state(JobState::with_id("only", &clock)));

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);

    assert_eq!(done_ids(root.path()), vec!["only"]);
    assert!(control_files_absent(root.path()));
}

#[tokio::test]
async fn completion_is_recorded_at_most_once() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    for name in ["a", "b", "c"] {
        scheduler
            .schedule(ScriptedJob::new(2, &clock).with_state(JobState::with_id(name, &clock)));
    }
    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);

    let mut done = done_ids(root.path());
    done.sort();
    let len = done.len();
    done.dedup();
    assert_eq!(done.len(), len, "an identifier appeared twice in the done-log");
}

#[tokio::test]
async fn open_gates_admit_in_insertion_order() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    for name in ["first", "second"] {
        scheduler
            .schedule(ScriptedJob::new(2, &clock).with_state(JobState::with_id(name, &clock)));
    }
    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);

    assert_eq!(done_ids(root.path()), vec!["first", "second"]);
}
