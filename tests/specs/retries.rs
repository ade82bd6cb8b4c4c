// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry budgets and deadlines.

use crate::prelude::*;

#[tokio::test]
async fn one_retry_then_success() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    scheduler.schedule(
        ScriptedJob::new(3, &clock)
            .with_state(JobState::with_id("flaky", &clock).max_tries(3))
            .retry_until_try(1)
            .fail_stage(1),
    );

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);
    assert_eq!(done_ids(root.path()), vec!["flaky"]);
}

#[tokio::test]
async fn ever_retrying_job_is_abandoned_without_completion() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    scheduler.schedule(
        ScriptedJob::new(2, &clock)
            .with_state(JobState::with_id("doomed", &clock).max_tries(3))
            .retry_always(),
    );

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);
    assert!(done_ids(root.path()).is_empty());
    assert!(control_files_absent(root.path()));
}

#[tokio::test]
async fn abandonment_does_not_disturb_neighbours() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    scheduler.schedule(
        ScriptedJob::new(2, &clock)
            .with_state(JobState::with_id("doomed", &clock).max_tries(1))
            .retry_always(),
    );
    scheduler
        .schedule(ScriptedJob::new(4, &clock).with_state(JobState::with_id("steady", &clock)));

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);
    assert_eq!(done_ids(root.path()), vec!["steady"]);
}

#[tokio::test]
async fn expired_deadline_never_reaches_the_done_log() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();

    // The budget is counted from start_at, which is already long past.
    let state = JobState::with_id("late", &clock)
        .start_at_ms(clock.epoch_ms() - 60_000)
        .max_working_time_ms(500u64);
    scheduler.schedule(ScriptedJob::new(5, &clock).with_state(state));

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);
    assert!(done_ids(root.path()).is_empty());
}
