// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stop and resume: an external flag flip checkpoints every unfinished
//! job, and a fresh scheduler on the same paths finishes the work.

use crate::prelude::*;

fn long_job(name: &str, clock: &FakeClock) -> ScriptedJob {
    ScriptedJob::new(400, clock).with_state(JobState::with_id(name, clock))
}

#[tokio::test]
async fn flag_flip_checkpoints_and_resume_completes() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();

    {
        let mut scheduler =
            Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();
        scheduler.schedule(long_job("one", &clock));
        scheduler.schedule(long_job("two", &clock));

        let flag = stop_flag(root.path());
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            flag.request_stop().unwrap();
        });

        assert_eq!(
            scheduler.run().await.unwrap(),
            RunOutcome::Stopped(StopCause::Flag)
        );
    }

    // The union of the snapshot directories is exactly the unfinished set.
    assert_eq!(snapshot_union(root.path()), vec!["one", "two"]);
    assert!(resume_marker_present(root.path()));

    // An operator clears the flag before rerunning.
    stop_flag(root.path()).remove().unwrap();

    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();
    assert_eq!(scheduler.queued_len() + scheduler.running_len(), 2);

    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);

    let mut done = done_ids(root.path());
    done.sort();
    assert_eq!(done, vec!["one", "two"]);
    assert!(control_files_absent(root.path()));
}

#[tokio::test]
async fn round_trip_loses_no_job() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();

    let names = ["a", "b", "c", "d", "e"];
    {
        let mut scheduler =
            Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();
        for name in names {
            scheduler.schedule(long_job(name, &clock));
        }

        let flag = stop_flag(root.path());
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(25)).await;
            flag.request_stop().unwrap();
        });
        assert_eq!(
            scheduler.run().await.unwrap(),
            RunOutcome::Stopped(StopCause::Flag)
        );
    }

    stop_flag(root.path()).remove().unwrap();

    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();
    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);

    // Every job either completed or was dropped by policy; none of these
    // can be dropped, so all five must be in the done-log.
    let mut done = done_ids(root.path());
    done.sort();
    assert_eq!(done, names.iter().map(|s| s.to_string()).collect::<Vec<_>>());
}

#[tokio::test]
async fn completed_work_is_not_rerun_after_resume() {
    let root = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();

    {
        let mut scheduler =
            Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();
        scheduler.schedule(ScriptedJob::new(3, &clock).with_state(JobState::with_id("done-before", &clock)));
        scheduler.schedule(long_job("cut-short", &clock));

        let flag = stop_flag(root.path());
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(40)).await;
            flag.request_stop().unwrap();
        });
        assert_eq!(
            scheduler.run().await.unwrap(),
            RunOutcome::Stopped(StopCause::Flag)
        );
    }

    // The finished job is in the done-log, not in any snapshot directory.
    assert_eq!(done_ids(root.path()), vec!["done-before"]);
    assert_eq!(snapshot_union(root.path()), vec!["cut-short"]);

    stop_flag(root.path()).remove().unwrap();

    let mut scheduler =
        Scheduler::new(fast_config(root.path()), scripted_registry(), clock.clone()).unwrap();
    assert_eq!(scheduler.run().await.unwrap(), RunOutcome::Drained);

    // Resume must not re-run (or re-record) the already-completed job.
    assert_eq!(done_ids(root.path()), vec!["done-before", "cut-short"]);
}
