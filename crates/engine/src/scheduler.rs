// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduler loop: admission, execution, checkpoint, resume, cleanup.

use crate::config::SchedulerConfig;
use crate::driver::StageDriver;
use crate::error::{SchedulerError, StopCause};
use crate::gate::{Admission, AdmissionGate};
use crate::registry::JobRegistry;
use crate::signal;
use stagehand_core::{Clock, Job, JobSnapshot, StageOutcome, SystemClock};
use stagehand_storage::{
    DoneLog, ResumeMarker, SchedulerData, SnapshotStore, StopFlag, StorageError,
};
use std::collections::VecDeque;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// How a call to [`Scheduler::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every job completed or was dropped; transient control files removed.
    Drained,
    /// A stop event arrived; unfinished jobs were checkpointed to disk.
    Stopped(StopCause),
}

/// Why the drive loop unwound before drain.
enum DriveEnd {
    Stop(StopCause),
    Error(SchedulerError),
}

impl From<StorageError> for DriveEnd {
    fn from(e: StorageError) -> Self {
        DriveEnd::Error(e.into())
    }
}

/// Persistent cooperative job scheduler.
///
/// There is exactly one driver of progress: admitted jobs advance one
/// stage per tick, in insertion order, on the caller's task. A stage runs
/// to completion; blocking I/O inside one blocks the whole scheduler,
/// which is the intended trade for observability and simple persistence.
/// `pool_size` bounds admission per tick, not parallelism.
pub struct Scheduler<C: Clock = SystemClock> {
    config: SchedulerConfig,
    clock: C,
    registry: JobRegistry,
    gate: AdmissionGate<C>,
    pending: VecDeque<Box<dyn Job>>,
    running: Vec<StageDriver>,
    done_log: DoneLog,
    store: SnapshotStore,
    stop_flag: StopFlag,
    marker: ResumeMarker,
    cancel: CancellationToken,
}

impl<C: Clock> Scheduler<C> {
    /// Construct a scheduler.
    ///
    /// If the previous process stopped gracefully (the scheduler data
    /// file is present) the ready queue and running set are rebuilt from
    /// the snapshot directories and the done-log is kept. Otherwise this
    /// is a fresh run and the done-log is truncated.
    pub fn new(
        config: SchedulerConfig,
        registry: JobRegistry,
        clock: C,
    ) -> Result<Self, SchedulerError> {
        let done_log = DoneLog::new(&config.done_log);
        let store = SnapshotStore::new(&config.queued_dir, &config.running_dir);
        let stop_flag = StopFlag::new(&config.stop_flag);
        let marker = ResumeMarker::new(&config.scheduler_data);
        store.init_dirs();

        let mut scheduler = Self {
            gate: AdmissionGate::new(done_log.clone(), clock.clone()),
            clock,
            registry,
            config,
            pending: VecDeque::new(),
            running: Vec::new(),
            done_log,
            store,
            stop_flag,
            marker,
            cancel: CancellationToken::new(),
        };

        if scheduler.marker.exists() {
            scheduler.resume()?;
        } else {
            scheduler.done_log.truncate()?;
        }
        Ok(scheduler)
    }

    /// Token external code can cancel for a timely in-process stop; the
    /// on-disk flag remains the out-of-band kill switch.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Append a job to the ready queue.
    pub fn schedule<J: Job + 'static>(&mut self, job: J) {
        self.schedule_boxed(Box::new(job));
    }

    pub fn schedule_boxed(&mut self, job: Box<dyn Job>) {
        debug!(job_id = %job.state().id, kind = job.kind(), "scheduled job");
        self.pending.push_back(job);
    }

    /// Jobs awaiting admission.
    pub fn queued_len(&self) -> usize {
        self.pending.len()
    }

    /// Jobs currently owning a stage driver.
    pub fn running_len(&self) -> usize {
        self.running.len()
    }

    /// Drive the loop until drain or stop.
    ///
    /// On drain the transient control files are removed. On a stop event
    /// (flag, interrupt or cancellation) the unfinished jobs are
    /// checkpointed and the call returns normally.
    pub async fn run(&mut self) -> Result<RunOutcome, SchedulerError> {
        match self.drive().await {
            Ok(()) => {
                info!("all jobs finished, cleaning up transient files");
                self.cleanup()?;
                Ok(RunOutcome::Drained)
            }
            Err(DriveEnd::Stop(cause)) => {
                info!(%cause, "stop event received, checkpointing");
                self.stop(true)?;
                Ok(RunOutcome::Stopped(cause))
            }
            Err(DriveEnd::Error(e)) => Err(e),
        }
    }

    /// Checkpoint, then immediately drive the loop again.
    pub async fn restart(&mut self) -> Result<RunOutcome, SchedulerError> {
        self.stop(true)?;
        self.run().await
    }

    /// Checkpoint every unfinished job and write the resume marker.
    ///
    /// The snapshot directories are cleared first so they end up holding
    /// exactly the unfinished set, even across repeated stop/resume
    /// cycles. With `save_data: false` only the marker is written.
    pub fn stop(&mut self, save_data: bool) -> Result<(), SchedulerError> {
        self.store.clear()?;

        if save_data {
            for job in &self.pending {
                let snapshot = JobSnapshot::capture(job.as_ref()).map_err(StorageError::from)?;
                self.store.save_queued(&job.state().id, &snapshot)?;
            }
            info!(count = self.pending.len(), "saved ready-queue snapshots");

            for driver in &self.running {
                let job = driver.job();
                let snapshot = JobSnapshot::capture(job).map_err(StorageError::from)?;
                self.store.save_running(&job.state().id, &snapshot)?;
            }
            info!(count = self.running.len(), "saved running-set snapshots");
        } else {
            info!("stopping without saving job state");
        }

        self.marker.write(&SchedulerData::new(
            save_data,
            self.pending.len(),
            self.running.len(),
        ))?;
        Ok(())
    }

    async fn drive(&mut self) -> Result<(), DriveEnd> {
        let interrupt = signal::interrupt();
        tokio::pin!(interrupt);

        while !(self.pending.is_empty() && self.running.is_empty()) {
            self.admit()?;
            self.execute()?;

            // Quiescent sleep, raced against both stop channels. Either
            // one takes the same checkpoint path as the on-disk flag.
            tokio::select! {
                _ = tokio::time::sleep(self.config.tick) => {}
                _ = &mut interrupt => return Err(DriveEnd::Stop(StopCause::Interrupt)),
                _ = self.cancel.cancelled() => return Err(DriveEnd::Stop(StopCause::Cancelled)),
            }
        }
        Ok(())
    }

    /// Admission phase: examine up to `pool_size` jobs from the head of
    /// the ready queue; denied jobs requeue at the tail.
    fn admit(&mut self) -> Result<(), DriveEnd> {
        let budget = self.config.pool_size.min(self.pending.len());
        for _ in 0..budget {
            let Some(job) = self.pending.pop_front() else { break };

            let verdict = match self.gate.check(job.state()) {
                Ok(verdict) => verdict,
                Err(e) => {
                    self.pending.push_front(job);
                    return Err(e.into());
                }
            };

            match verdict {
                Admission::Admit => {
                    info!(
                        job_id = %job.state().id,
                        kind = job.kind(),
                        tries = job.state().tries,
                        "admitted job"
                    );
                    self.running.push(StageDriver::new(job));
                }
                denial => {
                    debug!(job_id = %job.state().id, reason = %denial, "admission denied, requeued at tail");
                    self.pending.push_back(job);
                }
            }
        }
        Ok(())
    }

    /// Execution phase: advance every driver in the snapshot of the
    /// running set taken at phase start, classifying each outcome.
    fn execute(&mut self) -> Result<(), DriveEnd> {
        let batch = std::mem::take(&mut self.running);
        let mut batch = batch.into_iter();

        while let Some(mut driver) = batch.next() {
            // Re-read the flag before every step; external tools may flip
            // it at any moment.
            match self.stop_flag.is_running() {
                Ok(true) => {}
                Ok(false) => {
                    self.running.push(driver);
                    self.running.extend(batch);
                    return Err(DriveEnd::Stop(StopCause::Flag));
                }
                Err(e) => {
                    self.running.push(driver);
                    self.running.extend(batch);
                    return Err(e.into());
                }
            }

            match driver.advance() {
                Ok(StageOutcome::Progress) => {
                    if driver.job().state().is_expired(self.clock.epoch_ms()) {
                        warn!(
                            job_id = %driver.job().state().id,
                            "working-time budget exhausted, dropping job"
                        );
                        // Dropped without a done-log entry.
                    } else {
                        self.running.push(driver);
                    }
                }
                Ok(StageOutcome::Exhausted) => {
                    let id = driver.job().state().id.clone();
                    // Append before the job leaves the running set; the
                    // log is the completion oracle for dependants.
                    if let Err(e) = self.done_log.append(&id) {
                        self.running.push(driver);
                        self.running.extend(batch);
                        return Err(e.into());
                    }
                    info!(job_id = %id, steps = driver.steps(), "job completed");
                }
                Ok(StageOutcome::Retry) => {
                    let has_budget = driver.job().state().has_retry_budget();
                    if has_budget {
                        let driver = driver.remake_for_retry();
                        let state = driver.job().state();
                        debug!(
                            job_id = %state.id,
                            tries = state.tries,
                            max_tries = state.max_tries,
                            "retry signalled, re-materialised from stage zero"
                        );
                        self.running.push(driver);
                    } else {
                        let state = driver.job().state();
                        warn!(
                            job_id = %state.id,
                            tries = state.tries,
                            "retry budget exhausted, abandoning job"
                        );
                    }
                }
                Err(error) => {
                    error!(
                        job_id = %driver.job().state().id,
                        kind = driver.job().kind(),
                        %error,
                        "unexpected job error, dropping job"
                    );
                }
            }
        }
        Ok(())
    }

    /// Rebuild both queues from the snapshot directories.
    ///
    /// Mid-stage progress is lost, but completed stage markers are
    /// intact, so each re-materialised driver resumes at stage
    /// granularity. The done-log is deliberately left alone.
    fn resume(&mut self) -> Result<(), SchedulerError> {
        info!(path = %self.marker.path().display(), "resume marker present, restoring persisted jobs");

        for snapshot in self.store.load_queued()? {
            self.pending.push_back(self.registry.decode(snapshot)?);
        }
        for snapshot in self.store.load_running()? {
            self.running.push(StageDriver::new(self.registry.decode(snapshot)?));
        }

        info!(
            queued = self.pending.len(),
            running = self.running.len(),
            "restored scheduler state"
        );
        Ok(())
    }

    /// Remove snapshot files and transient control files after drain.
    fn cleanup(&mut self) -> Result<(), SchedulerError> {
        self.store.clear()?;
        self.stop_flag.remove()?;
        self.marker.remove()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
