// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job snapshot files for stop/resume.
//!
//! Each unfinished job is serialised into exactly one file named by its
//! identifier, placed in the `queued/` or `running/` directory according
//! to its role at checkpoint time.

use crate::StorageError;
use stagehand_core::{JobId, JobSnapshot};
use std::path::{Path, PathBuf};

/// Writes and reads `<identifier>.json` envelopes in the two role
/// directories.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    queued_dir: PathBuf,
    running_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(queued_dir: impl Into<PathBuf>, running_dir: impl Into<PathBuf>) -> Self {
        Self { queued_dir: queued_dir.into(), running_dir: running_dir.into() }
    }

    pub fn queued_dir(&self) -> &Path {
        &self.queued_dir
    }

    pub fn running_dir(&self) -> &Path {
        &self.running_dir
    }

    /// Create both snapshot directories.
    ///
    /// Failure (e.g. permission denied) is logged and execution continues;
    /// a later snapshot write will fail visibly.
    pub fn init_dirs(&self) {
        for dir in [&self.queued_dir, &self.running_dir] {
            if let Err(error) = std::fs::create_dir_all(dir) {
                tracing::error!(dir = %dir.display(), %error, "failed to create snapshot directory");
            }
        }
    }

    pub fn save_queued(&self, id: &JobId, snapshot: &JobSnapshot) -> Result<(), StorageError> {
        self.save(&self.queued_dir, id, snapshot)
    }

    pub fn save_running(&self, id: &JobId, snapshot: &JobSnapshot) -> Result<(), StorageError> {
        self.save(&self.running_dir, id, snapshot)
    }

    pub fn load_queued(&self) -> Result<Vec<JobSnapshot>, StorageError> {
        self.load(&self.queued_dir)
    }

    pub fn load_running(&self) -> Result<Vec<JobSnapshot>, StorageError> {
        self.load(&self.running_dir)
    }

    /// Delete every snapshot file in both directories.
    pub fn clear(&self) -> Result<(), StorageError> {
        for dir in [&self.queued_dir, &self.running_dir] {
            clear_dir(dir)?;
        }
        Ok(())
    }

    fn save(&self, dir: &Path, id: &JobId, snapshot: &JobSnapshot) -> Result<(), StorageError> {
        let path = dir.join(format!("{id}.json"));
        std::fs::write(&path, serde_json::to_vec(snapshot)?)?;
        tracing::info!(job_id = %id, path = %path.display(), "saved job snapshot");
        Ok(())
    }

    fn load(&self, dir: &Path) -> Result<Vec<JobSnapshot>, StorageError> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        // Sorted for a deterministic restore order.
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut snapshots = Vec::with_capacity(paths.len());
        for path in paths {
            let snapshot: JobSnapshot = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
            snapshots.push(snapshot);
        }
        tracing::info!(count = snapshots.len(), dir = %dir.display(), "loaded job snapshots");
        Ok(snapshots)
    }
}

fn clear_dir(dir: &Path) -> Result<(), StorageError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    for entry in entries.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if path.is_file() {
            std::fs::remove_file(&path)?;
        }
    }
    tracing::debug!(dir = %dir.display(), "cleared snapshot directory");
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
