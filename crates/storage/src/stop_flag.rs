// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk stop flag polled by the scheduler loop.

use crate::{remove_if_present, StorageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Condition {
    is_running: bool,
}

/// Small JSON file holding `{"is_running": bool}`.
///
/// Absent on first access the scheduler creates it with `true`; external
/// tools rewrite it with `false` to request a graceful stop. The loop
/// re-reads it before every running-set step, so the flag doubles as an
/// out-of-band kill switch for long-running deployments.
#[derive(Debug, Clone)]
pub struct StopFlag {
    path: PathBuf,
}

impl StopFlag {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the flag fresh from disk, creating it on first access.
    pub fn is_running(&self) -> Result<bool, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let condition: Condition = serde_json::from_str(&text)?;
                Ok(condition.is_running)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.write(true)?;
                tracing::debug!(path = %self.path.display(), "created stop flag");
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the flag to request a graceful stop.
    pub fn request_stop(&self) -> Result<(), StorageError> {
        self.write(false)?;
        tracing::info!(path = %self.path.display(), "stop requested via flag");
        Ok(())
    }

    pub fn remove(&self) -> Result<(), StorageError> {
        remove_if_present(&self.path)
    }

    fn write(&self, is_running: bool) -> Result<(), StorageError> {
        std::fs::write(&self.path, serde_json::to_string(&Condition { is_running })?)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "stop_flag_tests.rs"]
mod tests;
