// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kind-keyed decoders for re-materialising persisted jobs.

use stagehand_core::{Job, JobSnapshot};
use std::collections::HashMap;
use thiserror::Error;

type DecodeFn = fn(serde_json::Value) -> Result<Box<dyn Job>, serde_json::Error>;

/// Errors from snapshot decoding.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no decoder registered for job kind {0:?}")]
    UnknownKind(String),
    #[error("failed to decode job snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Maps a job's `kind` tag to a decoder so a resume pass can rebuild
/// `Box<dyn Job>` values from snapshot envelopes.
///
/// Hosts register every kind they schedule. An unregistered kind in a
/// snapshot is an error at resume time, not a silently dropped job.
#[derive(Default)]
pub struct JobRegistry {
    decoders: HashMap<String, DecodeFn>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `J` under `kind`. Re-registering a kind replaces the decoder.
    pub fn register<J>(&mut self, kind: &str)
    where
        J: Job + serde::de::DeserializeOwned + 'static,
    {
        self.decoders.insert(kind.to_string(), decode::<J>);
    }

    /// Chainable form of [`register`](Self::register).
    pub fn with<J>(mut self, kind: &str) -> Self
    where
        J: Job + serde::de::DeserializeOwned + 'static,
    {
        self.register::<J>(kind);
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.decoders.contains_key(kind)
    }

    /// Rebuild a job from its snapshot envelope.
    pub fn decode(&self, snapshot: JobSnapshot) -> Result<Box<dyn Job>, RegistryError> {
        let decoder = self
            .decoders
            .get(&snapshot.kind)
            .ok_or_else(|| RegistryError::UnknownKind(snapshot.kind.clone()))?;
        Ok(decoder(snapshot.job)?)
    }
}

impl std::fmt::Debug for JobRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("JobRegistry").field("kinds", &kinds).finish()
    }
}

fn decode<J>(value: serde_json::Value) -> Result<Box<dyn Job>, serde_json::Error>
where
    J: Job + serde::de::DeserializeOwned + 'static,
{
    Ok(Box::new(serde_json::from_value::<J>(value)?))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
