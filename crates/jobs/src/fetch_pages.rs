// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Web-page archiving demo job.

use serde::{Deserialize, Serialize};
use stagehand_core::{Clock, Job, JobState, StageError, StageOutcome, SystemClock};
use std::path::PathBuf;

/// Registry tag for [`FetchPagesJob`].
pub const FETCH_PAGES_KIND: &str = "fetch-pages";

/// Downloads one URL per stage, saving the body to
/// `<host>_<epoch-ms>.txt` in the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchPagesJob {
    state: JobState,
    /// URLs still to fetch; drained one per stage.
    remaining: Vec<String>,
    /// Pristine URL list, restored by `reset`.
    urls: Vec<String>,
    out_dir: PathBuf,
}

impl FetchPagesJob {
    pub fn new(state: JobState, urls: Vec<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self { state, remaining: urls.clone(), urls, out_dir: out_dir.into() }
    }
}

impl Job for FetchPagesJob {
    fn state(&self) -> &JobState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut JobState {
        &mut self.state
    }

    fn kind(&self) -> &str {
        FETCH_PAGES_KIND
    }

    fn advance(&mut self) -> Result<StageOutcome, StageError> {
        let Some(url) = self.remaining.pop() else {
            return Ok(StageOutcome::Exhausted);
        };

        let parsed = reqwest::Url::parse(&url)
            .map_err(|e| StageError::other(format!("invalid url {url:?}: {e}")))?;
        let host = parsed.host_str().unwrap_or("page").to_string();

        let body = fetch(parsed).map_err(|e| StageError::other(format!("fetch {url} failed: {e}")))?;

        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("{host}_{}.txt", SystemClock.epoch_ms()));
        std::fs::write(&path, &body)?;
        tracing::info!(job_id = %self.state.id, url = %url, file = %path.display(), "saved web page");
        Ok(StageOutcome::Progress)
    }

    fn reset(&mut self) {
        self.remaining = self.urls.clone();
    }

    fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Blocking download of one URL.
///
/// A stage runs to completion by design, so the whole scheduler waits on
/// the transfer. When the caller sits on a tokio runtime the transfer is
/// routed through `block_in_place` so the blocking client may be used
/// there at all.
fn fetch(url: reqwest::Url) -> Result<Vec<u8>, reqwest::Error> {
    let get = move || -> Result<Vec<u8>, reqwest::Error> {
        Ok(reqwest::blocking::get(url)?.error_for_status()?.bytes()?.to_vec())
    };
    match tokio::runtime::Handle::try_current() {
        Ok(_) => tokio::task::block_in_place(get),
        Err(_) => get(),
    }
}

#[cfg(test)]
#[path = "fetch_pages_tests.rs"]
mod tests;
