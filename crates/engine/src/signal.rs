// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt wiring for the scheduler loop.

/// Resolves when the process receives an interrupt (ctrl-c).
///
/// If the handler cannot be installed the failure is logged and the
/// future never resolves; the on-disk stop flag remains available as the
/// out-of-band kill switch.
pub(crate) async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to install interrupt handler");
        std::future::pending::<()>().await;
    }
}
