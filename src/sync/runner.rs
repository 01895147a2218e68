// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Single-run and interval-driven execution of the reconciler.

use crate::clients::{DestinationStore, SourceVault};
use crate::sync::reconciler::{Reconciler, SyncReport};
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

pub struct SyncRunner<V, S> {
    reconciler: Reconciler<V, S>,
}

impl<V: SourceVault, S: DestinationStore> SyncRunner<V, S> {
    pub fn new(reconciler: Reconciler<V, S>) -> Self {
        Self { reconciler }
    }

    pub async fn run_once(&self) -> SyncReport {
        info!("Starting one-off sync...");
        let report = self.reconciler.run().await;
        log_outcome("Synchronization", &report);
        report
    }

    /// Sync immediately and then on every tick until `shutdown` resolves.
    ///
    /// Runs never overlap: a pass that outlasts the interval delays the next
    /// tick. Shutdown is only observed between passes and wins over a due
    /// tick. Returns the number of completed passes.
    pub async fn run_until<F>(&self, period: Duration, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        info!("Starting daemon mode with sync interval: {:?}", period);

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut cycles = 0;
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Received shutdown signal, stopping daemon mode");
                    break;
                }
                _ = ticker.tick() => {
                    let label = if cycles == 0 { "Initial sync" } else { "Periodic sync" };
                    let report = self.reconciler.run().await;
                    log_outcome(label, &report);
                    cycles += 1;
                }
            }
        }

        cycles
    }
}

fn log_outcome(label: &str, report: &SyncReport) {
    if report.is_success() {
        info!("{} completed successfully", label);
    } else {
        error!("{} completed with {} errors", label, report.error_count());
    }
}
