//! The supervisor: periodic reconciliation of the engine state into the
//! durable records.
//!
//! One [`tick`](Supervisor::tick):
//!
//! 1. Takes a point-in-time copy of the registry entries. No lock is held
//!    while the engine and the store are used.
//! 2. Reads the cached engine status of every entry. An entry whose handle the
//!    engine no longer knows is dropped from the registry. Its durable record
//!    is left alone.
//! 3. [Derives](derive) the normalized snapshot.
//! 4. Persists the snapshot, one update per transfer. The first tick that
//!    derives `completed` also sets `completed_at`.
//! 5. Publishes all the snapshots as one [`Update`].
//!
//! A failure of one transfer is logged and the tick goes on with the next
//! one. A store that can not be reached at all aborts the tick, and the job
//! that runs the supervisor backs off before trying again.
//!
//! # Status derivation
//!
//! First match wins:
//!
//! Engine status | Transfer status
//! ---|---
//! fully available | `completed`
//! paused | `paused`
//! checking files | `checking`
//! downloading metadata | `downloading_metadata`
//! queued for checking | `queued`
//! error string not empty | `error`
//! anything else | `downloading`
//!
//! A transfer that is complete and reports an error at the same time is
//! `completed`. The `error` status is not sticky: it is derived again on
//! every tick.
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use torrust_transfer_manager_clock::clock::Time;
use torrust_transfer_manager_primitives::eta::Eta;
use torrust_transfer_manager_primitives::{TransferSnapshot, TransferStatus};
use torrust_transfer_manager_transfer_registry::entry::Entry as _;
use torrust_transfer_manager_transfer_registry::repository::Repository as _;
use torrust_transfer_manager_transfer_registry::Registry;

use super::broadcaster::{Broadcaster, Delivery, Update};
use super::databases::{self, Database};
use super::engine::adapter::Adapter;
use super::engine::{State, Status};
use super::Manager;
use crate::CurrentClock;

pub const SUPERVISOR_LOG_TARGET: &str = "SUPERVISOR";

/// What one tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Entries whose engine status was read.
    pub polled: usize,
    /// Entries dropped because the engine no longer knows their handle.
    pub pruned: usize,
    /// Entries that failed for any other reason.
    pub failed: usize,
    /// Transfers that completed in this tick.
    pub completed: usize,
    /// Snapshots in the published update.
    pub published: usize,
    pub delivery: Delivery,
}

#[derive(Clone)]
pub struct Supervisor {
    database: Arc<Box<dyn Database>>,
    registry: Arc<Registry>,
    adapter: Arc<Adapter>,
    broadcaster: Arc<Broadcaster>,
}

impl Supervisor {
    #[must_use]
    pub fn new(manager: &Manager) -> Self {
        Self {
            database: manager.database.clone(),
            registry: manager.registry.clone(),
            adapter: manager.adapter.clone(),
            broadcaster: manager.broadcaster.clone(),
        }
    }

    /// It runs one reconciliation pass.
    ///
    /// # Errors
    ///
    /// Will return the database error if the store is unavailable. Nothing
    /// is published in that case.
    pub fn tick(&self) -> Result<TickReport, databases::error::Error> {
        let started = Instant::now();
        let mut report = TickReport::default();
        let mut snapshots = BTreeMap::new();

        for (id, entry) in self.registry.list() {
            let handle = entry.handle();

            let status = match self.adapter.snapshot(handle) {
                Ok(status) => status,
                Err(err) if err.is_invalid_handle() => {
                    self.registry.unregister(&id);
                    report.pruned += 1;
                    tracing::warn!(target: SUPERVISOR_LOG_TARGET, %id, %handle, "Supervisor::tick (pruned invalid handle)");
                    continue;
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::error!(target: SUPERVISOR_LOG_TARGET, %id, %handle, %err, "Supervisor::tick (status read failed)");
                    continue;
                }
            };

            report.polled += 1;

            let previous = entry.last_snapshot();
            let snapshot = derive(&status, previous);

            if let Some(error) = &snapshot.error {
                if previous.and_then(|p| p.error.as_ref()) != Some(error) {
                    tracing::error!(target: SUPERVISOR_LOG_TARGET, %id, error, "Supervisor::tick (engine error)");
                }
            }

            let completes_now =
                snapshot.status.is_completed() && !previous.is_some_and(|p| p.status.is_completed());

            let now = CurrentClock::now();

            // The store keeps the first completion time it receives, so it is
            // offered on every completed tick until one write succeeds.
            let completed_at = snapshot.status.is_completed().then_some(now);

            match self.database.save_snapshot(&id, &snapshot, now, completed_at) {
                Ok(true) => {
                    if completes_now {
                        report.completed += 1;
                        tracing::info!(target: SUPERVISOR_LOG_TARGET, %id, "Supervisor::tick (completed)");
                    }
                }
                Ok(false) => {
                    // Deleted while it was being attached: nothing owns the handle any more.
                    if self.registry.unregister(&id).is_some() {
                        self.adapter.remove(handle);
                    }
                    report.pruned += 1;
                    tracing::warn!(target: SUPERVISOR_LOG_TARGET, %id, %handle, "Supervisor::tick (record is gone, detached)");
                    continue;
                }
                Err(err) if err.is_unavailable() => return Err(err),
                Err(err) => {
                    report.failed += 1;
                    tracing::error!(target: SUPERVISOR_LOG_TARGET, %id, %err, "Supervisor::tick (persist failed)");
                }
            }

            // An entry deleted while this tick ran is not published.
            if self.registry.record(&id, handle, snapshot.clone()) {
                snapshots.insert(id, snapshot);
            }
        }

        report.published = snapshots.len();
        report.delivery = self.broadcaster.publish(Update::TransferUpdate { snapshots });

        tracing::debug!(
            target: SUPERVISOR_LOG_TARGET,
            polled = report.polled,
            pruned = report.pruned,
            failed = report.failed,
            delivered = report.delivery.delivered,
            elapsed_ms = started.elapsed().as_millis(),
            "Supervisor::tick"
        );

        Ok(report)
    }
}

/// It derives the normalized snapshot of one transfer from its engine status.
///
/// Progress never goes back: it is the highest of the engine progress and the
/// `previous` derived progress.
#[must_use]
pub fn derive(status: &Status, previous: Option<&TransferSnapshot>) -> TransferSnapshot {
    let progress = if status.progress.is_finite() {
        (status.progress * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let progress = previous.map_or(progress, |previous| progress.max(previous.progress));

    TransferSnapshot {
        progress,
        download_rate: status.download_rate,
        upload_rate: status.upload_rate,
        status: derive_status(status),
        eta: Eta::estimate(
            status.total_wanted.saturating_sub(status.total_download),
            status.download_rate,
        ),
        num_peers: status.num_peers,
        num_seeds: status.num_seeds,
        total_download: status.total_download,
        total_upload: status.total_upload,
        error: (!status.error.is_empty()).then(|| status.error.clone()),
    }
}

/// First match wins. See the [module documentation](self).
#[must_use]
pub fn derive_status(status: &Status) -> TransferStatus {
    if status.is_seeding {
        return TransferStatus::Completed;
    }

    if status.paused {
        return TransferStatus::Paused;
    }

    match status.state {
        State::CheckingFiles => TransferStatus::Checking,
        State::DownloadingMetadata => TransferStatus::DownloadingMetadata,
        State::QueuedForChecking => TransferStatus::Queued,
        State::Downloading | State::Finished | State::Seeding if !status.error.is_empty() => TransferStatus::Error,
        State::Downloading | State::Finished | State::Seeding => TransferStatus::Downloading,
    }
}
