//! The durable transfer record.
use std::time::Duration;

use derive_more::Constructor;
use torrust_transfer_manager_primitives::eta::Eta;
use torrust_transfer_manager_primitives::{DurationSinceUnixEpoch, SpeedLimits, TransferId, TransferStatus};

/// One transfer as it is stored in the database.
///
/// `name`, `size` and `created_at` never change after the record is created.
/// The live fields (`progress`, rates, `status`, `eta`, peer counts and
/// `error`) are overwritten by every supervisor tick. `completed_at` is
/// written once, on the first tick that derives `completed`.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferRecord {
    pub id: TransferId,
    pub name: String,
    /// Total payload size in bytes.
    pub size: u64,
    /// Percentage, from 0 to 100.
    pub progress: f64,
    pub download_rate: u64,
    pub upload_rate: u64,
    pub eta: Eta,
    pub status: TransferStatus,
    pub created_at: DurationSinceUnixEpoch,
    pub completed_at: Option<DurationSinceUnixEpoch>,
    /// The save root the payload lands under.
    pub file_path: String,
    pub limits: SpeedLimits,
    pub scheduled_start: Option<DurationSinceUnixEpoch>,
    pub num_peers: u32,
    pub num_seeds: u32,
    pub error: Option<String>,
    /// Time of the last tick that persisted this record.
    pub last_polled_at: Option<DurationSinceUnixEpoch>,
}

/// The immutable part of a new record.
#[derive(Clone, Debug, PartialEq, Constructor)]
pub struct NewTransfer {
    pub id: TransferId,
    pub name: String,
    pub size: u64,
    pub file_path: String,
    pub limits: SpeedLimits,
    pub scheduled_start: Option<DurationSinceUnixEpoch>,
}

impl TransferRecord {
    /// A record for a transfer that has not been polled yet.
    #[must_use]
    pub fn new(transfer: NewTransfer, status: TransferStatus, created_at: DurationSinceUnixEpoch) -> Self {
        Self {
            id: transfer.id,
            name: transfer.name,
            size: transfer.size,
            progress: 0.0,
            download_rate: 0,
            upload_rate: 0,
            eta: Eta::Unknown,
            status,
            created_at,
            completed_at: None,
            file_path: transfer.file_path,
            limits: transfer.limits,
            scheduled_start: transfer.scheduled_start,
            num_peers: 0,
            num_seeds: 0,
            error: None,
            last_polled_at: None,
        }
    }

    /// Whether the live fields are too old to be trusted.
    ///
    /// They are stale when no tick persisted the record for longer than
    /// `stale_after`. A record that was never polled counts from its creation.
    #[must_use]
    pub fn is_stale(&self, now: DurationSinceUnixEpoch, stale_after: Duration) -> bool {
        let last_seen = self.last_polled_at.unwrap_or(self.created_at);

        now.saturating_sub(last_seen) > stale_after
    }
}

#[cfg(test)]
pub mod fixture {
    use std::time::Duration;

    use torrust_transfer_manager_primitives::{SpeedLimits, TransferId, TransferStatus};

    use super::{NewTransfer, TransferRecord};

    /// A queued record for a 1 MiB payload.
    pub fn a_queued_transfer(name: &str) -> TransferRecord {
        TransferRecord::new(
            NewTransfer::new(
                TransferId::generate(),
                name.to_owned(),
                1_048_576,
                "./downloads".to_owned(),
                SpeedLimits::unlimited(),
                None,
            ),
            TransferStatus::Queued,
            Duration::from_secs(1_700_000_000),
        )
    }
}
