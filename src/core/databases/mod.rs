//! The persistence module.
//!
//! Persistence is implemented with one [`Database`] trait and one driver:
//!
//! - [`Sqlite`](crate::core::databases::sqlite::Sqlite)
//!
//! > **NOTICE**: There are no database migrations. Tables are created when the
//! > driver is built if they do not exist yet.
//!
//! The persistent objects are:
//!
//! - [Transfers](#transfers)
//!
//! # Transfers
//!
//!  Field                  | Sample data                            | Description
//! ---|---|---
//!  `id_pk`                | 1                                      | Autoincrement id
//!  `id`                   | `4e7c4d3a-0b55-4b8e-9f4e-3cf1b1a52c1e` | Transfer id (UUID v4)
//!  `name`                 | `ubuntu-24.04-desktop-amd64.iso`       | Name from the descriptor
//!  `size`                 | 6114656256                             | Total payload bytes
//!  `progress`             | 42.5                                   | Percentage, from 0 to 100
//!  `download_rate`        | 1048576                                | Bytes per second
//!  `upload_rate`          | 65536                                  | Bytes per second
//!  `eta`                  | `1:02:03`                              | Estimated time left or `unknown`
//!  `status`               | `downloading`                          | Normalized status
//!  `created_at`           | 1760779800                             | Seconds since the Unix Epoch
//!  `completed_at`         | 1760783400                             | Set once, on the first `completed` tick
//!  `file_path`            | `./storage/transfer-manager/downloads` | Save root
//!  `download_speed_limit` | 524288                                 | Optional cap, bytes per second
//!  `upload_speed_limit`   | 131072                                 | Optional cap, bytes per second
//!  `scheduled_start`      | 1760790000                             | Optional, seconds since the Unix Epoch
//!  `num_peers`            | 12                                     | Connected peers
//!  `num_seeds`            | 4                                      | Connected seeds
//!  `error`                | `tracker unreachable`                  | Last engine error, if any
//!  `last_polled_at`       | 1760779802                             | Last tick that persisted the row
pub mod driver;
pub mod error;
pub mod sqlite;

#[cfg(test)]
use mockall::automock;
use torrust_transfer_manager_primitives::{DurationSinceUnixEpoch, SpeedLimits, TransferId, TransferSnapshot, TransferStatus};

use self::error::Error;
use crate::core::transfer::TransferRecord;

/// Aggregated counters over all the stored transfers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct TransferCounts {
    pub total: u64,
    /// Transfers whose stored status is `downloading` or `queued`.
    pub active: u64,
    pub completed: u64,
    /// Sum of the payload sizes.
    pub total_bytes: u64,
}

/// The persistence trait. It contains all the methods to interact with the database.
#[cfg_attr(test, automock)]
pub trait Database: Sync + Send {
    // Schema

    /// It generates the database tables. SQL queries are hardcoded in the trait
    /// implementation.
    ///
    /// # Context: Schema
    ///
    /// # Errors
    ///
    /// Will return `Error` if unable to create own tables.
    fn create_database_tables(&self) -> Result<(), Error>;

    /// It drops the database tables.
    ///
    /// # Context: Schema
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to drop tables.
    fn drop_database_tables(&self) -> Result<(), Error>;

    // Transfers

    /// It inserts a new transfer record.
    ///
    /// # Context: Transfers
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to insert, for example when the id already
    /// exists.
    fn insert_transfer(&self, transfer: &TransferRecord) -> Result<(), Error>;

    /// It loads one transfer record.
    ///
    /// # Context: Transfers
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to load.
    fn get_transfer(&self, id: &TransferId) -> Result<Option<TransferRecord>, Error>;

    /// It loads all the transfer records, most recently created first.
    ///
    /// # Context: Transfers
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to load.
    fn load_transfers(&self) -> Result<Vec<TransferRecord>, Error>;

    /// It writes the live fields of one transfer in one update and stamps
    /// `last_polled_at`.
    ///
    /// `completed_at` is only written while the stored value is still null.
    ///
    /// It returns `false` if there is no record with that id.
    ///
    /// # Context: Transfers
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to update.
    fn save_snapshot(
        &self,
        id: &TransferId,
        snapshot: &TransferSnapshot,
        polled_at: DurationSinceUnixEpoch,
        completed_at: Option<DurationSinceUnixEpoch>,
    ) -> Result<bool, Error>;

    /// It overwrites the stored status.
    ///
    /// # Context: Transfers
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to update.
    fn update_transfer_status(&self, id: &TransferId, status: TransferStatus) -> Result<bool, Error>;

    /// It writes the provided limits and the scheduled start. Fields that are
    /// `None` keep their stored value.
    ///
    /// # Context: Transfers
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to update.
    fn update_transfer_settings(
        &self,
        id: &TransferId,
        limits: &SpeedLimits,
        scheduled_start: Option<DurationSinceUnixEpoch>,
    ) -> Result<bool, Error>;

    /// It removes a transfer record. It returns `false` if there was none.
    ///
    /// # Context: Transfers
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to remove.
    fn remove_transfer(&self, id: &TransferId) -> Result<bool, Error>;

    /// It counts the stored transfers.
    ///
    /// # Context: Transfers
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to query.
    fn count_transfers(&self) -> Result<TransferCounts, Error>;
}
