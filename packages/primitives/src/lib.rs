//! Primitive types for [Torrust Transfer Manager](https://docs.rs/torrust-transfer-manager).
//!
//! This module contains the basic data structures shared by the transfer
//! manager application and its packages: transfer identifiers, the normalized
//! transfer status, speed limits, engine handles and the per-tick transfer
//! snapshot.
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod eta;
pub mod handle;
pub mod limits;
pub mod snapshot;
pub mod status;
pub mod transfer_id;

pub use handle::EngineHandle;
pub use limits::SpeedLimits;
pub use snapshot::TransferSnapshot;
pub use status::TransferStatus;
pub use transfer_id::TransferId;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// The database management system used by the manager.
///
/// Refer to:
///
/// - [Torrust Transfer Manager Configuration](https://docs.rs/torrust-transfer-manager-configuration).
/// - [Torrust Transfer Manager](https://docs.rs/torrust-transfer-manager).
///
/// for more information about persistence.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, derive_more::Display, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    /// The Sqlite3 database driver.
    Sqlite3,
}
