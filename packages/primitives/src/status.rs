//! Normalized transfer status.
//!
//! The status is derived on every supervisor tick from the raw engine state.
//! Transitions follow this state machine:
//!
//! ```text
//! queued -> downloading_metadata -> checking -> downloading -> { paused <-> downloading } -> completed
//! ```
//!
//! `error` is reachable from any non-terminal state and it is not sticky: it
//! is evaluated again on every tick from the current engine state.
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    #[default]
    Queued,
    DownloadingMetadata,
    Checking,
    Downloading,
    Paused,
    Completed,
    Error,
}

impl TransferStatus {
    pub const ALL: [TransferStatus; 7] = [
        TransferStatus::Queued,
        TransferStatus::DownloadingMetadata,
        TransferStatus::Checking,
        TransferStatus::Downloading,
        TransferStatus::Paused,
        TransferStatus::Completed,
        TransferStatus::Error,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Queued => "queued",
            TransferStatus::DownloadingMetadata => "downloading_metadata",
            TransferStatus::Checking => "checking",
            TransferStatus::Downloading => "downloading",
            TransferStatus::Paused => "paused",
            TransferStatus::Completed => "completed",
            TransferStatus::Error => "error",
        }
    }

    /// Active transfers are the ones counted as "active" in the statistics.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, TransferStatus::Downloading | TransferStatus::Queued)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        *self == TransferStatus::Completed
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown transfer status: {0:?}")]
pub struct ParseTransferStatusError(pub String);

impl FromStr for TransferStatus {
    type Err = ParseTransferStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseTransferStatusError(value.to_owned()))
    }
}
