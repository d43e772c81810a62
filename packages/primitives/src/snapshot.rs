use serde::{Deserialize, Serialize};

use crate::eta::Eta;
use crate::TransferStatus;

/// The normalized live state of one transfer, as derived by one supervisor
/// tick from the engine status.
///
/// This is what the supervisor persists and what subscribers receive.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default)]
pub struct TransferSnapshot {
    /// Percentage, from 0 to 100.
    pub progress: f64,
    /// Bytes per second.
    pub download_rate: u64,
    /// Bytes per second.
    pub upload_rate: u64,
    pub status: TransferStatus,
    pub eta: Eta,
    pub num_peers: u32,
    pub num_seeds: u32,
    /// Payload bytes downloaded in this session.
    pub total_download: u64,
    /// Payload bytes uploaded in this session.
    pub total_upload: u64,
    /// The last error reported by the engine, if any.
    pub error: Option<String>,
}
