//! API resources for the [`transfer`](crate::servers::apis::v1::context::transfer)
//! API context.
use serde::{Deserialize, Serialize};
use torrust_transfer_manager_clock::conv::convert_from_timestamp_to_rfc_3339;

use crate::core::services::transfer::Info;

/// A stored transfer. Dates are RFC 3339 strings in UTC.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Transfer {
    pub id: String,
    pub name: String,
    /// Total payload size in bytes.
    pub size: u64,
    /// Percentage, from 0 to 100.
    pub progress: f64,
    pub download_rate: u64,
    pub upload_rate: u64,
    /// `H:MM:SS`, or `unknown` when nothing is being downloaded.
    pub eta: String,
    pub status: String,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub file_path: String,
    pub download_speed_limit: Option<u64>,
    pub upload_speed_limit: Option<u64>,
    pub scheduled_start: Option<String>,
    pub num_peers: u32,
    pub num_seeds: u32,
    pub error: Option<String>,
    pub last_polled_at: Option<String>,
    /// The live fields were not refreshed for a while. Advisory only.
    pub stale: bool,
}

impl From<Info> for Transfer {
    fn from(info: Info) -> Self {
        let record = info.record;

        Self {
            id: record.id.to_string(),
            name: record.name,
            size: record.size,
            progress: record.progress,
            download_rate: record.download_rate,
            upload_rate: record.upload_rate,
            eta: record.eta.to_string(),
            status: record.status.to_string(),
            created_at: convert_from_timestamp_to_rfc_3339(record.created_at),
            completed_at: record.completed_at.map(convert_from_timestamp_to_rfc_3339),
            file_path: record.file_path,
            download_speed_limit: record.limits.download,
            upload_speed_limit: record.limits.upload,
            scheduled_start: record.scheduled_start.map(convert_from_timestamp_to_rfc_3339),
            num_peers: record.num_peers,
            num_seeds: record.num_seeds,
            error: record.error,
            last_polled_at: record.last_polled_at.map(convert_from_timestamp_to_rfc_3339),
            stale: info.stale,
        }
    }
}
