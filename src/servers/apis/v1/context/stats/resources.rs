//! API resources for the [`stats`](crate::servers::apis::v1::context::stats)
//! API context.
use serde::{Deserialize, Serialize};

use crate::core::services::statistics::TransferMetrics;

/// It contains all the statistics generated by the manager.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Stats {
    /// Number of stored transfers.
    pub total_count: u64,
    /// Transfers whose status is `downloading` or `queued`.
    pub active_count: u64,
    pub completed_count: u64,
    /// Sum of the sizes of all the stored transfers, in bytes.
    pub total_bytes: u64,
    /// Bytes per second.
    pub global_download_rate: u64,
    /// Bytes per second.
    pub global_upload_rate: u64,
}

impl From<TransferMetrics> for Stats {
    fn from(metrics: TransferMetrics) -> Self {
        Self {
            total_count: metrics.total_count,
            active_count: metrics.active_count,
            completed_count: metrics.completed_count,
            total_bytes: metrics.total_bytes,
            global_download_rate: metrics.global_download_rate,
            global_upload_rate: metrics.global_upload_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Stats;
    use crate::core::services::statistics::TransferMetrics;

    #[test]
    fn stats_resource_should_be_converted_from_transfer_metrics() {
        assert_eq!(
            Stats::from(TransferMetrics {
                total_count: 1,
                active_count: 2,
                completed_count: 3,
                total_bytes: 4,
                global_download_rate: 5,
                global_upload_rate: 6,
            }),
            Stats {
                total_count: 1,
                active_count: 2,
                completed_count: 3,
                total_bytes: 4,
                global_download_rate: 5,
                global_upload_rate: 6,
            }
        );
    }
}
