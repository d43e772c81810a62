//! Statistics services.
//!
//! The [`get_metrics`] service combines two sources:
//!
//! - The durable counters, computed by the database over all the stored
//!   records, orphans included.
//! - The live rates, the sum of the rates the supervisor recorded for the
//!   registered transfers in its last tick.
//!
//! A transfer counts as active when its stored status is `downloading` or
//! `queued`.
use torrust_transfer_manager_transfer_registry::repository::Repository as _;

use crate::core::error::Error;
use crate::core::Manager;

/// All the metrics about the transfers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct TransferMetrics {
    pub total_count: u64,
    pub active_count: u64,
    pub completed_count: u64,
    /// Sum of the payload sizes, in bytes.
    pub total_bytes: u64,
    /// Bytes per second.
    pub global_download_rate: u64,
    /// Bytes per second.
    pub global_upload_rate: u64,
}

/// It returns all the [`TransferMetrics`].
///
/// # Errors
///
/// Will return `StoreUnavailable` if the store can not be read.
pub fn get_metrics(manager: &Manager) -> Result<TransferMetrics, Error> {
    let counts = manager.database.count_transfers()?;
    let (global_download_rate, global_upload_rate) = manager.registry.live_rates();

    Ok(TransferMetrics {
        total_count: counts.total,
        active_count: counts.active,
        completed_count: counts.completed,
        total_bytes: counts.total_bytes,
        global_download_rate,
        global_upload_rate,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use torrust_transfer_manager_configuration::Configuration;
    use torrust_transfer_manager_primitives::{TransferSnapshot, TransferStatus};
    use torrust_transfer_manager_test_helpers::configuration;
    use torrust_transfer_manager_transfer_registry::repository::Repository as _;

    use crate::core::engine::adapter::CreateOptions;
    use crate::core::engine::fixture::FixtureEngine;
    use crate::core::engine::metainfo::fixture::MetainfoBuilder;
    use crate::core::services::manager_factory;
    use crate::core::services::statistics::{get_metrics, TransferMetrics};

    pub fn manager_configuration() -> Arc<Configuration> {
        Arc::new(configuration::ephemeral())
    }

    #[tokio::test]
    async fn the_statistics_service_should_return_zeroed_metrics_without_transfers() {
        let manager = manager_factory(&manager_configuration(), Arc::new(FixtureEngine::new()));

        assert_eq!(get_metrics(&manager).unwrap(), TransferMetrics::default());
    }

    #[tokio::test]
    async fn the_statistics_service_should_combine_stored_counts_and_live_rates() {
        let engine = Arc::new(FixtureEngine::new());
        let manager = manager_factory(&manager_configuration(), engine.clone());

        let first = manager
            .create("a.torrent", MetainfoBuilder::single_file("a", 1_000).to_bytes(), CreateOptions::default())
            .await
            .unwrap();

        engine.reject_next_add();
        let _orphan = manager
            .create("b.torrent", MetainfoBuilder::single_file("b", 500).to_bytes(), CreateOptions::default())
            .await;

        let handle = manager.registry.handle(&first.id).unwrap();
        manager.registry.record(
            &first.id,
            handle,
            TransferSnapshot {
                download_rate: 300,
                upload_rate: 20,
                status: TransferStatus::Downloading,
                ..Default::default()
            },
        );

        assert_eq!(
            get_metrics(&manager).unwrap(),
            TransferMetrics {
                total_count: 2,
                active_count: 2,
                completed_count: 0,
                total_bytes: 1_500,
                global_download_rate: 300,
                global_upload_rate: 20,
            }
        );
    }
}
