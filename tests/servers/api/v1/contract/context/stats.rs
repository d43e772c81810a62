use torrust_transfer_manager::servers::apis::v1::context::stats::resources::Stats;
use torrust_transfer_manager_test_helpers::configuration;
use tracing::level_filters::LevelFilter;

use crate::common::fixtures::descriptor;
use crate::common::logging::{tracing_stderr_init, INIT};
use crate::servers::api::v1::asserts::{assert_stats, transfer};
use crate::servers::api::v1::client::Client;
use crate::servers::api::Started;

#[tokio::test]
async fn should_allow_getting_the_statistics_without_transfers() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into()).await;

    let response = Client::new(env.bind_address()).get_stats().await;

    assert_stats(
        response,
        Stats {
            total_count: 0,
            active_count: 0,
            completed_count: 0,
            total_bytes: 0,
            global_download_rate: 0,
            global_upload_rate: 0,
        },
    )
    .await;

    env.stop().await;
}

#[tokio::test]
async fn should_count_every_stored_transfer() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into()).await;
    let client = Client::new(env.bind_address());

    transfer(client.create_transfer("a.torrent", descriptor("a.iso", 1_000), &[]).await).await;
    transfer(client.create_transfer("b.torrent", descriptor("b.iso", 3_000), &[]).await).await;

    let response = client.get_stats().await;

    // Nothing is being downloaded: the local engine only reports the bytes
    // already on disk.
    assert_stats(
        response,
        Stats {
            total_count: 2,
            active_count: 2,
            completed_count: 0,
            total_bytes: 4_000,
            global_download_rate: 0,
            global_upload_rate: 0,
        },
    )
    .await;

    env.stop().await;
}
