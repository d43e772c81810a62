use torrust_transfer_manager_primitives::SpeedLimits;
use torrust_transfer_manager_test_helpers::configuration;
use tracing::level_filters::LevelFilter;

use crate::common::logging::{tracing_stderr_init, INIT};
use crate::servers::api::v1::asserts::{assert_invalid_request, assert_ok};
use crate::servers::api::v1::client::Client;
use crate::servers::api::Started;

#[tokio::test]
async fn should_allow_setting_the_global_limits() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into()).await;
    let client = Client::new(env.bind_address());

    let response = client
        .set_global_limits(&[("download_limit", "1048576"), ("upload_limit", "262144")])
        .await;

    assert_ok(response).await;
    assert_eq!(
        env.manager.adapter.global_limits(),
        SpeedLimits::new(Some(1_048_576), Some(262_144))
    );

    env.stop().await;
}

#[tokio::test]
async fn should_only_change_the_provided_global_limits_and_remove_the_zero_ones() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into()).await;
    let client = Client::new(env.bind_address());

    assert_ok(
        client
            .set_global_limits(&[("download_limit", "1048576"), ("upload_limit", "262144")])
            .await,
    )
    .await;

    assert_ok(client.set_global_limits(&[("upload_limit", "0")]).await).await;

    assert_eq!(env.manager.adapter.global_limits(), SpeedLimits::new(Some(1_048_576), None));

    env.stop().await;
}

#[tokio::test]
async fn should_reject_global_limits_that_are_not_positive_integers() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into()).await;
    let client = Client::new(env.bind_address());

    for invalid_limit in ["-1", "1.5", "fast"] {
        let response = client.set_global_limits(&[("download_limit", invalid_limit)]).await;

        assert_invalid_request(response).await;
    }

    assert_eq!(env.manager.adapter.global_limits(), SpeedLimits::unlimited());

    env.stop().await;
}
