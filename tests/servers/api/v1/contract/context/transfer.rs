use std::time::Duration;

use serde_json::json;
use torrust_transfer_manager::servers::apis::v1::context::transfer::resources::Transfer;
use torrust_transfer_manager_test_helpers::configuration;
use tracing::level_filters::LevelFilter;

use crate::common::fixtures::{descriptor, fast_polling, invalid_descriptor};
use crate::common::logging::{tracing_stderr_init, INIT};
use crate::servers::api::v1::asserts::{
    assert_engine_rejected, assert_invalid_metadata, assert_invalid_request, assert_not_found, assert_ok, transfer,
    transfer_list,
};
use crate::servers::api::v1::client::Client;
use crate::servers::api::Started;

/// It polls the transfer until `condition` holds, for up to five seconds.
async fn wait_for(client: &Client, id: &str, condition: impl Fn(&Transfer) -> bool) -> Transfer {
    let mut last = transfer(client.get_transfer(id).await).await;

    for _ in 0..100 {
        if condition(&last) {
            break;
        }

        tokio::time::sleep(Duration::from_millis(50)).await;

        last = transfer(client.get_transfer(id).await).await;
    }

    last
}

mod for_creating {
    use super::*;

    #[tokio::test]
    async fn should_allow_creating_a_transfer_from_a_descriptor() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let response = client
            .create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 1_048_576), &[("download_limit", "1024")])
            .await;

        let created = transfer(response).await;

        assert_eq!(created.name, "ubuntu.iso");
        assert_eq!(created.size, 1_048_576);
        assert_eq!(created.status, "queued");
        assert_eq!(created.eta, "unknown");
        assert_eq!(created.download_speed_limit, Some(1_024));
        assert_eq!(created.upload_speed_limit, None);
        assert_eq!(created.completed_at, None);
        assert_eq!(created.file_path, env.save_path().to_string());
        assert!(!created.stale);

        let listed = transfer_list(client.get_transfers().await).await;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_generate_a_different_id_for_every_transfer() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let first = transfer(client.create_transfer("a.torrent", descriptor("a.iso", 10), &[]).await).await;
        let second = transfer(client.create_transfer("b.torrent", descriptor("b.iso", 10), &[]).await).await;

        assert_ne!(first.id, second.id);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_start_paused_when_the_start_is_scheduled_in_the_future() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let in_one_hour = (chrono::Utc::now() + chrono::Duration::hours(1)).to_rfc3339();

        let created = transfer(
            client
                .create_transfer(
                    "ubuntu.torrent",
                    descriptor("ubuntu.iso", 10),
                    &[("scheduled_start", in_one_hour.as_str())],
                )
                .await,
        )
        .await;

        assert_eq!(created.status, "paused");
        assert!(created.scheduled_start.is_some());

        env.stop().await;
    }

    #[tokio::test]
    async fn should_not_allow_creating_a_transfer_from_a_file_without_the_descriptor_extension() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let response = client.create_transfer("ubuntu.iso", descriptor("ubuntu.iso", 10), &[]).await;

        assert_invalid_metadata(response).await;
        assert!(transfer_list(client.get_transfers().await).await.is_empty());

        env.stop().await;
    }

    #[tokio::test]
    async fn should_not_allow_creating_a_transfer_from_an_invalid_descriptor() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let response = client.create_transfer("ubuntu.torrent", invalid_descriptor(), &[]).await;

        assert_invalid_metadata(response).await;
        assert!(transfer_list(client.get_transfers().await).await.is_empty());

        env.stop().await;
    }

    #[tokio::test]
    async fn should_not_allow_creating_a_transfer_with_an_invalid_scheduled_start() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let response = client
            .create_transfer(
                "ubuntu.torrent",
                descriptor("ubuntu.iso", 10),
                &[("scheduled_start", "tomorrow")],
            )
            .await;

        assert_invalid_request(response).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_keep_the_record_when_the_engine_rejects_the_transfer() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        transfer(client.create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 10), &[]).await).await;

        let response = client
            .create_transfer("ubuntu-again.torrent", descriptor("ubuntu.iso", 10), &[])
            .await;

        assert_engine_rejected(response).await;

        let listed = transfer_list(client.get_transfers().await).await;
        assert_eq!(listed.len(), 2);

        // The newest record is the rejected one, and it can not be controlled.
        let orphan = &listed[0];
        assert_not_found(client.pause_transfer(&orphan.id).await).await;

        // But it can be deleted.
        assert_ok(client.delete_transfer(&orphan.id).await).await;
        assert_eq!(transfer_list(client.get_transfers().await).await.len(), 1);

        env.stop().await;
    }
}

mod for_reading {
    use super::*;

    #[tokio::test]
    async fn should_list_the_most_recently_created_transfers_first() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let first = transfer(client.create_transfer("a.torrent", descriptor("a.iso", 10), &[]).await).await;
        let second = transfer(client.create_transfer("b.torrent", descriptor("b.iso", 10), &[]).await).await;

        let ids: Vec<String> = transfer_list(client.get_transfers().await)
            .await
            .into_iter()
            .map(|transfer| transfer.id)
            .collect();

        assert_eq!(ids, vec![second.id, first.id]);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_return_not_found_for_an_unknown_transfer() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;

        let response = Client::new(env.bind_address()).get_transfer("unknown").await;

        assert_not_found(response).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_report_a_transfer_whose_payload_is_already_on_disk_as_completed() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&fast_polling().into()).await;
        let client = Client::new(env.bind_address());

        std::fs::write(env.save_path().join("ubuntu.iso"), vec![0u8; 2_048]).unwrap();

        let created = transfer(client.create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 2_048), &[]).await).await;

        let completed = wait_for(&client, &created.id, |transfer| transfer.status == "completed").await;

        assert_eq!(completed.status, "completed");
        assert!((completed.progress - 100.0).abs() < f64::EPSILON);
        assert!(completed.completed_at.is_some());
        assert!(completed.last_polled_at.is_some());

        // It is completed only once.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let later = transfer(client.get_transfer(&created.id).await).await;
        assert_eq!(later.completed_at, completed.completed_at);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_report_a_partial_payload_as_downloading_progress() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&fast_polling().into()).await;
        let client = Client::new(env.bind_address());

        let created = transfer(client.create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 2_048), &[]).await).await;

        let polled = wait_for(&client, &created.id, |transfer| transfer.last_polled_at.is_some()).await;

        assert_eq!(polled.status, "downloading");
        assert!(polled.progress.abs() < f64::EPSILON);
        assert_eq!(polled.eta, "unknown");

        env.stop().await;
    }
}

mod for_controlling {
    use super::*;

    #[tokio::test]
    async fn should_allow_pausing_and_resuming_a_transfer() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let created = transfer(client.create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 10), &[]).await).await;

        assert_ok(client.pause_transfer(&created.id).await).await;
        assert_eq!(transfer(client.get_transfer(&created.id).await).await.status, "paused");

        assert_ok(client.resume_transfer(&created.id).await).await;
        assert_eq!(transfer(client.get_transfer(&created.id).await).await.status, "downloading");

        env.stop().await;
    }

    #[tokio::test]
    async fn should_return_not_found_when_pausing_or_resuming_an_unknown_transfer() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        assert_not_found(client.pause_transfer("unknown").await).await;
        assert_not_found(client.resume_transfer("unknown").await).await;
        assert!(transfer_list(client.get_transfers().await).await.is_empty());

        env.stop().await;
    }

    #[tokio::test]
    async fn should_allow_updating_the_limits_of_a_transfer() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let created = transfer(
            client
                .create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 10), &[("upload_limit", "512")])
                .await,
        )
        .await;

        let response = client
            .update_transfer(&created.id, &json!({ "download_speed_limit": 2048 }))
            .await;

        assert_ok(response).await;

        let updated = transfer(client.get_transfer(&created.id).await).await;
        assert_eq!(updated.download_speed_limit, Some(2_048));
        assert_eq!(updated.upload_speed_limit, Some(512));

        env.stop().await;
    }

    #[tokio::test]
    async fn should_not_allow_updating_a_transfer_with_an_invalid_body() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let created = transfer(client.create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 10), &[]).await).await;

        assert_invalid_request(
            client
                .update_transfer(&created.id, &json!({ "download_speed_limit": "fast" }))
                .await,
        )
        .await;

        assert_invalid_request(
            client
                .update_transfer(&created.id, &json!({ "scheduled_start": "tomorrow" }))
                .await,
        )
        .await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_an_unknown_transfer() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;

        let response = Client::new(env.bind_address())
            .update_transfer("unknown", &json!({ "download_speed_limit": 2048 }))
            .await;

        assert_not_found(response).await;

        env.stop().await;
    }
}

mod for_deleting {
    use super::*;

    #[tokio::test]
    async fn should_allow_deleting_a_transfer() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;
        let client = Client::new(env.bind_address());

        let created = transfer(client.create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 10), &[]).await).await;

        assert_ok(client.delete_transfer(&created.id).await).await;

        assert_not_found(client.get_transfer(&created.id).await).await;
        assert_not_found(client.pause_transfer(&created.id).await).await;

        // The same descriptor can be added again.
        transfer(client.create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 10), &[]).await).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn deleting_an_unknown_transfer_should_succeed() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral().into()).await;

        assert_ok(Client::new(env.bind_address()).delete_transfer("unknown").await).await;

        env.stop().await;
    }
}
