use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use torrust_transfer_manager::core::Manager;
use tracing::level_filters::LevelFilter;

use crate::common::fixtures::{descriptor, fast_polling};
use crate::common::logging::{tracing_stderr_init, INIT};
use crate::servers::api::v1::asserts::transfer;
use crate::servers::api::v1::client::Client;
use crate::servers::api::Started;

type Socket = tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// It reads frames until a text frame arrives and parses it.
async fn next_update(socket: &mut Socket) -> Value {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("no update was pushed in time")
            .expect("the push channel was closed")
            .expect("the push channel failed");

        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn wait_for_subscribers(manager: &Manager, count: usize) -> usize {
    for _ in 0..100 {
        if manager.broadcaster.subscriber_count() == count {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    manager.broadcaster.subscriber_count()
}

#[tokio::test]
async fn should_push_the_snapshots_of_every_tick() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&fast_polling().into()).await;
    let client = Client::new(env.bind_address());

    let (mut socket, _) = connect_async(client.push_url()).await.unwrap();

    let created = transfer(client.create_transfer("ubuntu.torrent", descriptor("ubuntu.iso", 1_000), &[]).await).await;

    let update = loop {
        let update = next_update(&mut socket).await;
        if update["snapshots"].get(&created.id).is_some() {
            break update;
        }
    };

    assert_eq!(update["type"], "transfer_update");

    let snapshot = &update["snapshots"][&created.id];
    assert_eq!(snapshot["status"], "downloading");
    assert_eq!(snapshot["eta"], "unknown");

    socket.close(None).await.unwrap();

    env.stop().await;
}

#[tokio::test]
async fn should_ignore_the_messages_sent_by_the_client() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&fast_polling().into()).await;
    let client = Client::new(env.bind_address());

    let (mut socket, _) = connect_async(client.push_url()).await.unwrap();

    socket.send(Message::text("hello")).await.unwrap();

    assert_eq!(next_update(&mut socket).await["type"], "transfer_update");

    env.stop().await;
}

#[tokio::test]
async fn should_unsubscribe_a_client_that_closes_the_channel() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&fast_polling().into()).await;
    let client = Client::new(env.bind_address());

    let (mut socket, _) = connect_async(client.push_url()).await.unwrap();

    assert_eq!(wait_for_subscribers(&env.manager, 1).await, 1);

    socket.close(None).await.unwrap();

    assert_eq!(wait_for_subscribers(&env.manager, 0).await, 0);

    env.stop().await;
}
