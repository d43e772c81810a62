//! API handlers for the [`push`](crate::servers::apis::v1::context::push)
//! API context.
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt as _, StreamExt as _};
use serde::Serialize;

use crate::core::broadcaster::{SubscriberId, Subscription};
use crate::core::Manager;
use crate::servers::apis::API_LOG_TARGET;

/// It upgrades the connection and subscribes it to the transfer updates.
pub async fn push_handler(State(manager): State<Arc<Manager>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| push(socket, manager))
}

async fn push(socket: WebSocket, manager: Arc<Manager>) {
    let Subscription { id, mut receiver } = manager.broadcaster.subscribe();
    let send_timeout = manager.config().push.send_timeout;

    tracing::debug!(target: API_LOG_TARGET, subscriber = id, "push (subscribed)");

    let (mut sender, mut incoming) = socket.split();

    loop {
        tokio::select! {
            update = receiver.recv() => {
                // The broadcaster dropped this subscriber.
                let Some(update) = update else { break };

                let message = match frame(update.as_ref()) {
                    Ok(message) => message,
                    Err(err) => {
                        tracing::error!(target: API_LOG_TARGET, subscriber = id, %err, "push (unable to serialize update)");
                        break;
                    }
                };

                if !send(&mut sender, message, send_timeout, id).await {
                    break;
                }
            }
            message = incoming.next() => {
                match message {
                    None | Some(Ok(Message::Close(_)) | Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    manager.broadcaster.unsubscribe(id);

    tracing::debug!(target: API_LOG_TARGET, subscriber = id, "push (closed)");
}

/// The text frame of one update.
fn frame<T: Serialize + ?Sized>(update: &T) -> Result<Message, serde_json::Error> {
    Ok(Message::Text(serde_json::to_string(update)?.into()))
}

async fn send<S>(sender: &mut S, message: Message, send_timeout: Duration, id: SubscriberId) -> bool
where
    S: futures::Sink<Message, Error = axum::Error> + Unpin,
{
    match tokio::time::timeout(send_timeout, sender.send(message)).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::debug!(target: API_LOG_TARGET, subscriber = id, %err, "push (send failed)");
            false
        }
        Err(_) => {
            tracing::warn!(target: API_LOG_TARGET, subscriber = id, ?send_timeout, "push (send timed out)");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use axum::extract::ws::Message;

    use super::frame;
    use crate::core::broadcaster::Update;

    #[test]
    fn an_update_should_be_sent_as_a_json_text_frame() {
        let message = frame(&Update::TransferUpdate {
            snapshots: BTreeMap::new(),
        })
        .unwrap();

        assert_eq!(
            message,
            Message::Text(r#"{"type":"transfer_update","snapshots":{}}"#.into())
        );
    }

    #[test]
    fn an_update_that_can_not_be_serialized_should_not_produce_a_frame() {
        let not_json = BTreeMap::from([(vec![1u8], 1u8)]);

        assert!(frame(&not_json).is_err());
    }
}
