//! Fan-out of supervisor updates to live subscribers.
//!
//! Every subscriber gets its own bounded queue. Publishing never waits: an
//! update that does not fit in a subscriber queue, or that can not be
//! delivered because the subscriber is gone, removes that subscriber right
//! away. The other subscribers are not affected.
//!
//! ```text
//! Supervisor --publish--> Broadcaster --try_send--> [queue] --> subscriber 1
//!                                     --try_send--> [queue] --> subscriber 2
//!                                     --try_send--> [full ] x   pruned
//! ```
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use torrust_transfer_manager_primitives::{TransferId, TransferSnapshot};

pub const BROADCASTER_LOG_TARGET: &str = "BROADCASTER";

/// A message for subscribers.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Update {
    /// The snapshots derived by one supervisor tick.
    TransferUpdate {
        snapshots: BTreeMap<TransferId, TransferSnapshot>,
    },
}

pub type SubscriberId = u64;

#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub receiver: mpsc::Receiver<Arc<Update>>,
}

/// The outcome of one publish.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Delivery {
    pub delivered: usize,
    pub pruned: usize,
}

#[derive(Debug)]
pub struct Broadcaster {
    capacity: usize,
    last_id: AtomicU64,
    subscribers: Mutex<BTreeMap<SubscriberId, mpsc::Sender<Arc<Update>>>>,
}

impl Broadcaster {
    /// # Panics
    ///
    /// Will panic if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "subscriber queues need room for at least one update");

        Self {
            capacity,
            last_id: AtomicU64::new(0),
            subscribers: Mutex::new(BTreeMap::new()),
        }
    }

    fn get_subscribers(&self) -> std::sync::MutexGuard<'_, BTreeMap<SubscriberId, mpsc::Sender<Arc<Update>>>> {
        self.subscribers.lock().expect("it should lock the subscribers")
    }

    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;

        self.get_subscribers().insert(id, sender);

        tracing::debug!(target: BROADCASTER_LOG_TARGET, subscriber = id, "Broadcaster::subscribe");

        Subscription { id, receiver }
    }

    /// It returns `false` if the subscriber was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let removed = self.get_subscribers().remove(&id).is_some();

        tracing::debug!(target: BROADCASTER_LOG_TARGET, subscriber = id, removed, "Broadcaster::unsubscribe");

        removed
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.get_subscribers().len()
    }

    /// It offers `update` to every subscriber without waiting.
    pub fn publish(&self, update: Update) -> Delivery {
        let update = Arc::new(update);
        let mut delivery = Delivery::default();

        self.get_subscribers().retain(|id, sender| match sender.try_send(update.clone()) {
            Ok(()) => {
                delivery.delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(target: BROADCASTER_LOG_TARGET, subscriber = id, "Broadcaster::publish (pruned slow subscriber)");
                delivery.pruned += 1;
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(target: BROADCASTER_LOG_TARGET, subscriber = id, "Broadcaster::publish (pruned closed subscriber)");
                delivery.pruned += 1;
                false
            }
        });

        delivery
    }
}
