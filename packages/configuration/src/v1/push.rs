use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};

/// Configuration for the push channel that streams transfer updates.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct Push {
    /// Updates queued per subscriber. A subscriber whose queue is full is
    /// dropped.
    #[serde(default = "Push::default_subscriber_capacity")]
    pub subscriber_capacity: usize,

    /// Maximum time to write one frame to a client before closing it.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "send_timeout_ms", default = "Push::default_send_timeout")]
    pub send_timeout: Duration,
}

impl Default for Push {
    fn default() -> Self {
        Self {
            subscriber_capacity: Self::default_subscriber_capacity(),
            send_timeout: Self::default_send_timeout(),
        }
    }
}

impl Push {
    fn default_subscriber_capacity() -> usize {
        16
    }

    fn default_send_timeout() -> Duration {
        Duration::from_millis(1000)
    }
}
