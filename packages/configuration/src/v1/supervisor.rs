use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};

/// Cadence of the job that polls the engine and reconciles the durable
/// records.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct Supervisor {
    /// Seconds between two ticks.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "Supervisor::default_poll_interval")]
    pub poll_interval: Duration,

    /// Seconds to wait before the next tick when the durable store was not
    /// reachable.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "Supervisor::default_backoff_interval")]
    pub backoff_interval: Duration,

    /// A record is reported as stale when no tick persisted it for this
    /// many poll intervals.
    #[serde(default = "Supervisor::default_stale_after_polls")]
    pub stale_after_polls: u32,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self {
            poll_interval: Self::default_poll_interval(),
            backoff_interval: Self::default_backoff_interval(),
            stale_after_polls: Self::default_stale_after_polls(),
        }
    }
}

impl Supervisor {
    fn default_poll_interval() -> Duration {
        Duration::from_secs(2)
    }

    fn default_backoff_interval() -> Duration {
        Duration::from_secs(5)
    }

    fn default_stale_after_polls() -> u32 {
        3
    }

    /// The age after which a polled record is considered stale.
    #[must_use]
    pub fn stale_after(&self) -> Duration {
        self.poll_interval.saturating_mul(self.stale_after_polls)
    }
}
