//! Transfer rate limits.
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Optional download and upload caps in bytes per second.
///
/// `None` means "unlimited" when the limits describe a transfer, and "leave
/// untouched" when they describe an update.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default, Constructor)]
pub struct SpeedLimits {
    pub download: Option<u64>,
    pub upload: Option<u64>,
}

impl SpeedLimits {
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.download.is_none() && self.upload.is_none()
    }

    /// Returns the limits after applying the provided fields of `update`.
    /// Fields not set in `update` keep their current value.
    #[must_use]
    pub fn apply(&self, update: &SpeedLimits) -> SpeedLimits {
        SpeedLimits {
            download: update.download.or(self.download),
            upload: update.upload.or(self.upload),
        }
    }
}
