//! Estimated time to finish a transfer.
//!
//! The ETA is non-authoritative: it is recomputed on every supervisor tick
//! from the current download rate and the remaining bytes.
//!
//! It is formatted as `H:MM:SS`, prefixed with the number of days when it is
//! longer than a day, for example: `0:05:12`, `1 day, 2:03:04`,
//! `3 days, 0:00:10`. When the download rate is zero the ETA is `unknown`.
use std::str::FromStr;
use std::time::Duration;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const SECONDS_PER_DAY: u64 = 86_400;
const UNKNOWN: &str = "unknown";

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Eta {
    #[default]
    Unknown,
    Remaining(Duration),
}

impl Eta {
    /// Estimates the remaining time from the bytes still wanted and the
    /// current download rate (bytes per second). Fractions of a second are
    /// truncated.
    #[must_use]
    pub fn estimate(remaining_bytes: u64, download_rate: u64) -> Eta {
        if download_rate == 0 {
            return Eta::Unknown;
        }

        Eta::Remaining(Duration::from_secs(remaining_bytes / download_rate))
    }
}

impl std::fmt::Display for Eta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Eta::Unknown => f.write_str(UNKNOWN),
            Eta::Remaining(duration) => {
                let total = duration.as_secs();
                let days = total / SECONDS_PER_DAY;
                let rest = total % SECONDS_PER_DAY;
                let (hours, minutes, seconds) = (rest / 3600, (rest % 3600) / 60, rest % 60);

                match days {
                    0 => write!(f, "{hours}:{minutes:02}:{seconds:02}"),
                    1 => write!(f, "1 day, {hours}:{minutes:02}:{seconds:02}"),
                    _ => write!(f, "{days} days, {hours}:{minutes:02}:{seconds:02}"),
                }
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid eta: {0:?}")]
pub struct ParseEtaError(pub String);

impl FromStr for Eta {
    type Err = ParseEtaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == UNKNOWN {
            return Ok(Eta::Unknown);
        }

        let invalid = || ParseEtaError(value.to_owned());

        let (days, clock) = match value.split_once(", ") {
            Some((days, clock)) => {
                let days = days
                    .strip_suffix(" days")
                    .or_else(|| days.strip_suffix(" day"))
                    .ok_or_else(invalid)?;
                (days.parse::<u64>().map_err(|_| invalid())?, clock)
            }
            None => (0, value),
        };

        let parts = clock
            .split(':')
            .map(str::parse::<u64>)
            .collect::<Result<Vec<u64>, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            [hours, minutes, seconds] if *minutes < 60 && *seconds < 60 => Ok(Eta::Remaining(Duration::from_secs(
                days * SECONDS_PER_DAY + hours * 3600 + minutes * 60 + seconds,
            ))),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Eta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Eta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Eta::from_str(&value).map_err(de::Error::custom)
    }
}
