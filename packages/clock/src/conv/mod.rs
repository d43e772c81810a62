//! Conversions between timestamps and `chrono` date times.
//!
//! Timestamps are stored as seconds since the Unix Epoch and exposed in the
//! API as RFC 3339 strings, for example `2026-10-18T09:30:00Z`.
use chrono::{DateTime, SecondsFormat, Utc};
use torrust_transfer_manager_primitives::DurationSinceUnixEpoch;

/// It converts a string in RFC 3339 format to a timestamp.
///
/// It returns `None` if the string is not a valid RFC 3339 date or if the
/// date is before the Unix Epoch.
#[must_use]
pub fn convert_from_rfc_3339_to_timestamp(rfc_3339: &str) -> Option<DurationSinceUnixEpoch> {
    DateTime::parse_from_rfc3339(rfc_3339)
        .ok()
        .and_then(|datetime| convert_from_datetime_utc_to_timestamp(&datetime.with_timezone(&Utc)))
}

/// It converts a `DateTime::<Utc>` to a timestamp, truncated to seconds.
///
/// It returns `None` for dates before the Unix Epoch.
#[must_use]
pub fn convert_from_datetime_utc_to_timestamp(datetime_utc: &DateTime<Utc>) -> Option<DurationSinceUnixEpoch> {
    u64::try_from(datetime_utc.timestamp())
        .ok()
        .map(DurationSinceUnixEpoch::from_secs)
}

/// It converts a timestamp to a `DateTime::<Utc>`.
///
/// # Panics
///
/// Will panic if the input time overflows the `u64` seconds overflows the `i64` type.
/// (this will naturally happen in 292.5 billion years)
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> DateTime<Utc> {
    DateTime::from_timestamp(
        i64::try_from(duration.as_secs()).expect("Overflow of i64 seconds, very future!"),
        duration.subsec_nanos(),
    )
    .expect("timestamp should be within the chrono range")
}

/// It formats a timestamp as a RFC 3339 string with second precision.
#[must_use]
pub fn convert_from_timestamp_to_rfc_3339(duration: DurationSinceUnixEpoch) -> String {
    convert_from_timestamp_to_datetime_utc(duration).to_rfc3339_opts(SecondsFormat::Secs, true)
}
