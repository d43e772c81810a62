//! Query parameters and bodies of the [`transfer`](crate::servers::apis::v1::context::transfer)
//! API context.
use serde::{Deserialize, Serialize};
use torrust_transfer_manager_clock::conv::convert_from_rfc_3339_to_timestamp;
use torrust_transfer_manager_primitives::DurationSinceUnixEpoch;

use crate::servers::apis::empty_string_as_none;

/// The multipart field that carries the descriptor.
pub const DESCRIPTOR_FIELD: &str = "file";

/// Query parameters of the create request.
#[derive(Deserialize, Debug, Default)]
pub struct CreateParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub download_limit: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub upload_limit: Option<u64>,
    /// RFC 3339.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub scheduled_start: Option<String>,
}

/// Body of the update request. Missing or `null` fields keep their value.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct UpdateTransferForm {
    #[serde(default)]
    pub download_speed_limit: Option<u64>,
    #[serde(default)]
    pub upload_speed_limit: Option<u64>,
    /// RFC 3339.
    #[serde(default)]
    pub scheduled_start: Option<String>,
}

/// It parses an optional RFC 3339 date.
///
/// # Errors
///
/// Will return a message for the client if the date is not valid.
pub fn parse_scheduled_start(value: Option<&str>) -> Result<Option<DurationSinceUnixEpoch>, String> {
    value
        .map(|date| {
            convert_from_rfc_3339_to_timestamp(date)
                .ok_or_else(|| format!("Invalid scheduled_start {date:?}, expected an RFC 3339 date"))
        })
        .transpose()
}
