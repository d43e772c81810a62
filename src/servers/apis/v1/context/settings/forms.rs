//! Query parameters of the [`settings`](crate::servers::apis::v1::context::settings)
//! API context.
use serde::Deserialize;
use torrust_transfer_manager_primitives::SpeedLimits;

use crate::servers::apis::empty_string_as_none;

#[derive(Deserialize, Debug, Default)]
pub struct GlobalLimitsParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub download_limit: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub upload_limit: Option<u64>,
}

impl From<GlobalLimitsParams> for SpeedLimits {
    fn from(params: GlobalLimitsParams) -> Self {
        SpeedLimits::new(params.download_limit, params.upload_limit)
    }
}
