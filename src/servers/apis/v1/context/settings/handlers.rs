//! API handlers for the [`settings`](crate::servers::apis::v1::context::settings)
//! API context.
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use torrust_transfer_manager_primitives::SpeedLimits;

use super::forms::GlobalLimitsParams;
use crate::core::Manager;
use crate::servers::apis::v1::responses::{invalid_request_response, ok_response};

/// It handles the request to change the session-wide speed limits.
///
/// It returns `200` with `{"status":"ok"}` or `400` if a limit is not a
/// positive integer.
pub async fn set_global_limits_handler(
    State(manager): State<Arc<Manager>>,
    params: Result<Query<GlobalLimitsParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return invalid_request_response(&rejection.body_text()),
    };

    manager.set_global_limits(&SpeedLimits::from(params));

    ok_response()
}
