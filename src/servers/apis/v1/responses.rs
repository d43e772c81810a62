//! Common responses for the API v1 shared by all the contexts.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::core::error::Error;

/// Response status used when requests have only two possible results
/// `Ok` or `Error` and no data is returned.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionStatus {
    Ok,
}

/// The body of every failed request.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

// OK response

/// `200` response with `{"status":"ok"}`.
#[must_use]
pub fn ok_response() -> Response {
    (StatusCode::OK, Json(ActionStatus::Ok)).into_response()
}

// Error responses

/// The response for a failed core operation.
#[must_use]
pub fn error_response(err: &Error) -> Response {
    let status = match err {
        Error::InvalidMetadata { .. } => StatusCode::BAD_REQUEST,
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::EngineRejected { .. } | Error::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    json_error_response(status, err.kind(), &err.to_string())
}

/// `400` response for requests that can not be understood, before any core
/// operation runs.
#[must_use]
pub fn invalid_request_response(message: &str) -> Response {
    json_error_response(StatusCode::BAD_REQUEST, "invalid_request", message)
}

/// `404` response for an id that can not be a transfer id.
#[must_use]
pub fn invalid_transfer_id_param_response(id: &str) -> Response {
    json_error_response(StatusCode::NOT_FOUND, "not_found", &format!("Transfer not found: {id:?}"))
}

fn json_error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            kind: kind.to_owned(),
            message: message.to_owned(),
        }),
    )
        .into_response()
}
