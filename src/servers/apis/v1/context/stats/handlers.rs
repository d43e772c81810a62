//! API handlers for the [`stats`](crate::servers::apis::v1::context::stats)
//! API context.
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};

use super::responses::stats_response;
use crate::core::services::statistics::get_metrics;
use crate::core::Manager;
use crate::servers::apis::v1::responses::error_response;

/// It handles the request to get the transfer statistics.
///
/// It returns a `200` response with a json [`Stats`](crate::servers::apis::v1::context::stats::resources::Stats)
/// or a `500` if the store is unavailable.
pub async fn get_stats_handler(State(manager): State<Arc<Manager>>) -> Response {
    match get_metrics(&manager) {
        Ok(metrics) => stats_response(metrics).into_response(),
        Err(err) => error_response(&err),
    }
}
