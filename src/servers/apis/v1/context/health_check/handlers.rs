//! API handlers for the health check endpoint.
use axum::Json;

use super::resources::{Report, Status};

/// It always returns a `200` with `{"status":"Ok"}`.
pub async fn health_check_handler() -> Json<Report> {
    Json(Report { status: Status::Ok })
}
