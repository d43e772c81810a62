//! API responses for the [`stats`](crate::servers::apis::v1::context::stats)
//! API context.
use axum::response::Json;

use super::resources::Stats;
use crate::core::services::statistics::TransferMetrics;

/// `200` response that contains the [`Stats`] resource as json.
#[must_use]
pub fn stats_response(metrics: TransferMetrics) -> Json<Stats> {
    Json(Stats::from(metrics))
}
