//! API routes for the [`stats`](crate::servers::apis::v1::context::stats) API context.
use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use super::handlers::get_stats_handler;
use crate::core::Manager;

/// It adds the routes to the router for the [`stats`](crate::servers::apis::v1::context::stats) API context.
pub fn add(prefix: &str, router: Router, manager: Arc<Manager>) -> Router {
    router.route(&format!("{prefix}/stats"), get(get_stats_handler).with_state(manager))
}
