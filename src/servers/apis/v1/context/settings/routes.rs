//! API routes for the [`settings`](crate::servers::apis::v1::context::settings) API context.
use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use super::handlers::set_global_limits_handler;
use crate::core::Manager;

/// It adds the routes to the router for the [`settings`](crate::servers::apis::v1::context::settings) API context.
pub fn add(prefix: &str, router: Router, manager: Arc<Manager>) -> Router {
    router.route(
        &format!("{prefix}/settings/global-limits"),
        post(set_global_limits_handler).with_state(manager),
    )
}
