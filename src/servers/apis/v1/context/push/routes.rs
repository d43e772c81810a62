//! API routes for the [`push`](crate::servers::apis::v1::context::push) API context.
use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use super::handlers::push_handler;
use crate::core::Manager;

/// It adds the routes to the router for the [`push`](crate::servers::apis::v1::context::push) API context.
pub fn add(prefix: &str, router: Router, manager: Arc<Manager>) -> Router {
    router.route(&format!("{prefix}/ws"), get(push_handler).with_state(manager))
}
