//! Route initialization for the v1 API.
use std::sync::Arc;

use axum::Router;

use super::context::{push, settings, stats, transfer};
use crate::core::Manager;

/// Add the routes for the v1 API.
pub fn add(prefix: &str, router: Router, manager: Arc<Manager>) -> Router {
    let v1_prefix = format!("{prefix}/v1");

    let router = transfer::routes::add(&v1_prefix, router, manager.clone());
    let router = stats::routes::add(&v1_prefix, router, manager.clone());
    let router = settings::routes::add(&v1_prefix, router, manager.clone());
    push::routes::add(&v1_prefix, router, manager)
}
