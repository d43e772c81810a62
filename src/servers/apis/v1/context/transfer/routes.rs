//! API routes for the [`transfer`](crate::servers::apis::v1::context::transfer) API context.
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_transfer_handler, delete_transfer_handler, get_transfer_handler, get_transfers_handler, pause_transfer_handler,
    resume_transfer_handler, update_transfer_handler,
};
use crate::core::Manager;

/// It adds the routes to the router for the [`transfer`](crate::servers::apis::v1::context::transfer) API context.
pub fn add(prefix: &str, router: Router, manager: Arc<Manager>) -> Router {
    router
        .route(
            &format!("{prefix}/transfers"),
            get(get_transfers_handler)
                .post(create_transfer_handler)
                .with_state(manager.clone()),
        )
        .route(
            &format!("{prefix}/transfers/{{id}}"),
            get(get_transfer_handler)
                .put(update_transfer_handler)
                .delete(delete_transfer_handler)
                .with_state(manager.clone()),
        )
        .route(
            &format!("{prefix}/transfers/{{id}}/pause"),
            post(pause_transfer_handler).with_state(manager.clone()),
        )
        .route(
            &format!("{prefix}/transfers/{{id}}/resume"),
            post(resume_transfer_handler).with_state(manager),
        )
}
