//! API routes.
//!
//! It loads all the API routes for all API versions and adds the common
//! layers: compression, request ids, tracing and CORS.
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::propagate_header::PropagateHeaderLayer;
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{Level, Span};
use uuid::Uuid;

use super::v1;
use super::v1::context::health_check::handlers::health_check_handler;
use super::API_LOG_TARGET;
use crate::core::Manager;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Add all API routes to the router.
#[allow(clippy::needless_pass_by_value)]
pub fn router(manager: Arc<Manager>) -> Router {
    let api_url_prefix = "/api";

    v1::routes::add(api_url_prefix, Router::new(), manager)
        .route(&format!("{api_url_prefix}/health_check"), get(health_check_handler))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(PropagateHeaderLayer::new(HeaderName::from_static(REQUEST_ID_HEADER)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(|request: &Request<axum::body::Body>, _span: &Span| {
                    tracing::debug!(
                        target: API_LOG_TARGET,
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = request_id(request.headers()),
                        "request"
                    );
                })
                .on_response(|response: &Response, latency: Duration, _span: &Span| {
                    tracing::debug!(
                        target: API_LOG_TARGET,
                        status = %response.status(),
                        latency_ms = latency.as_millis(),
                        request_id = request_id(response.headers()),
                        "response"
                    );
                }),
        )
        .layer(SetRequestIdLayer::x_request_id(RequestIdGenerator))
}

fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// A random UUID for every request that does not bring its own.
#[derive(Clone, Default)]
struct RequestIdGenerator;

impl MakeRequestId for RequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string()).ok().map(RequestId::new)
    }
}
