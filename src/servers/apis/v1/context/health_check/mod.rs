//! API health check endpoint.
//!
//! It is used to check the API server is up, for example by a container
//! orchestrator. It does not touch the engine nor the store.
//!
//! `GET /api/health_check`
//!
//! ```bash
//! curl "http://127.0.0.1:1212/api/health_check"
//! ```
//!
//! **Example response** `200`
//!
//! ```json
//! {
//!   "status": "Ok"
//! }
//! ```
pub mod handlers;
pub mod resources;
