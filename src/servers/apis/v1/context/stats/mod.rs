//! Transfer statistics API context.
//!
//! # Endpoints
//!
//! - [Get transfer statistics](#get-transfer-statistics)
//!
//! # Get transfer statistics
//!
//! `GET /stats`
//!
//! The counters cover every stored transfer, including the ones the engine
//! does not have. The rates are the sum of the rates of the attached
//! transfers in the last supervisor tick.
//!
//! **Example request**
//!
//! ```bash
//! curl "http://127.0.0.1:1212/api/v1/stats"
//! ```
//!
//! **Example response** `200`
//!
//! ```json
//! {
//!   "total_count": 3,
//!   "active_count": 1,
//!   "completed_count": 2,
//!   "total_bytes": 7340032,
//!   "global_download_rate": 524288,
//!   "global_upload_rate": 65536
//! }
//! ```
//!
//! **Resource**
//!
//! Refer to the API [`Stats`](crate::servers::apis::v1::context::stats::resources::Stats)
//! resource for more information about the response attributes.
pub mod handlers;
pub mod resources;
pub mod responses;
pub mod routes;
