//! Settings API context.
//!
//! # Endpoints
//!
//! - [Set the global limits](#set-the-global-limits)
//!
//! # Set the global limits
//!
//! `POST /settings/global-limits`
//!
//! It changes the session-wide speed caps of the engine. Only the provided
//! limits change. `0` removes a cap. The change is not persisted: on restart
//! the limits in the configuration apply again.
//!
//! **Query parameters**
//!
//! Name | Type | Description | Required | Example
//! ---|---|---|---|---
//! `download_limit` | positive integer | Download cap in bytes per second | No | `1048576`
//! `upload_limit` | positive integer | Upload cap in bytes per second | No | `262144`
//!
//! **Example request**
//!
//! ```bash
//! curl -X POST "http://127.0.0.1:1212/api/v1/settings/global-limits?download_limit=1048576"
//! ```
//!
//! **Example response** `200`
//!
//! ```json
//! {
//!   "status": "ok"
//! }
//! ```
pub mod forms;
pub mod handlers;
pub mod routes;
