//! The transfer manager REST API, with the push channel.
//!
//! > **NOTICE**: This API should not be exposed directly to the internet, it
//! > has no authentication. It is intended for a trusted local frontend.
//!
//! Endpoints for the latest API: [v1].
//!
//! # Configuration
//!
//! The configuration file has a [`[http_api]`](torrust_transfer_manager_configuration::HttpApi)
//! section with the address the API binds to, and a
//! [`[push]`](torrust_transfer_manager_configuration::Push) section for the
//! push channel.
//!
//! ```toml
//! [http_api]
//! bind_address = "127.0.0.1:1212"
//!
//! [push]
//! subscriber_capacity = 16
//! send_timeout_ms = 1000
//! ```
//!
//! When you run the manager you will see the following message:
//!
//! ```text
//! 2026-10-18T10:02:43.412093Z  INFO API: Starting on: http://127.0.0.1:1212
//! ```
//!
//! You can test the API with `curl`:
//!
//! ```bash
//! $ curl -s "http://127.0.0.1:1212/api/v1/stats"
//! ```
//!
//! # Errors
//!
//! Failed requests get a JSON body with the error kind and a human readable
//! message:
//!
//! ```json
//! {
//!   "kind": "not_found",
//!   "message": "Transfer not found: 6a8c5e4e-3a1b-4c47-9b5e-6a4a1c0f3a11, src/core/mod.rs:218:30"
//! }
//! ```
//!
//! Kind | Status
//! ---|---
//! `invalid_request` | 400
//! `invalid_metadata` | 400
//! `not_found` | 404
//! `engine_rejected` | 500
//! `store_unavailable` | 500
//!
//! # Health check
//!
//! `GET /api/health_check` returns `{"status":"Ok"}` while the server is up.
//!
//! # Versioning
//!
//! All the endpoints live under `/api/v1`.
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

pub mod routes;
pub mod server;
pub mod v1;

pub const API_LOG_TARGET: &str = "API";

/// Serde deserialization decorator to map empty Strings to None.
///
/// # Errors
///
/// Will return the error of the inner `FromStr` if the value can not be parsed.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}
