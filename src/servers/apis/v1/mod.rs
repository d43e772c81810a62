//! The API version `v1`.
//!
//! The API is organized in the following contexts:
//!
//! Context | Description | Version
//! ---|---|---
//! `Transfer` | Create, list and control transfers | [`v1`](crate::servers::apis::v1::context::transfer)
//! `Stats` | Transfer counters and global rates | [`v1`](crate::servers::apis::v1::context::stats)
//! `Settings` | Session-wide speed limits | [`v1`](crate::servers::apis::v1::context::settings)
//! `Push` | Live transfer updates over a WebSocket | [`v1`](crate::servers::apis::v1::context::push)
//!
//! Health check is not versioned: [`health_check`](crate::servers::apis::v1::context::health_check).
pub mod context;
pub mod responses;
pub mod routes;
