//! Integration tests.
//!
//! ```text
//! cargo test --test integration
//! ```
mod common;
mod servers;
