//! Testing helpers for [Torrust Transfer Manager](https://docs.rs/torrust-transfer-manager).
//!
//! A collection of functions and types to help with testing the transfer
//! manager application and its packages.
pub mod configuration;
pub mod random;
