//! API is organized in resource groups called contexts.
//!
//! Each context is a module that contains the API endpoints related to a
//! specific resource group.
pub mod health_check;
pub mod push;
pub mod settings;
pub mod stats;
pub mod transfer;
