//! **Torrust Transfer Manager** is a service that manages peer-to-peer
//! downloads on behalf of a web frontend.
//!
//! A client uploads a `.torrent` descriptor, the manager attaches it to a
//! transfer engine and keeps a durable record of it. A periodic supervisor
//! reads the engine state, derives a normalized status for every transfer,
//! persists it and pushes it to the subscribed clients.
//!
//! # Table of contents
//!
//! - [Features](#features)
//! - [Services](#services)
//! - [Installation](#installation)
//! - [Configuration](#configuration)
//! - [Usage](#usage)
//! - [Components](#components)
//!
//! # Features
//!
//! - Create transfers from uploaded descriptors, optionally with speed caps
//!   and a scheduled start.
//! - Pause, resume, re-limit and delete transfers.
//! - Session-wide speed limits.
//! - Durable transfer records in `SQLite`.
//! - Aggregated statistics.
//! - Live updates over a WebSocket.
//!
//! # Services
//!
//! From the end-user perspective the manager exposes one HTTP service:
//!
//! - The [REST API](crate::servers::apis), with the push channel at `/api/v1/ws`.
//!
//! # Installation
//!
//! ```text
//! git clone https://github.com/torrust/torrust-transfer-manager.git \
//!   && cd torrust-transfer-manager \
//!   && cargo build --release \
//!   && mkdir -p ./storage/transfer-manager/lib/database \
//!   && mkdir -p ./storage/transfer-manager/downloads
//! ```
//!
//! # Configuration
//!
//! The default configuration is loaded from
//! `./share/default/config/transfer-manager.development.sqlite3.toml`. A
//! different file can be given with the env var
//! `TORRUST_TRANSFER_MANAGER_CONFIG_TOML_PATH`, or the whole TOML document
//! with `TORRUST_TRANSFER_MANAGER_CONFIG_TOML`:
//!
//! ```text
//! TORRUST_TRANSFER_MANAGER_CONFIG_TOML=$(cat ./transfer-manager.toml) cargo run
//! ```
//!
//! Single options can be overridden with env vars, for example:
//!
//! ```text
//! TORRUST_TRANSFER_MANAGER_CONFIG_OVERRIDE_HTTP_API__BIND_ADDRESS=0.0.0.0:1212 cargo run
//! ```
//!
//! Refer to the [configuration crate documentation](https://docs.rs/torrust-transfer-manager-configuration)
//! for all the options.
//!
//! # Usage
//!
//! ```text
//! cargo run
//! ```
//!
//! Create a transfer:
//!
//! ```text
//! curl -F "file=@ubuntu-24.04.torrent" http://127.0.0.1:1212/api/v1/transfers
//! ```
//!
//! # Components
//!
//! ```text
//! HTTP API ---> Manager ------+------------> Database
//!                  |          |                 ^
//!                  v          v                 |
//!               Adapter    Registry <------ Supervisor ---> Broadcaster ---> WebSocket clients
//!                  |                            |
//!                  v                            |
//!               Engine <------------------------+ (status reads)
//! ```
//!
//! - [`core`]: the domain. The [`Manager`](crate::core::Manager) runs the
//!   control operations, the [`Supervisor`](crate::core::supervisor::Supervisor)
//!   reconciles the engine state.
//! - [`servers`]: the delivery layer.
//! - [`bootstrap`] and [`app`]: the application setup and its jobs.
pub mod app;
pub mod bootstrap;
pub mod core;
pub mod servers;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = torrust_transfer_manager_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = torrust_transfer_manager_clock::clock::Stopped;
