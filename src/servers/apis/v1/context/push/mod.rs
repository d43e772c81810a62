//! Push channel API context.
//!
//! `GET /ws` upgrades the connection to a WebSocket. From then on the server
//! sends one text frame per supervisor tick with the snapshots of all the
//! attached transfers:
//!
//! ```json
//! {
//!   "type": "transfer_update",
//!   "snapshots": {
//!     "6a8c5e4e-3a1b-4c47-9b5e-6a4a1c0f3a11": {
//!       "progress": 42.5,
//!       "download_rate": 524288,
//!       "upload_rate": 65536,
//!       "status": "downloading",
//!       "eta": "0:01:10",
//!       "num_peers": 12,
//!       "num_seeds": 4,
//!       "total_download": 2598371328,
//!       "total_upload": 10485760,
//!       "error": null
//!     }
//!   }
//! }
//! ```
//!
//! Frames sent by the client are read and ignored. The server never sends
//! error frames: a client that does not keep up, or a send that does not
//! finish within the configured `send_timeout`, closes the channel. Clients
//! are expected to reconnect and read the full state from the REST endpoints.
pub mod handlers;
pub mod routes;
