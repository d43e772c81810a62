//! API context: `transfer`.
//!
//! This API context is responsible for creating, listing and controlling
//! transfers.
//!
//! # Endpoints
//!
//! - [Create a transfer](#create-a-transfer)
//! - [List transfers](#list-transfers)
//! - [Get a transfer](#get-a-transfer)
//! - [Pause or resume a transfer](#pause-or-resume-a-transfer)
//! - [Update a transfer](#update-a-transfer)
//! - [Delete a transfer](#delete-a-transfer)
//!
//! # Create a transfer
//!
//! `POST /transfers`
//!
//! The descriptor is uploaded as a multipart form with a single `file` field.
//! The file name must end with `.torrent`.
//!
//! **Query parameters**
//!
//! Name | Type | Description | Required | Example
//! ---|---|---|---|---
//! `download_limit` | positive integer | Download cap in bytes per second | No | `1048576`
//! `upload_limit` | positive integer | Upload cap in bytes per second | No | `262144`
//! `scheduled_start` | RFC 3339 date | The transfer starts paused if this is in the future | No | `2026-10-18T12:00:00Z`
//!
//! **Example request**
//!
//! ```bash
//! curl -F "file=@ubuntu-24.04.torrent" "http://127.0.0.1:1212/api/v1/transfers?download_limit=1048576"
//! ```
//!
//! **Example response** `200`
//!
//! ```json
//! {
//!   "id": "6a8c5e4e-3a1b-4c47-9b5e-6a4a1c0f3a11",
//!   "name": "ubuntu-24.04-desktop-amd64.iso",
//!   "size": 6114656256,
//!   "progress": 0.0,
//!   "download_rate": 0,
//!   "upload_rate": 0,
//!   "eta": "unknown",
//!   "status": "queued",
//!   "created_at": "2026-10-18T10:02:43Z",
//!   "completed_at": null,
//!   "file_path": "./storage/transfer-manager/downloads",
//!   "download_speed_limit": 1048576,
//!   "upload_speed_limit": null,
//!   "scheduled_start": null,
//!   "num_peers": 0,
//!   "num_seeds": 0,
//!   "error": null,
//!   "last_polled_at": null,
//!   "stale": false
//! }
//! ```
//!
//! If the engine rejects the transfer the response is a `500`
//! `engine_rejected` error, and the record is kept so it can be deleted.
//!
//! # List transfers
//!
//! `GET /transfers`
//!
//! It returns all the stored transfers, most recently created first. Refer to
//! [`Transfer`](resources::Transfer) for the fields.
//!
//! # Get a transfer
//!
//! `GET /transfers/{id}`
//!
//! # Pause or resume a transfer
//!
//! `POST /transfers/{id}/pause` and `POST /transfers/{id}/resume`
//!
//! **Example response** `200`
//!
//! ```json
//! {
//!   "status": "ok"
//! }
//! ```
//!
//! Transfers the engine does not have (orphans) get a `404`.
//!
//! # Update a transfer
//!
//! `PUT /transfers/{id}` with a JSON body. Only the provided fields change.
//!
//! ```json
//! {
//!   "download_speed_limit": 524288,
//!   "upload_speed_limit": null,
//!   "scheduled_start": "2026-10-18T12:00:00Z"
//! }
//! ```
//!
//! # Delete a transfer
//!
//! `DELETE /transfers/{id}`
//!
//! It removes the transfer from the engine, if attached, and deletes the
//! record. Deleting an unknown id succeeds.
pub mod forms;
pub mod handlers;
pub mod resources;
pub mod responses;
pub mod routes;
