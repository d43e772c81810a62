//! The registry of live transfers.
//!
//! It maps a [`TransferId`](torrust_transfer_manager_primitives::TransferId)
//! to the engine handle the transfer is attached to, plus the snapshot the
//! supervisor derived for it in the last tick. It is the single source of
//! truth for "which transfers exist in the engine right now".
//!
//! The durable record of a transfer lives in the database. A transfer that is
//! in the database but not in the registry is an orphan: it was never attached
//! to the engine, or the engine dropped it.
use repository::rw_lock_std::RwLockStd;

pub mod entry;
pub mod repository;

// Transfer Entry

pub type EntrySingle = entry::Transfer;

// Repos

pub type TransfersRwLockStd = RwLockStd<EntrySingle>;

/// The registry used by the application.
pub type Registry = TransfersRwLockStd;
