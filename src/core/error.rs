//! Errors returned by the core [`Manager`](crate::core::Manager).
//!
//! Error | HTTP | Description
//! ---|---|---
//! `InvalidMetadata` | 400 | The uploaded file is not a `.torrent` descriptor, or it can not be parsed.
//! `NotFound` | 404 | There is no transfer with that id (in the registry for mutations, in the store for reads).
//! `EngineRejected` | 500 | The engine refused the transfer. The durable record is kept as an orphan.
//! `StoreUnavailable` | 500 | The database could not be used.
//!
//! An invalid engine handle is never returned to callers: the supervisor
//! handles it by dropping the transfer from the registry.
use std::panic::Location;

use torrust_transfer_manager_primitives::TransferId;

use super::databases;
use super::engine::adapter::CreateError;
use super::engine::{metainfo, pool};

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("Invalid transfer descriptor: {reason}, {location}")]
    InvalidMetadata {
        reason: String,
        location: &'static Location<'static>,
    },

    #[error("Transfer not found: {id}, {location}")]
    NotFound {
        id: TransferId,
        location: &'static Location<'static>,
    },

    #[error("The engine rejected the transfer {id}: {reason}")]
    EngineRejected { id: TransferId, reason: String },

    #[error("The transfer store is unavailable: {source}")]
    StoreUnavailable { source: databases::error::Error },
}

impl Error {
    #[track_caller]
    pub(crate) fn invalid_metadata(reason: impl Into<String>) -> Self {
        Error::InvalidMetadata {
            reason: reason.into(),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub(crate) fn not_found(id: &TransferId) -> Self {
        Error::NotFound {
            id: id.clone(),
            location: Location::caller(),
        }
    }

    pub(crate) fn engine_rejected(id: &TransferId, reason: &impl ToString) -> Self {
        Error::EngineRejected {
            id: id.clone(),
            reason: reason.to_string(),
        }
    }

    /// The machine readable error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidMetadata { .. } => "invalid_metadata",
            Error::NotFound { .. } => "not_found",
            Error::EngineRejected { .. } => "engine_rejected",
            Error::StoreUnavailable { .. } => "store_unavailable",
        }
    }
}

impl From<databases::error::Error> for Error {
    fn from(source: databases::error::Error) -> Self {
        Error::StoreUnavailable { source }
    }
}

impl From<metainfo::ParseError> for Error {
    #[track_caller]
    fn from(err: metainfo::ParseError) -> Self {
        Error::invalid_metadata(err.to_string())
    }
}

/// Errors attaching a new transfer, for the transfer `id`.
pub(crate) fn from_create_error(id: &TransferId, err: &CreateError) -> Error {
    match err {
        CreateError::InvalidMetadata { source } => Error::invalid_metadata(source.to_string()),
        CreateError::EngineRejected { source } => Error::engine_rejected(id, source),
    }
}

pub(crate) fn from_pool_error(id: &TransferId, err: &pool::Error) -> Error {
    Error::engine_rejected(id, err)
}
