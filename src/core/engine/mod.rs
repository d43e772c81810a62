//! The transfer engine boundary.
//!
//! The manager never talks to a peer-to-peer engine directly. It goes
//! through the [`Adapter`](crate::core::engine::adapter::Adapter), which wraps
//! any implementation of the [`Engine`] trait: the session primitives of a
//! typical `BitTorrent` session.
//!
//! ```text
//! Manager / Supervisor -> Adapter -> dyn Engine
//!                                     ├── LocalSession  (bundled)
//!                                     └── FixtureEngine (scenario tests)
//! ```
//!
//! Engine implementations must answer [`Engine::status`] from locally cached
//! state only. It is called once per transfer on every supervisor tick.
//!
//! Slow engine calls (`add`, `remove`) are run on the bounded
//! [`WorkerPool`](crate::core::engine::pool::WorkerPool).
pub mod adapter;
pub mod fixture;
pub mod local;
pub mod metainfo;
pub mod pool;

use std::panic::Location;
use std::sync::Arc;

use camino::Utf8PathBuf;
#[cfg(test)]
use mockall::automock;
use torrust_transfer_manager_located_error::{DynError, LocatedError};
use torrust_transfer_manager_primitives::{EngineHandle, SpeedLimits};

use self::metainfo::Metainfo;

pub const ENGINE_LOG_TARGET: &str = "TRANSFER ENGINE";

/// The raw state an engine reports for one of its transfers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    QueuedForChecking,
    CheckingFiles,
    DownloadingMetadata,
    Downloading,
    Finished,
    Seeding,
}

/// The engine view of one transfer.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Status {
    pub state: State,
    /// Fraction from 0 to 1.
    pub progress: f64,
    /// Bytes per second.
    pub download_rate: u64,
    /// Bytes per second.
    pub upload_rate: u64,
    pub num_peers: u32,
    pub num_seeds: u32,
    /// Payload bytes downloaded in this session.
    pub total_download: u64,
    /// Payload bytes uploaded in this session.
    pub total_upload: u64,
    /// Payload bytes still wanted when the transfer was attached.
    pub total_wanted: u64,
    pub paused: bool,
    /// Empty when there is no error.
    pub error: String,
    /// The whole payload is available locally.
    pub is_seeding: bool,
}

/// Session wide rate caps. `None` is unlimited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct SessionSettings {
    pub download_rate_limit: Option<u64>,
    pub upload_rate_limit: Option<u64>,
}

/// What the engine needs to attach a transfer.
#[derive(Clone, Debug, PartialEq)]
pub struct AddParams {
    pub metainfo: Metainfo,
    pub save_path: Utf8PathBuf,
    /// Attach the transfer without starting it.
    pub paused: bool,
    /// Initial per transfer caps. `None` is unlimited.
    pub limits: SpeedLimits,
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("The engine handle {handle} is not valid, {location}")]
    InvalidHandle {
        handle: EngineHandle,
        location: &'static Location<'static>,
    },

    #[error("The engine is already attached to a transfer with the same content: {name:?}, {location}")]
    Duplicate {
        name: String,
        location: &'static Location<'static>,
    },

    #[error("The engine rejected the transfer: {reason}, {location}")]
    Rejected {
        reason: String,
        location: &'static Location<'static>,
    },

    #[error("The engine could not access the save path: {source}")]
    Io {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    #[track_caller]
    #[must_use]
    pub fn invalid_handle(handle: EngineHandle) -> Self {
        Error::InvalidHandle {
            handle,
            location: Location::caller(),
        }
    }

    #[must_use]
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Error::InvalidHandle { .. })
    }
}

impl From<std::io::Error> for Error {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

/// The session primitives of a peer-to-peer engine.
#[cfg_attr(test, automock)]
pub trait Engine: Send + Sync {
    /// It attaches a new transfer and returns its handle.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the engine refuses the transfer.
    fn add(&self, params: AddParams) -> Result<EngineHandle, Error>;

    /// # Errors
    ///
    /// Will return [`Error::InvalidHandle`] if the handle is unknown.
    fn pause(&self, handle: EngineHandle) -> Result<(), Error>;

    /// # Errors
    ///
    /// Will return [`Error::InvalidHandle`] if the handle is unknown.
    fn resume(&self, handle: EngineHandle) -> Result<(), Error>;

    /// It detaches the transfer. Downloaded files are kept.
    ///
    /// # Errors
    ///
    /// Will return [`Error::InvalidHandle`] if the handle is unknown.
    fn remove(&self, handle: EngineHandle) -> Result<(), Error>;

    /// # Errors
    ///
    /// Will return [`Error::InvalidHandle`] if the handle is unknown.
    fn set_download_limit(&self, handle: EngineHandle, limit: Option<u64>) -> Result<(), Error>;

    /// # Errors
    ///
    /// Will return [`Error::InvalidHandle`] if the handle is unknown.
    fn set_upload_limit(&self, handle: EngineHandle, limit: Option<u64>) -> Result<(), Error>;

    /// It asks the trackers for peers right away.
    ///
    /// # Errors
    ///
    /// Will return [`Error::InvalidHandle`] if the handle is unknown.
    fn force_reannounce(&self, handle: EngineHandle) -> Result<(), Error>;

    /// It reads the cached status of one transfer.
    ///
    /// # Errors
    ///
    /// Will return [`Error::InvalidHandle`] if the handle is unknown.
    fn status(&self, handle: EngineHandle) -> Result<Status, Error>;

    fn settings(&self) -> SessionSettings;

    fn apply_settings(&self, settings: SessionSettings);
}
