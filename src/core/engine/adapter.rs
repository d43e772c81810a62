//! The typed wrapper the manager uses to drive the engine.
//!
//! It hides the engine specific types from the rest of the core and it
//! owns the policy around the raw session calls:
//!
//! - Descriptors are parsed and validated before they reach the engine.
//! - Limits are applied atomically with the creation of the transfer.
//! - A limit of `0` removes the cap.
//! - A transfer whose scheduled start is in the future is attached paused.
//! - Every new transfer asks its trackers for peers right away.
//! - Pause, resume, remove and limit changes are fire-and-forget. A failure is
//!   logged and otherwise ignored: the supervisor will notice a transfer the
//!   engine dropped on its next tick.
use std::sync::Arc;

use camino::Utf8Path;
use torrust_transfer_manager_clock::clock::Time;
use torrust_transfer_manager_primitives::{DurationSinceUnixEpoch, EngineHandle, SpeedLimits};

use super::metainfo::{Metainfo, ParseError};
use super::{AddParams, Engine, Status, ENGINE_LOG_TARGET};
use crate::CurrentClock;

/// Options for a new transfer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct CreateOptions {
    pub limits: SpeedLimits,
    pub scheduled_start: Option<DurationSinceUnixEpoch>,
}

impl CreateOptions {
    /// Whether the transfer must be attached paused.
    #[must_use]
    pub fn starts_paused(&self) -> bool {
        self.scheduled_start.is_some_and(|start| CurrentClock::is_future(&start))
    }
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum CreateError {
    #[error("invalid transfer descriptor: {source}")]
    InvalidMetadata { source: ParseError },

    #[error("the engine rejected the transfer: {source}")]
    EngineRejected { source: super::Error },
}

pub struct Adapter {
    engine: Arc<dyn Engine>,
}

impl Adapter {
    #[must_use]
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// It attaches a new transfer to the engine.
    ///
    /// # Errors
    ///
    /// Will return [`CreateError::InvalidMetadata`] if `raw` is not a valid
    /// descriptor and [`CreateError::EngineRejected`] if the engine refuses it.
    pub fn create(&self, raw: &[u8], save_path: &Utf8Path, options: &CreateOptions) -> Result<EngineHandle, CreateError> {
        let metainfo = Metainfo::from_bytes(raw).map_err(|source| CreateError::InvalidMetadata { source })?;

        let name = metainfo.name().to_owned();
        let paused = options.starts_paused();

        let handle = self
            .engine
            .add(AddParams {
                metainfo,
                save_path: save_path.to_owned(),
                paused,
                limits: SpeedLimits::new(
                    options.limits.download.and_then(cap),
                    options.limits.upload.and_then(cap),
                ),
            })
            .map_err(|source| CreateError::EngineRejected { source })?;

        if let Err(err) = self.engine.force_reannounce(handle) {
            tracing::warn!(target: ENGINE_LOG_TARGET, %handle, %err, "Adapter::create (re-announce failed)");
        }

        tracing::info!(target: ENGINE_LOG_TARGET, %handle, %name, paused, "Adapter::create (attached)");

        Ok(handle)
    }

    pub fn pause(&self, handle: EngineHandle) {
        if let Err(err) = self.engine.pause(handle) {
            tracing::warn!(target: ENGINE_LOG_TARGET, %handle, %err, "Adapter::pause (ignored)");
        }
    }

    pub fn resume(&self, handle: EngineHandle) {
        if let Err(err) = self.engine.resume(handle) {
            tracing::warn!(target: ENGINE_LOG_TARGET, %handle, %err, "Adapter::resume (ignored)");
        }
    }

    pub fn remove(&self, handle: EngineHandle) {
        match self.engine.remove(handle) {
            Ok(()) => tracing::info!(target: ENGINE_LOG_TARGET, %handle, "Adapter::remove (detached)"),
            Err(err) => tracing::warn!(target: ENGINE_LOG_TARGET, %handle, %err, "Adapter::remove (ignored)"),
        }
    }

    /// It changes only the limits that are set in `limits`.
    pub fn set_limits(&self, handle: EngineHandle, limits: &SpeedLimits) {
        if let Some(download) = limits.download {
            if let Err(err) = self.engine.set_download_limit(handle, cap(download)) {
                tracing::warn!(target: ENGINE_LOG_TARGET, %handle, %err, "Adapter::set_limits (download limit ignored)");
            }
        }

        if let Some(upload) = limits.upload {
            if let Err(err) = self.engine.set_upload_limit(handle, cap(upload)) {
                tracing::warn!(target: ENGINE_LOG_TARGET, %handle, %err, "Adapter::set_limits (upload limit ignored)");
            }
        }
    }

    /// It reads the cached engine status of one transfer.
    ///
    /// # Errors
    ///
    /// Will return [`super::Error::InvalidHandle`] if the engine no longer
    /// knows the handle.
    pub fn snapshot(&self, handle: EngineHandle) -> Result<Status, super::Error> {
        self.engine.status(handle)
    }

    /// It changes the session wide caps that are set in `limits`.
    pub fn set_global_limits(&self, limits: &SpeedLimits) {
        let mut settings = self.engine.settings();

        if let Some(download) = limits.download {
            settings.download_rate_limit = cap(download);
        }

        if let Some(upload) = limits.upload {
            settings.upload_rate_limit = cap(upload);
        }

        self.engine.apply_settings(settings);

        tracing::info!(target: ENGINE_LOG_TARGET, ?settings, "Adapter::set_global_limits (applied)");
    }

    /// The session wide caps currently in force. `None` is unlimited.
    #[must_use]
    pub fn global_limits(&self) -> SpeedLimits {
        let settings = self.engine.settings();

        SpeedLimits::new(settings.download_rate_limit, settings.upload_rate_limit)
    }
}

/// A zero limit means no limit.
fn cap(limit: u64) -> Option<u64> {
    (limit > 0).then_some(limit)
}
