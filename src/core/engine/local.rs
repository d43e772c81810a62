//! The bundled engine.
//!
//! `LocalSession` keeps the session state of every attached transfer in
//! memory. It does not speak the peer wire protocol: it only knows what is
//! already on disk under the save root when a transfer is attached. A
//! transfer whose payload is fully present is reported as seeding, any other
//! transfer as downloading without progress.
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use camino::Utf8Path;
use torrust_transfer_manager_primitives::{EngineHandle, SpeedLimits};

use super::metainfo::Metainfo;
use super::{AddParams, Engine, Error, SessionSettings, State, Status, ENGINE_LOG_TARGET};

#[derive(Debug)]
struct Attached {
    info: Vec<u8>,
    name: String,
    paused: bool,
    limits: SpeedLimits,
    total_size: u64,
    present: u64,
    announces: u64,
}

impl Attached {
    fn is_complete(&self) -> bool {
        self.present >= self.total_size
    }

    #[allow(clippy::cast_precision_loss)]
    fn progress(&self) -> f64 {
        if self.total_size == 0 {
            return 1.0;
        }

        self.present as f64 / self.total_size as f64
    }

    fn status(&self) -> Status {
        let complete = self.is_complete();

        Status {
            state: if complete { State::Seeding } else { State::Downloading },
            progress: self.progress(),
            total_wanted: self.total_size.saturating_sub(self.present),
            paused: self.paused,
            is_seeding: complete,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct LocalSession {
    last_handle: AtomicU64,
    transfers: RwLock<BTreeMap<EngineHandle, Attached>>,
    settings: RwLock<SessionSettings>,
}

impl LocalSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get_transfers(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<EngineHandle, Attached>> {
        self.transfers.read().expect("it should get the read lock")
    }

    fn get_transfers_mut(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<EngineHandle, Attached>> {
        self.transfers.write().expect("it should get the write lock")
    }

    fn with_transfer<T>(&self, handle: EngineHandle, f: impl FnOnce(&mut Attached) -> T) -> Result<T, Error> {
        let mut transfers = self.get_transfers_mut();

        let attached = transfers.get_mut(&handle).ok_or_else(|| Error::invalid_handle(handle))?;

        Ok(f(attached))
    }
}

/// Bytes of the payload that are already on disk with their final size.
fn bytes_present(metainfo: &Metainfo, save_path: &Utf8Path) -> u64 {
    metainfo
        .files()
        .into_iter()
        .filter(|(path, length)| {
            std::fs::metadata(save_path.join(path)).is_ok_and(|meta| meta.is_file() && meta.len() == *length)
        })
        .map(|(_, length)| length)
        .sum()
}

impl Engine for LocalSession {
    fn add(&self, params: AddParams) -> Result<EngineHandle, Error> {
        let info = params.metainfo.info_bytes().map_err(|err| Error::Rejected {
            reason: err.to_string(),
            location: std::panic::Location::caller(),
        })?;

        let name = params.metainfo.name().to_owned();

        if self.get_transfers().values().any(|attached| attached.info == info) {
            return Err(Error::Duplicate {
                name,
                location: std::panic::Location::caller(),
            });
        }

        std::fs::create_dir_all(&params.save_path)?;

        let attached = Attached {
            info,
            name,
            paused: params.paused,
            limits: params.limits,
            total_size: params.metainfo.total_size(),
            present: bytes_present(&params.metainfo, &params.save_path),
            announces: 0,
        };

        let mut transfers = self.get_transfers_mut();

        // Checked again: another add may have won the race while the files were checked.
        if transfers.values().any(|other| other.info == attached.info) {
            return Err(Error::Duplicate {
                name: attached.name,
                location: std::panic::Location::caller(),
            });
        }

        let handle = EngineHandle(self.last_handle.fetch_add(1, Ordering::Relaxed) + 1);

        tracing::debug!(
            target: ENGINE_LOG_TARGET,
            %handle,
            name = %attached.name,
            present = attached.present,
            total = attached.total_size,
            "LocalSession::add"
        );

        transfers.insert(handle, attached);

        Ok(handle)
    }

    fn pause(&self, handle: EngineHandle) -> Result<(), Error> {
        self.with_transfer(handle, |attached| attached.paused = true)
    }

    fn resume(&self, handle: EngineHandle) -> Result<(), Error> {
        self.with_transfer(handle, |attached| attached.paused = false)
    }

    fn remove(&self, handle: EngineHandle) -> Result<(), Error> {
        self.get_transfers_mut()
            .remove(&handle)
            .map(|_| ())
            .ok_or_else(|| Error::invalid_handle(handle))
    }

    fn set_download_limit(&self, handle: EngineHandle, limit: Option<u64>) -> Result<(), Error> {
        self.with_transfer(handle, |attached| attached.limits.download = limit)
    }

    fn set_upload_limit(&self, handle: EngineHandle, limit: Option<u64>) -> Result<(), Error> {
        self.with_transfer(handle, |attached| attached.limits.upload = limit)
    }

    fn force_reannounce(&self, handle: EngineHandle) -> Result<(), Error> {
        let announces = self.with_transfer(handle, |attached| {
            attached.announces += 1;
            attached.announces
        })?;

        tracing::debug!(target: ENGINE_LOG_TARGET, %handle, announces, "LocalSession::force_reannounce");

        Ok(())
    }

    fn status(&self, handle: EngineHandle) -> Result<Status, Error> {
        self.get_transfers()
            .get(&handle)
            .map(Attached::status)
            .ok_or_else(|| Error::invalid_handle(handle))
    }

    fn settings(&self) -> SessionSettings {
        *self.settings.read().expect("it should get the read lock")
    }

    fn apply_settings(&self, settings: SessionSettings) {
        *self.settings.write().expect("it should get the write lock") = settings;
    }
}
