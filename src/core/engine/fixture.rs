//! A scriptable engine for scenario tests.
//!
//! Tests attach transfers through the regular [`Engine`] interface and then
//! drive what the engine reports with [`FixtureEngine::set_status`], or make
//! it drop a transfer on its own with [`FixtureEngine::detach`].
use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use torrust_transfer_manager_primitives::{EngineHandle, SpeedLimits};

use super::{AddParams, Engine, Error, SessionSettings, State, Status};

#[derive(Clone, Debug)]
struct Attached {
    name: String,
    status: Status,
    limits: SpeedLimits,
}

#[derive(Debug, Default)]
pub struct FixtureEngine {
    last_handle: AtomicU64,
    transfers: Mutex<BTreeMap<EngineHandle, Attached>>,
    settings: Mutex<SessionSettings>,
    reject_next_add: AtomicBool,
}

impl FixtureEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn transfers(&self) -> std::sync::MutexGuard<'_, BTreeMap<EngineHandle, Attached>> {
        self.transfers.lock().expect("it should lock the fixture transfers")
    }

    /// The next call to `add` fails with [`Error::Rejected`].
    pub fn reject_next_add(&self) {
        self.reject_next_add.store(true, Ordering::SeqCst);
    }

    /// It replaces what the engine reports for `handle`. The paused flag is
    /// kept. It returns `false` if the handle is unknown.
    pub fn set_status(&self, handle: EngineHandle, status: Status) -> bool {
        match self.transfers().get_mut(&handle) {
            Some(attached) => {
                attached.status = Status {
                    paused: attached.status.paused,
                    ..status
                };
                true
            }
            None => false,
        }
    }

    /// The engine forgets the transfer, as if it dropped it on its own.
    pub fn detach(&self, handle: EngineHandle) -> bool {
        self.transfers().remove(&handle).is_some()
    }

    #[must_use]
    pub fn handle_of(&self, name: &str) -> Option<EngineHandle> {
        self.transfers()
            .iter()
            .find(|(_, attached)| attached.name == name)
            .map(|(handle, _)| *handle)
    }

    #[must_use]
    pub fn handles(&self) -> Vec<EngineHandle> {
        self.transfers().keys().copied().collect()
    }

    #[must_use]
    pub fn is_paused(&self, handle: EngineHandle) -> Option<bool> {
        self.transfers().get(&handle).map(|attached| attached.status.paused)
    }

    #[must_use]
    pub fn limits(&self, handle: EngineHandle) -> Option<SpeedLimits> {
        self.transfers().get(&handle).map(|attached| attached.limits)
    }

    fn update(&self, handle: EngineHandle, f: impl FnOnce(&mut Attached)) -> Result<(), Error> {
        let mut transfers = self.transfers();
        let attached = transfers.get_mut(&handle).ok_or_else(|| Error::invalid_handle(handle))?;
        f(attached);
        Ok(())
    }
}

impl Engine for FixtureEngine {
    fn add(&self, params: AddParams) -> Result<EngineHandle, Error> {
        if self.reject_next_add.swap(false, Ordering::SeqCst) {
            return Err(Error::Rejected {
                reason: "rejected by the fixture".to_owned(),
                location: Location::caller(),
            });
        }

        let handle = EngineHandle(self.last_handle.fetch_add(1, Ordering::SeqCst) + 1);

        self.transfers().insert(
            handle,
            Attached {
                name: params.metainfo.name().to_owned(),
                status: Status {
                    paused: params.paused,
                    total_wanted: params.metainfo.total_size(),
                    ..Default::default()
                },
                limits: params.limits,
            },
        );

        Ok(handle)
    }

    fn pause(&self, handle: EngineHandle) -> Result<(), Error> {
        self.update(handle, |attached| attached.status.paused = true)
    }

    fn resume(&self, handle: EngineHandle) -> Result<(), Error> {
        self.update(handle, |attached| attached.status.paused = false)
    }

    fn remove(&self, handle: EngineHandle) -> Result<(), Error> {
        if self.detach(handle) {
            Ok(())
        } else {
            Err(Error::invalid_handle(handle))
        }
    }

    fn set_download_limit(&self, handle: EngineHandle, limit: Option<u64>) -> Result<(), Error> {
        self.update(handle, |attached| attached.limits.download = limit)
    }

    fn set_upload_limit(&self, handle: EngineHandle, limit: Option<u64>) -> Result<(), Error> {
        self.update(handle, |attached| attached.limits.upload = limit)
    }

    fn force_reannounce(&self, handle: EngineHandle) -> Result<(), Error> {
        self.update(handle, |_| ())
    }

    fn status(&self, handle: EngineHandle) -> Result<Status, Error> {
        self.transfers()
            .get(&handle)
            .map(|attached| attached.status.clone())
            .ok_or_else(|| Error::invalid_handle(handle))
    }

    fn settings(&self) -> SessionSettings {
        *self.settings.lock().expect("it should lock the fixture settings")
    }

    fn apply_settings(&self, settings: SessionSettings) {
        *self.settings.lock().expect("it should lock the fixture settings") = settings;
    }
}

/// Engine statuses for common situations.
pub mod status {
    use super::{State, Status};

    /// `downloaded` of `wanted` bytes, at `rate` bytes per second.
    #[must_use]
    pub fn downloading(downloaded: u32, wanted: u32, rate: u32) -> Status {
        Status {
            state: State::Downloading,
            progress: if wanted == 0 {
                0.0
            } else {
                f64::from(downloaded) / f64::from(wanted)
            },
            download_rate: u64::from(rate),
            total_download: u64::from(downloaded),
            total_wanted: u64::from(wanted),
            num_peers: 3,
            num_seeds: 1,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn seeding() -> Status {
        Status {
            state: State::Seeding,
            progress: 1.0,
            is_seeding: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn in_state(state: State) -> Status {
        Status {
            state,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_error(status: Status, error: &str) -> Status {
        Status {
            error: error.to_owned(),
            ..status
        }
    }
}
