//! The core `manager` module contains the transfer supervision logic, which is
//! independent of the delivery layer.
//!
//! It contains the [`Manager`], its dependencies and the domain services
//! built on top of it. It does not specify how the end user reaches the
//! manager.
//!
//! ```text
//! Delivery layer        Domain layer
//!
//!    REST API (axum) |
//!  Push channel (ws) |> Manager -> Adapter -> Engine
//!                    |     |  \-> Registry
//!                    |     \---> Database
//!                    |
//!                    |  Supervisor (periodic job) -> Broadcaster -> subscribers
//! ```
//!
//! # Table of contents
//!
//! - [Transfers](#transfers)
//! - [Control operations](#control-operations)
//! - [Supervision](#supervision)
//! - [Persistence](#persistence)
//! - [Services](#services)
//!
//! # Transfers
//!
//! A transfer is created from a `.torrent` descriptor. It lives in two places:
//!
//! - The durable [`TransferRecord`](crate::core::transfer::TransferRecord) in
//!   the database. It survives restarts.
//! - The in-memory [`Registry`] entry, which maps the transfer id to the
//!   handle of the engine the transfer is attached to.
//!
//! A transfer that is only in the database is an _orphan_: the engine
//! rejected it, the engine dropped it on its own or the process restarted.
//! Orphans are listed and can be deleted, but they can not be paused, resumed
//! or limited.
//!
//! # Control operations
//!
//! Operation | Registry | Engine | Database
//! ---|---|---|---
//! [`create`](Manager::create) | registers on success | attach (worker pool) | insert, kept on engine failure
//! [`pause`](Manager::pause) | required | pause | status `paused`
//! [`resume`](Manager::resume) | required | resume | status `downloading`
//! [`update_limits`](Manager::update_limits) | required | per transfer limits | limits, scheduled start
//! [`delete`](Manager::delete) | unregisters if present | detach (worker pool) | delete, always
//! [`set_global_limits`](Manager::set_global_limits) | - | session wide limits | -
//!
//! Engine calls made by control operations are fire-and-forget: the store
//! is updated optimistically and the next supervisor tick overwrites the
//! status with what the engine actually reports.
//!
//! # Supervision
//!
//! The [`supervisor`] polls every registered transfer on a fixed cadence,
//! derives the normalized status, persists it and publishes one
//! [`Update`](crate::core::broadcaster::Update) per tick through the
//! [`broadcaster`].
//!
//! # Persistence
//!
//! Refer to the [`databases`] module.
//!
//! # Services
//!
//! The [`services`] module builds the `Manager` and exposes read models for
//! the delivery layer: transfer info with staleness and aggregated
//! statistics.
pub mod broadcaster;
pub mod databases;
pub mod engine;
pub mod error;
pub mod services;
pub mod supervisor;
pub mod transfer;

use std::sync::Arc;

use torrust_transfer_manager_clock::clock::Time;
use torrust_transfer_manager_configuration::Configuration;
use torrust_transfer_manager_primitives::{DurationSinceUnixEpoch, SpeedLimits, TransferId, TransferStatus};
use torrust_transfer_manager_transfer_registry::entry::Entry as _;
use torrust_transfer_manager_transfer_registry::repository::Repository as _;
use torrust_transfer_manager_transfer_registry::Registry;

use self::broadcaster::Broadcaster;
use self::databases::Database;
use self::engine::adapter::{Adapter, CreateOptions};
use self::engine::metainfo::Metainfo;
use self::engine::pool::WorkerPool;
use self::engine::Engine;
use self::error::Error;
use self::transfer::{NewTransfer, TransferRecord};
use crate::CurrentClock;

pub const MANAGER_LOG_TARGET: &str = "MANAGER";

const DESCRIPTOR_EXTENSION: &str = ".torrent";

/// A change of the settings of one transfer. Fields that are `None` keep
/// their current value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct TransferUpdate {
    pub limits: SpeedLimits,
    pub scheduled_start: Option<DurationSinceUnixEpoch>,
}

/// The domain layer transfer manager.
///
/// It owns the transfer registry, the engine adapter and the persistence,
/// and it runs the control operations on them.
///
/// > **NOTICE**: the `Manager` is not responsible for the network layer.
pub struct Manager {
    config: Arc<Configuration>,
    /// A database driver implementation: [`Sqlite3`](crate::core::databases::sqlite)
    pub database: Arc<Box<dyn Database>>,
    pub registry: Arc<Registry>,
    pub adapter: Arc<Adapter>,
    pub broadcaster: Arc<Broadcaster>,
    pool: WorkerPool,
}

impl Manager {
    /// `Manager` constructor.
    #[must_use]
    pub fn new(config: &Arc<Configuration>, database: Arc<Box<dyn Database>>, engine: Arc<dyn Engine>) -> Manager {
        Manager {
            config: config.clone(),
            database,
            registry: Arc::default(),
            adapter: Arc::new(Adapter::new(engine)),
            broadcaster: Arc::new(Broadcaster::new(config.push.subscriber_capacity)),
            pool: WorkerPool::new(config.core.engine_workers),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// It creates a new transfer from an uploaded descriptor.
    ///
    /// The record is stored before the transfer is attached to the engine. If
    /// the engine rejects it the record is kept as an orphan.
    ///
    /// # Errors
    ///
    /// Will return:
    ///
    /// - `InvalidMetadata` if `file_name` is not a `.torrent` file or `raw` is not a valid descriptor.
    /// - `StoreUnavailable` if the record can not be stored.
    /// - `EngineRejected` if the engine refuses the transfer.
    /// - `NotFound` if the transfer was deleted while it was being attached.
    pub async fn create(&self, file_name: &str, raw: Vec<u8>, options: CreateOptions) -> Result<TransferRecord, Error> {
        if !file_name.ends_with(DESCRIPTOR_EXTENSION) {
            return Err(Error::invalid_metadata(format!("{file_name:?} is not a {DESCRIPTOR_EXTENSION} file")));
        }

        let metainfo = Metainfo::from_bytes(&raw)?;

        let status = if options.starts_paused() {
            TransferStatus::Paused
        } else {
            TransferStatus::Queued
        };

        let record = TransferRecord::new(
            NewTransfer::new(
                TransferId::generate(),
                metainfo.name().to_owned(),
                metainfo.total_size(),
                self.config.core.save_path.to_string(),
                options.limits,
                options.scheduled_start,
            ),
            status,
            CurrentClock::now(),
        );

        self.database.insert_transfer(&record)?;

        let adapter = self.adapter.clone();
        let save_path = self.config.core.save_path.clone();

        let attached = self.pool.run(move || adapter.create(&raw, &save_path, &options)).await;

        match attached {
            Ok(Ok(handle)) => {
                self.registry.register(&record.id, handle);

                // A delete that ran while the engine was attaching found no
                // entry to detach. The handle is ours to release then.
                if matches!(self.database.get_transfer(&record.id), Ok(None)) {
                    if let Some(entry) = self.registry.unregister(&record.id) {
                        let adapter = self.adapter.clone();
                        let handle = entry.handle();

                        if let Err(err) = self.pool.run(move || adapter.remove(handle)).await {
                            tracing::warn!(target: MANAGER_LOG_TARGET, id = %record.id, %handle, %err, "Manager::create (engine removal failed)");
                        }
                    }

                    tracing::info!(target: MANAGER_LOG_TARGET, id = %record.id, %handle, "Manager::create (deleted while attaching)");

                    return Err(Error::not_found(&record.id));
                }

                tracing::info!(target: MANAGER_LOG_TARGET, id = %record.id, name = %record.name, %handle, %status, "Manager::create (registered)");

                Ok(record)
            }
            Ok(Err(err)) => {
                tracing::warn!(target: MANAGER_LOG_TARGET, id = %record.id, %err, "Manager::create (orphaned)");

                Err(error::from_create_error(&record.id, &err))
            }
            Err(err) => {
                tracing::warn!(target: MANAGER_LOG_TARGET, id = %record.id, %err, "Manager::create (orphaned)");

                Err(error::from_pool_error(&record.id, &err))
            }
        }
    }

    /// # Errors
    ///
    /// Will return `NotFound` if the transfer is not registered, and
    /// `StoreUnavailable` if the new status can not be stored.
    pub fn pause(&self, id: &TransferId) -> Result<(), Error> {
        let handle = self.registry.handle(id).ok_or_else(|| Error::not_found(id))?;

        self.adapter.pause(handle);

        self.database.update_transfer_status(id, TransferStatus::Paused)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Will return `NotFound` if the transfer is not registered, and
    /// `StoreUnavailable` if the new status can not be stored.
    pub fn resume(&self, id: &TransferId) -> Result<(), Error> {
        let handle = self.registry.handle(id).ok_or_else(|| Error::not_found(id))?;

        self.adapter.resume(handle);

        self.database.update_transfer_status(id, TransferStatus::Downloading)?;

        Ok(())
    }

    /// It applies the provided limits to the engine and the store. The
    /// scheduled start is only stored.
    ///
    /// # Errors
    ///
    /// Will return `NotFound` if the transfer is not registered, and
    /// `StoreUnavailable` if the settings can not be stored.
    pub fn update_limits(&self, id: &TransferId, update: &TransferUpdate) -> Result<(), Error> {
        let handle = self.registry.handle(id).ok_or_else(|| Error::not_found(id))?;

        self.adapter.set_limits(handle, &update.limits);

        if !update.limits.is_empty() || update.scheduled_start.is_some() {
            self.database
                .update_transfer_settings(id, &update.limits, update.scheduled_start)?;
        }

        Ok(())
    }

    /// It detaches the transfer if it is registered and it deletes the
    /// record. Deleting an unknown transfer succeeds.
    ///
    /// # Errors
    ///
    /// Will return `StoreUnavailable` if the record can not be deleted.
    pub async fn delete(&self, id: &TransferId) -> Result<(), Error> {
        if let Some(entry) = self.registry.unregister(id) {
            let adapter = self.adapter.clone();
            let handle = entry.handle();

            if let Err(err) = self.pool.run(move || adapter.remove(handle)).await {
                tracing::warn!(target: MANAGER_LOG_TARGET, %id, %handle, %err, "Manager::delete (engine removal failed)");
            }
        }

        let removed = self.database.remove_transfer(id)?;

        tracing::info!(target: MANAGER_LOG_TARGET, %id, removed, "Manager::delete");

        Ok(())
    }

    /// It changes the session wide limits. They are not persisted.
    pub fn set_global_limits(&self, limits: &SpeedLimits) {
        self.adapter.set_global_limits(limits);
    }

    /// # Errors
    ///
    /// Will return `NotFound` if there is no record, and `StoreUnavailable`
    /// if the store can not be read.
    pub fn get_transfer(&self, id: &TransferId) -> Result<TransferRecord, Error> {
        self.database.get_transfer(id)?.ok_or_else(|| Error::not_found(id))
    }

    /// All the records, most recently created first.
    ///
    /// # Errors
    ///
    /// Will return `StoreUnavailable` if the store can not be read.
    pub fn get_transfers(&self) -> Result<Vec<TransferRecord>, Error> {
        Ok(self.database.load_transfers()?)
    }
}
