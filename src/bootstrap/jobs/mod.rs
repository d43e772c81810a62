//! Application jobs launchers.
//!
//! The main application setup has only two main stages:
//!
//! 1. Setup the domain layer: the core manager.
//! 2. Launch all the application services as concurrent jobs.
//!
//! This module contains all the functions needed to start those jobs:
//!
//! - [`supervisor`]: the periodic reconciliation of the engine state.
//! - [`control_api`]: the HTTP API with the push channel.
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};

use crate::servers::signals::Halted;

pub mod control_api;
pub mod supervisor;

/// A running background job.
///
/// The job stops when [`stop`](JobHandle::stop) is called, when the handle is
/// dropped, or on the global shutdown signal.
#[derive(Debug)]
pub struct JobHandle {
    tx_halt: oneshot::Sender<Halted>,
    pub task: JoinHandle<()>,
}

impl JobHandle {
    #[must_use]
    pub fn new(tx_halt: oneshot::Sender<Halted>, task: JoinHandle<()>) -> Self {
        Self { tx_halt, task }
    }

    /// It sends the halt message and waits for the job to finish.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the job task panicked.
    pub async fn stop(self) -> Result<(), JoinError> {
        // The job may be gone already, on the global shutdown signal.
        let _ = self.tx_halt.send(Halted::Normal);

        self.task.await
    }
}
