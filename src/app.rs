//! Torrust Transfer Manager application.
//!
//! The application is a container for the jobs that run on top of the core
//! [`Manager`](crate::core::Manager):
//!
//! - The supervisor job: it reconciles the engine state into the store and
//!   publishes the live updates.
//! - The control API job: the HTTP API with the push channel.
//!
//! Transfers are not attached to the engine again on start. Records left from
//! a previous run stay in the store as orphans and can be deleted through the
//! API.
use std::sync::Arc;

use torrust_transfer_manager_configuration::Configuration;
use tracing::{info, warn};

use crate::bootstrap::jobs::{control_api, supervisor, JobHandle};
use crate::core::Manager;
use crate::servers::apis::server::RunningApiServer;

/// The jobs started by the application.
pub struct Jobs {
    pub supervisor: JobHandle,
    pub api: RunningApiServer,
}

impl Jobs {
    /// It stops all the jobs and waits for them.
    pub async fn stop(self) {
        if let Err(err) = self.supervisor.stop().await {
            warn!("The supervisor job ended with an error: {err}");
        }

        if let Err(err) = self.api.stop().await {
            warn!("The API server ended with an error: {err}");
        }
    }
}

/// It starts all the application jobs.
///
/// # Panics
///
/// Will panic if the API server can not be started.
pub async fn start(config: &Configuration, manager: Arc<Manager>) -> Jobs {
    let supervisor = supervisor::start_job(&config.core.supervisor, &manager);

    let api = control_api::start_job(&config.http_api, manager).await;

    info!("API listening on http://{}", api.state.binding);

    Jobs { supervisor, api }
}
