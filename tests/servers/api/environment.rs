use std::net::SocketAddr;
use std::sync::Arc;

use camino::Utf8PathBuf;
use torrust_transfer_manager::bootstrap::app::initialize_with_configuration;
use torrust_transfer_manager::bootstrap::jobs::control_api::GRACEFUL_SHUTDOWN_TIMEOUT;
use torrust_transfer_manager::bootstrap::jobs::{supervisor, JobHandle};
use torrust_transfer_manager::core::Manager;
use torrust_transfer_manager::servers::apis::server::{ApiServer, Launcher, Running, Stopped};
use torrust_transfer_manager_configuration::Configuration;

/// A manager with the local engine, its API server and its supervisor job.
pub struct Environment<S> {
    pub config: Arc<Configuration>,
    pub manager: Arc<Manager>,
    pub server: ApiServer<S>,
    supervisor: Option<JobHandle>,
}

impl<S> Environment<S> {
    /// Where the engine saves the payloads.
    pub fn save_path(&self) -> Utf8PathBuf {
        self.config.core.save_path.clone()
    }
}

impl Environment<Stopped> {
    pub fn new(configuration: &Arc<Configuration>) -> Self {
        let manager = initialize_with_configuration(configuration);

        let server = ApiServer::new(Launcher::new(configuration.http_api.bind_address, GRACEFUL_SHUTDOWN_TIMEOUT));

        Self {
            config: configuration.clone(),
            manager,
            server,
            supervisor: None,
        }
    }

    pub async fn start(self) -> Environment<Running> {
        let supervisor = supervisor::start_job(&self.config.core.supervisor, &self.manager);

        Environment {
            config: self.config,
            manager: self.manager.clone(),
            server: self.server.start(self.manager).await.unwrap(),
            supervisor: Some(supervisor),
        }
    }
}

impl Environment<Running> {
    pub async fn new(configuration: &Arc<Configuration>) -> Self {
        Environment::<Stopped>::new(configuration).start().await
    }

    pub async fn stop(self) -> Environment<Stopped> {
        if let Some(supervisor) = self.supervisor {
            supervisor.stop().await.unwrap();
        }

        Environment {
            config: self.config,
            manager: self.manager,
            server: self.server.stop().await.unwrap(),
            supervisor: None,
        }
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.server.state.binding
    }
}
