//! Setup for the main transfer manager application.
//!
//! The [`setup`] only builds the application and its dependencies, but it
//! does not start the application. The application is started by the
//! [`start`](crate::app::start) function.
//!
//! Setup steps:
//!
//! 1. Load the global application configuration.
//! 2. Initialize static variables.
//! 3. Initialize logging.
//! 4. Create the payload root and the database directory.
//! 5. Initialize the domain manager with the local engine session, and apply
//!    the configured global speed limits.
use std::sync::Arc;

use camino::Utf8Path;
use torrust_transfer_manager_clock::static_time;
use torrust_transfer_manager_configuration::Configuration;
use tracing::info;

use super::config::initialize_configuration;
use crate::bootstrap;
use crate::core::engine::local::LocalSession;
use crate::core::services::manager_factory;
use crate::core::{Manager, MANAGER_LOG_TARGET};

/// It loads the configuration from the environment and builds the main
/// domain [`Manager`] struct.
#[must_use]
pub fn setup() -> (Arc<Configuration>, Arc<Manager>) {
    let configuration = Arc::new(initialize_configuration());
    let manager = initialize_with_configuration(&configuration);

    (configuration, manager)
}

/// It initializes the application with the given configuration.
///
/// The configuration may be obtained from the environment (via config file or
/// env vars).
#[must_use]
pub fn initialize_with_configuration(configuration: &Arc<Configuration>) -> Arc<Manager> {
    initialize_static();
    initialize_logging(configuration);
    initialize_storage(configuration);
    Arc::new(initialize_manager(configuration))
}

/// It initializes the application static values.
///
/// These values are accessible throughout the entire application:
///
/// - The time when the application started.
pub fn initialize_static() {
    // Set the time of Torrust app starting
    lazy_static::initialize(&static_time::TIME_AT_APP_START);
}

/// It creates the directories the manager writes to.
///
/// # Panics
///
/// Will panic if a directory can not be created.
pub fn initialize_storage(config: &Configuration) {
    create_dir(&config.core.save_path);

    if let Some(parent) = Utf8Path::new(&config.core.database.path).parent() {
        if !parent.as_str().is_empty() {
            create_dir(parent);
        }
    }
}

fn create_dir(path: &Utf8Path) {
    if let Err(err) = std::fs::create_dir_all(path) {
        panic!("Unable to create the directory {path}: {err}");
    }
}

/// It builds the domain manager on top of the local engine session.
///
/// The global limits of the configuration, if any, are applied right away.
#[must_use]
pub fn initialize_manager(config: &Arc<Configuration>) -> Manager {
    let manager = manager_factory(config, Arc::new(LocalSession::new()));

    let global_limits = &config.core.global_limits;

    if !global_limits.is_empty() {
        manager.set_global_limits(global_limits);

        info!(target: MANAGER_LOG_TARGET, download = ?global_limits.download, upload = ?global_limits.upload, "Global speed limits applied");
    }

    manager
}

/// It initializes the log threshold, format and channel.
///
/// See [the logging setup](crate::bootstrap::logging::setup) for more info about logging.
pub fn initialize_logging(config: &Configuration) {
    bootstrap::logging::setup(config);
}
