//! Manager domain services.
//!
//! There are two types of service:
//!
//! - [Transfer services](crate::core::services::transfer): read models of the stored transfers.
//! - [Services for statistics](crate::core::services::statistics): aggregated data about all the transfers.
pub mod statistics;
pub mod transfer;

use std::sync::Arc;

use torrust_transfer_manager_configuration::Configuration;

use crate::core::engine::Engine;
use crate::core::{databases, Manager};

/// It returns a new manager building its dependencies.
///
/// # Panics
///
/// Will panic if the database can not be opened or its tables can not be
/// created.
#[must_use]
pub fn manager_factory(config: &Arc<Configuration>, engine: Arc<dyn Engine>) -> Manager {
    let database = match databases::driver::build(&config.core.database.driver, &config.core.database.path) {
        Ok(database) => Arc::new(database),
        Err(error) => {
            panic!("{}", error)
        }
    };

    Manager::new(config, database, engine)
}
