//! Configuration data structures for [Torrust Transfer Manager](https://docs.rs/torrust-transfer-manager).
//!
//! This module contains the configuration data structures for the transfer
//! manager: the service that supervises torrent transfers and exposes them
//! through an HTTP API and a push channel.
//!
//! The current version for configuration is [`v1`].
pub mod v1;

use std::env;
use std::sync::Arc;

use thiserror::Error;
use torrust_transfer_manager_located_error::{DynError, LocatedError};

// Environment variables

/// The whole `transfer-manager.toml` file content. It has priority over the
/// config file. Even if the file is not on the default path.
const ENV_VAR_CONFIG_TOML: &str = "TORRUST_TRANSFER_MANAGER_CONFIG_TOML";

/// The `transfer-manager.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "TORRUST_TRANSFER_MANAGER_CONFIG_TOML_PATH";

/// Prefix for the env vars that override single configuration options.
///
/// For example, `TORRUST_TRANSFER_MANAGER_CONFIG_OVERRIDE_CORE__SUPERVISOR__POLL_INTERVAL=5`.
pub const CONFIG_OVERRIDE_PREFIX: &str = "TORRUST_TRANSFER_MANAGER_CONFIG_OVERRIDE_";

/// Path separator in env var names for nested values in configuration.
pub const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

/// The default configuration file used when neither env var is set.
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/transfer-manager.development.sqlite3.toml";

pub type Configuration = v1::Configuration;
pub type Core = v1::core::Core;
pub type Database = v1::database::Database;
pub type Supervisor = v1::supervisor::Supervisor;
pub type HttpApi = v1::http_api::HttpApi;
pub type Push = v1::push::Push;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    ///
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading extra configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading extra configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading extra configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to load the configuration from the configuration file.
    #[error("Failed processing the configuration: {source}")]
    ConfigError {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    /// A value was parsed but it is not usable.
    #[error("Invalid configuration value for `{option}`: {reason}")]
    InvalidValue { option: &'static str, reason: String },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}
