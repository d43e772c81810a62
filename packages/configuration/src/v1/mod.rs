//! Version `1` for [Torrust Transfer Manager](https://docs.rs/torrust-transfer-manager)
//! configuration data structures.
//!
//! This module contains the configuration data structures for the
//! Torrust Transfer Manager.
//!
//! The configuration is loaded from a [TOML](https://toml.io/en/) file
//! `transfer-manager.toml` in the project root folder or from an environment
//! variable with the same content as the file.
//!
//! Configuration can not only be loaded from a file, but also from an
//! environment variable `TORRUST_TRANSFER_MANAGER_CONFIG_TOML`. This is
//! useful when running the manager in a Docker container or environments
//! where you do not have a persistent storage or you cannot inject a
//! configuration file.
//!
//! Single options can be overridden with env vars using the
//! `TORRUST_TRANSFER_MANAGER_CONFIG_OVERRIDE_` prefix and `__` as the path
//! separator:
//!
//! ```text
//! TORRUST_TRANSFER_MANAGER_CONFIG_OVERRIDE_CORE__SUPERVISOR__POLL_INTERVAL=5
//! ```
//!
//! The env var value has priority over the file.
//!
//! Each section in the toml structure is mapped to a data structure. For
//! example, the `[http_api]` section (configuration for the HTTP API) is
//! mapped to the [`HttpApi`] structure.
//!
//! ## Sections
//!
//! - [`logging`]: the logging threshold.
//! - [`core`]: save path, engine workers, database, polling cadence and
//!   session wide speed limits.
//! - [`http_api`]: where the control API and the push channel listen.
//! - [`push`]: subscriber queue capacity and send timeout of the push channel.
//!
//! ## Default configuration
//!
//! The default configuration is:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [core]
//! save_path = "./storage/transfer-manager/downloads"
//! engine_workers = 4
//!
//! [core.database]
//! driver = "sqlite3"
//! path = "./storage/transfer-manager/lib/database/sqlite3.db"
//!
//! [core.supervisor]
//! poll_interval = 2
//! backoff_interval = 5
//! stale_after_polls = 3
//!
//! [core.global_limits]
//!
//! [http_api]
//! bind_address = "127.0.0.1:1212"
//!
//! [push]
//! subscriber_capacity = 16
//! send_timeout_ms = 1000
//! ```
pub mod core;
pub mod database;
pub mod http_api;
pub mod logging;
pub mod push;
pub mod supervisor;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::core::Core;
use self::http_api::HttpApi;
use self::logging::Logging;
use self::push::Push;
use crate::{Error, Info, CONFIG_OVERRIDE_PREFIX, CONFIG_OVERRIDE_SEPARATOR};

/// Core configuration for the transfer manager.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Default, Clone)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// Core configuration.
    #[serde(default)]
    pub core: Core,

    /// The HTTP API configuration.
    #[serde(default)]
    pub http_api: HttpApi,

    /// The push channel configuration.
    #[serde(default)]
    pub push: Push,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct. The whole
    /// configuration in toml format is included in the `info.config_toml`
    /// string, otherwise it is read from `info.config_toml_path`.
    ///
    /// Options missing in both places take their default value.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration cannot be parsed or a value is
    /// not usable.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::new().merge(Toml::string(config_toml))
        } else {
            Figment::new().merge(Toml::file(&info.config_toml_path))
        };

        let figment = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR));

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    /// Checks the values that parse but would leave the manager unable to
    /// work.
    ///
    /// # Errors
    ///
    /// Will return `Err` for zero workers, a zero poll interval or a zero
    /// subscriber capacity.
    pub fn validate(&self) -> Result<(), Error> {
        if self.core.engine_workers == 0 {
            return Err(Error::InvalidValue {
                option: "core.engine_workers",
                reason: "at least one worker is required".to_owned(),
            });
        }

        if self.core.supervisor.poll_interval.is_zero() {
            return Err(Error::InvalidValue {
                option: "core.supervisor.poll_interval",
                reason: "the poll interval must be greater than zero".to_owned(),
            });
        }

        if self.push.subscriber_capacity == 0 {
            return Err(Error::InvalidValue {
                option: "push.subscriber_capacity",
                reason: "subscribers need room for at least one update".to_owned(),
            });
        }

        Ok(())
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if it can't be converted to TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }

    /// Encodes the configuration to JSON.
    ///
    /// # Panics
    ///
    /// Will panic if it can't be converted to JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("Could not encode JSON value")
    }
}
