//! Initialize configuration from file or env var.
//!
//! The whole TOML document can be injected with the env var
//! `TORRUST_TRANSFER_MANAGER_CONFIG_TOML`. Otherwise it is read from the file
//! at `TORRUST_TRANSFER_MANAGER_CONFIG_TOML_PATH`, or from the default path.
//! Single options can be overridden with
//! `TORRUST_TRANSFER_MANAGER_CONFIG_OVERRIDE_*` env vars.
use torrust_transfer_manager_configuration::{Configuration, Info, DEFAULT_PATH_CONFIG};

/// It loads the application configuration from the environment.
///
/// Refer to the [configuration documentation](https://docs.rs/torrust-transfer-manager-configuration)
/// for the configuration options.
///
/// # Panics
///
/// Will panic if it can't load the configuration from either the env var or
/// the configuration file.
#[must_use]
pub fn initialize_configuration() -> Configuration {
    let info = Info::new(DEFAULT_PATH_CONFIG.to_string()).expect("it should build the configuration info");

    Configuration::load(&info).expect("it should load the configuration")
}
