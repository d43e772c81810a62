//! Transfer manager configurations for testing.
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use camino::Utf8PathBuf;
use torrust_transfer_manager_configuration::{Configuration, Threshold};

use crate::random;

/// This configuration is used for testing. It generates random config values
/// so they do not collide if you run more than one manager at the same time.
///
/// - The API binds to an ephemeral port on localhost.
/// - The database is a new `SQLite` file in the temp dir.
/// - Payloads are saved into a new directory in the temp dir.
/// - The supervisor polls every second.
///
/// # Panics
///
/// Will panic if the temp dir path is not valid UTF-8.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    // Ephemeral socket address for API
    let api_port = 0u16;
    config.http_api.bind_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), api_port);

    let temp_directory = Utf8PathBuf::from_path_buf(env::temp_dir()).expect("temp dir should be valid UTF-8");
    let random_id = random::string(16);

    // Ephemeral sqlite database
    config.core.database.path = temp_directory.join(format!("data_{random_id}.db")).to_string();

    // Ephemeral payload root
    config.core.save_path = temp_directory.join(format!("downloads_{random_id}"));

    config.core.supervisor.poll_interval = Duration::from_secs(1);

    config
}
