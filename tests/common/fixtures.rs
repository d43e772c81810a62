use std::time::Duration;

use torrust_transfer_manager::core::engine::metainfo::fixture::MetainfoBuilder;
use torrust_transfer_manager_configuration::Configuration;
use torrust_transfer_manager_test_helpers::configuration;

/// An ephemeral configuration whose supervisor ticks every 50 ms.
#[allow(dead_code)]
pub fn fast_polling() -> Configuration {
    let mut config = configuration::ephemeral();
    config.core.supervisor.poll_interval = Duration::from_millis(50);
    config
}

/// A single file descriptor.
#[allow(dead_code)]
pub fn descriptor(name: &str, length: i64) -> Vec<u8> {
    MetainfoBuilder::single_file(name, length).to_bytes()
}

/// Bytes that are not a descriptor.
#[allow(dead_code)]
pub fn invalid_descriptor() -> Vec<u8> {
    b"this is not bencode".to_vec()
}
