use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use torrust_transfer_manager_primitives::SpeedLimits;

use crate::v1::database::Database;
use crate::v1::supervisor::Supervisor;

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Core {
    /// Root directory where the payload of every transfer is saved.
    #[serde(default = "Core::default_save_path")]
    pub save_path: Utf8PathBuf,

    /// Number of blocking workers that run slow engine calls (attach and
    /// remove).
    #[serde(default = "Core::default_engine_workers")]
    pub engine_workers: usize,

    // Database configuration.
    #[serde(default = "Core::default_database")]
    pub database: Database,

    // Polling job configuration.
    #[serde(default = "Core::default_supervisor")]
    pub supervisor: Supervisor,

    /// Session wide caps in bytes per second applied at startup.
    #[serde(default = "Core::default_global_limits")]
    pub global_limits: SpeedLimits,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            save_path: Self::default_save_path(),
            engine_workers: Self::default_engine_workers(),
            database: Self::default_database(),
            supervisor: Self::default_supervisor(),
            global_limits: Self::default_global_limits(),
        }
    }
}

impl Core {
    fn default_save_path() -> Utf8PathBuf {
        Utf8PathBuf::from("./storage/transfer-manager/downloads")
    }

    fn default_engine_workers() -> usize {
        4
    }

    fn default_database() -> Database {
        Database::default()
    }

    fn default_supervisor() -> Supervisor {
        Supervisor::default()
    }

    fn default_global_limits() -> SpeedLimits {
        SpeedLimits::unlimited()
    }
}
