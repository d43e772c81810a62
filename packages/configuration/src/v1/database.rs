use serde::{Deserialize, Serialize};
use torrust_transfer_manager_primitives::DatabaseDriver;

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Database {
    // Database configuration
    /// Database driver. The only supported value is `sqlite3`.
    #[serde(default = "Database::default_driver")]
    pub driver: DatabaseDriver,

    /// Path to the database file, for example:
    /// `./storage/transfer-manager/lib/database/sqlite3.db`.
    #[serde(default = "Database::default_path")]
    pub path: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            driver: Self::default_driver(),
            path: Self::default_path(),
        }
    }
}

impl Database {
    fn default_driver() -> DatabaseDriver {
        DatabaseDriver::Sqlite3
    }

    fn default_path() -> String {
        String::from("./storage/transfer-manager/lib/database/sqlite3.db")
    }
}
