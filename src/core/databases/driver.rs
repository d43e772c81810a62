//! Database driver factory.
//!
//! See [`databases::driver::build`](crate::core::databases::driver::build)
//! function for more information.
use torrust_transfer_manager_primitives::DatabaseDriver;

use super::error::Error;
use super::sqlite::Sqlite;
use super::Database;

/// It builds a new database driver.
///
/// Example for `SQLite3`:
///
/// ```rust,no_run
/// use torrust_transfer_manager::core::databases;
/// use torrust_transfer_manager_primitives::DatabaseDriver;
///
/// let db_driver = DatabaseDriver::Sqlite3;
/// let db_path = "./storage/transfer-manager/lib/database/sqlite3.db".to_string();
/// let database = databases::driver::build(&db_driver, &db_path);
/// ```
///
/// Refer to the [configuration documentation](https://docs.rs/torrust-transfer-manager-configuration)
/// for more information about the database configuration.
///
/// > **WARNING**: The driver instantiation creates the database tables.
///
/// # Errors
///
/// This function will return an error if unable to connect to the database
/// or to create the tables.
pub fn build(driver: &DatabaseDriver, db_path: &str) -> Result<Box<dyn Database>, Error> {
    let database: Box<dyn Database> = match driver {
        DatabaseDriver::Sqlite3 => Box::new(Sqlite::new(db_path)?),
    };

    database.create_database_tables()?;

    Ok(database)
}
