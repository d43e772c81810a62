//! Database errors.
//!
//! This module contains the [Database errors](crate::core::databases::error::Error).
use std::panic::Location;
use std::sync::Arc;

use torrust_transfer_manager_located_error::{DynError, Located, LocatedError};
use torrust_transfer_manager_primitives::DatabaseDriver;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// The query unexpectedly returned nothing.
    #[error("The {driver} query unexpectedly returned nothing: {source}")]
    QueryReturnedNoRows {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
        driver: DatabaseDriver,
    },

    /// The query was malformed.
    #[error("The {driver} query was malformed: {source}")]
    InvalidQuery {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
        driver: DatabaseDriver,
    },

    /// Unable to insert a record into the database
    #[error("Unable to insert record into {driver} database, {location}")]
    InsertFailed {
        location: &'static Location<'static>,
        driver: DatabaseDriver,
    },

    /// A stored value could not be decoded.
    #[error("The {driver} database holds an invalid `{field}` value {value:?}, {location}")]
    InvalidRecord {
        field: &'static str,
        value: String,
        location: &'static Location<'static>,
        driver: DatabaseDriver,
    },

    /// Unable to get a connection from the pool.
    #[error("Failed to get a r2d2 {driver} connection: {source}")]
    ConnectionPool {
        source: LocatedError<'static, r2d2::Error>,
        driver: DatabaseDriver,
    },
}

impl Error {
    /// Whether the database could not be reached at all, as opposed to a
    /// single query failing.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::ConnectionPool { .. })
    }

    #[track_caller]
    pub(crate) fn invalid_record(field: &'static str, value: impl Into<String>, driver: DatabaseDriver) -> Self {
        Error::InvalidRecord {
            field,
            value: value.into(),
            location: Location::caller(),
            driver,
        }
    }
}

impl From<r2d2_sqlite::rusqlite::Error> for Error {
    #[track_caller]
    fn from(err: r2d2_sqlite::rusqlite::Error) -> Self {
        match err {
            r2d2_sqlite::rusqlite::Error::QueryReturnedNoRows => Error::QueryReturnedNoRows {
                source: (Arc::new(err) as DynError).into(),
                driver: DatabaseDriver::Sqlite3,
            },
            _ => Error::InvalidQuery {
                source: (Arc::new(err) as DynError).into(),
                driver: DatabaseDriver::Sqlite3,
            },
        }
    }
}

impl From<(r2d2::Error, DatabaseDriver)> for Error {
    #[track_caller]
    fn from(e: (r2d2::Error, DatabaseDriver)) -> Self {
        let (err, driver) = e;
        Self::ConnectionPool {
            source: Located(err).into(),
            driver,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::time::Duration;

    use r2d2_sqlite::SqliteConnectionManager;
    use torrust_transfer_manager_primitives::DatabaseDriver;

    use super::Error;

    /// The error of a database that can not be reached at all.
    pub(crate) fn store_unavailable() -> Error {
        let unreachable = SqliteConnectionManager::file("/nonexistent/transfer-manager/sqlite3.db");

        match r2d2::Pool::builder()
            .connection_timeout(Duration::from_millis(50))
            .build(unreachable)
        {
            Ok(_) => panic!("the database directory should not exist"),
            Err(err) => (err, DatabaseDriver::Sqlite3).into(),
        }
    }

    /// The error of one failing query.
    pub(crate) fn query_failed() -> Error {
        r2d2_sqlite::rusqlite::Error::InvalidQuery.into()
    }
}
