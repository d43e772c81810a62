//! The `SQLite3` database driver.
use std::panic::Location;
use std::str::FromStr;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::rusqlite::{params, OptionalExtension as _, Row};
use r2d2_sqlite::SqliteConnectionManager;
use torrust_transfer_manager_primitives::eta::Eta;
use torrust_transfer_manager_primitives::{
    DatabaseDriver, DurationSinceUnixEpoch, SpeedLimits, TransferId, TransferSnapshot, TransferStatus,
};

use super::{Database, Error, TransferCounts};
use crate::core::transfer::TransferRecord;

const DRIVER: DatabaseDriver = DatabaseDriver::Sqlite3;

const SELECT_TRANSFER_COLUMNS: &str = "SELECT id, name, size, progress, download_rate, upload_rate, eta, status, created_at, \
     completed_at, file_path, download_speed_limit, upload_speed_limit, scheduled_start, num_peers, num_seeds, error, \
     last_polled_at FROM transfers";

pub struct Sqlite {
    pool: Pool<SqliteConnectionManager>,
}

impl Sqlite {
    /// It instantiates a new `SQLite3` database driver.
    ///
    /// # Errors
    ///
    /// Will return `r2d2::Error` if `db_path` is not able to create `SqLite` database.
    pub fn new(db_path: &str) -> Result<Sqlite, Error> {
        let cm = SqliteConnectionManager::file(db_path);
        Pool::new(cm).map_or_else(|err| Err((err, DRIVER).into()), |pool| Ok(Sqlite { pool }))
    }
}

impl Database for Sqlite {
    /// Refer to [`databases::Database::create_database_tables`](crate::core::databases::Database::create_database_tables).
    fn create_database_tables(&self) -> Result<(), Error> {
        let create_transfers_table = "
        CREATE TABLE IF NOT EXISTS transfers (
            id_pk INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            size INTEGER NOT NULL,
            progress REAL DEFAULT 0 NOT NULL,
            download_rate INTEGER DEFAULT 0 NOT NULL,
            upload_rate INTEGER DEFAULT 0 NOT NULL,
            eta TEXT DEFAULT 'unknown' NOT NULL,
            status TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            completed_at INTEGER,
            file_path TEXT NOT NULL,
            download_speed_limit INTEGER,
            upload_speed_limit INTEGER,
            scheduled_start INTEGER,
            num_peers INTEGER DEFAULT 0 NOT NULL,
            num_seeds INTEGER DEFAULT 0 NOT NULL,
            error TEXT,
            last_polled_at INTEGER
        );"
        .to_string();

        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.execute(&create_transfers_table, [])?;

        Ok(())
    }

    /// Refer to [`databases::Database::drop_database_tables`](crate::core::databases::Database::drop_database_tables).
    fn drop_database_tables(&self) -> Result<(), Error> {
        let drop_transfers_table = "
        DROP TABLE transfers;"
            .to_string();

        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.execute(&drop_transfers_table, [])?;

        Ok(())
    }

    /// Refer to [`databases::Database::insert_transfer`](crate::core::databases::Database::insert_transfer).
    fn insert_transfer(&self, transfer: &TransferRecord) -> Result<(), Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let insert = conn.execute(
            "INSERT INTO transfers (id, name, size, progress, download_rate, upload_rate, eta, status, created_at, \
             completed_at, file_path, download_speed_limit, upload_speed_limit, scheduled_start, num_peers, num_seeds, \
             error, last_polled_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                transfer.id.as_str(),
                transfer.name,
                to_sql_integer(transfer.size),
                transfer.progress,
                to_sql_integer(transfer.download_rate),
                to_sql_integer(transfer.upload_rate),
                transfer.eta.to_string(),
                transfer.status.as_str(),
                to_sql_timestamp(transfer.created_at),
                transfer.completed_at.map(to_sql_timestamp),
                transfer.file_path,
                transfer.limits.download.map(to_sql_integer),
                transfer.limits.upload.map(to_sql_integer),
                transfer.scheduled_start.map(to_sql_timestamp),
                transfer.num_peers,
                transfer.num_seeds,
                transfer.error,
                transfer.last_polled_at.map(to_sql_timestamp),
            ],
        )?;

        if insert == 0 {
            return Err(Error::InsertFailed {
                location: Location::caller(),
                driver: DRIVER,
            });
        }

        Ok(())
    }

    /// Refer to [`databases::Database::get_transfer`](crate::core::databases::Database::get_transfer).
    fn get_transfer(&self, id: &TransferId) -> Result<Option<TransferRecord>, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let mut stmt = conn.prepare(&format!("{SELECT_TRANSFER_COLUMNS} WHERE id = ?1"))?;

        let stored = stmt.query_row([id.as_str()], StoredTransfer::from_row).optional()?;

        stored.map(TransferRecord::try_from).transpose()
    }

    /// Refer to [`databases::Database::load_transfers`](crate::core::databases::Database::load_transfers).
    fn load_transfers(&self) -> Result<Vec<TransferRecord>, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let mut stmt = conn.prepare(&format!("{SELECT_TRANSFER_COLUMNS} ORDER BY created_at DESC, id_pk DESC"))?;

        let stored = stmt
            .query_map([], StoredTransfer::from_row)?
            .collect::<Result<Vec<StoredTransfer>, _>>()?;

        stored.into_iter().map(TransferRecord::try_from).collect()
    }

    /// Refer to [`databases::Database::save_snapshot`](crate::core::databases::Database::save_snapshot).
    fn save_snapshot(
        &self,
        id: &TransferId,
        snapshot: &TransferSnapshot,
        polled_at: DurationSinceUnixEpoch,
        completed_at: Option<DurationSinceUnixEpoch>,
    ) -> Result<bool, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let updated = conn.execute(
            "UPDATE transfers SET progress = ?1, download_rate = ?2, upload_rate = ?3, eta = ?4, status = ?5, \
             num_peers = ?6, num_seeds = ?7, error = ?8, last_polled_at = ?9, \
             completed_at = COALESCE(completed_at, ?10) \
             WHERE id = ?11",
            params![
                snapshot.progress,
                to_sql_integer(snapshot.download_rate),
                to_sql_integer(snapshot.upload_rate),
                snapshot.eta.to_string(),
                snapshot.status.as_str(),
                snapshot.num_peers,
                snapshot.num_seeds,
                snapshot.error,
                to_sql_timestamp(polled_at),
                completed_at.map(to_sql_timestamp),
                id.as_str(),
            ],
        )?;

        Ok(updated > 0)
    }

    /// Refer to [`databases::Database::update_transfer_status`](crate::core::databases::Database::update_transfer_status).
    fn update_transfer_status(&self, id: &TransferId, status: TransferStatus) -> Result<bool, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let updated = conn.execute(
            "UPDATE transfers SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.as_str()],
        )?;

        Ok(updated > 0)
    }

    /// Refer to [`databases::Database::update_transfer_settings`](crate::core::databases::Database::update_transfer_settings).
    fn update_transfer_settings(
        &self,
        id: &TransferId,
        limits: &SpeedLimits,
        scheduled_start: Option<DurationSinceUnixEpoch>,
    ) -> Result<bool, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let updated = conn.execute(
            "UPDATE transfers SET download_speed_limit = COALESCE(?1, download_speed_limit), \
             upload_speed_limit = COALESCE(?2, upload_speed_limit), \
             scheduled_start = COALESCE(?3, scheduled_start) \
             WHERE id = ?4",
            params![
                limits.download.map(to_sql_integer),
                limits.upload.map(to_sql_integer),
                scheduled_start.map(to_sql_timestamp),
                id.as_str(),
            ],
        )?;

        Ok(updated > 0)
    }

    /// Refer to [`databases::Database::remove_transfer`](crate::core::databases::Database::remove_transfer).
    fn remove_transfer(&self, id: &TransferId) -> Result<bool, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let deleted = conn.execute("DELETE FROM transfers WHERE id = ?1", [id.as_str()])?;

        Ok(deleted > 0)
    }

    /// Refer to [`databases::Database::count_transfers`](crate::core::databases::Database::count_transfers).
    fn count_transfers(&self) -> Result<TransferCounts, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let mut stmt = conn.prepare(
            "SELECT COUNT(*), \
             COALESCE(SUM(CASE WHEN status IN ('downloading', 'queued') THEN 1 ELSE 0 END), 0), \
             COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0), \
             COALESCE(SUM(size), 0) \
             FROM transfers",
        )?;

        let counts = stmt.query_row([], |row| {
            Ok(TransferCounts {
                total: from_sql_integer(row.get(0)?),
                active: from_sql_integer(row.get(1)?),
                completed: from_sql_integer(row.get(2)?),
                total_bytes: from_sql_integer(row.get(3)?),
            })
        })?;

        Ok(counts)
    }
}

/// A row as it is stored, before decoding the text columns.
struct StoredTransfer {
    id: String,
    name: String,
    size: i64,
    progress: f64,
    download_rate: i64,
    upload_rate: i64,
    eta: String,
    status: String,
    created_at: i64,
    completed_at: Option<i64>,
    file_path: String,
    download_speed_limit: Option<i64>,
    upload_speed_limit: Option<i64>,
    scheduled_start: Option<i64>,
    num_peers: u32,
    num_seeds: u32,
    error: Option<String>,
    last_polled_at: Option<i64>,
}

impl StoredTransfer {
    fn from_row(row: &Row<'_>) -> r2d2_sqlite::rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            size: row.get(2)?,
            progress: row.get(3)?,
            download_rate: row.get(4)?,
            upload_rate: row.get(5)?,
            eta: row.get(6)?,
            status: row.get(7)?,
            created_at: row.get(8)?,
            completed_at: row.get(9)?,
            file_path: row.get(10)?,
            download_speed_limit: row.get(11)?,
            upload_speed_limit: row.get(12)?,
            scheduled_start: row.get(13)?,
            num_peers: row.get(14)?,
            num_seeds: row.get(15)?,
            error: row.get(16)?,
            last_polled_at: row.get(17)?,
        })
    }
}

impl TryFrom<StoredTransfer> for TransferRecord {
    type Error = Error;

    fn try_from(stored: StoredTransfer) -> Result<Self, Self::Error> {
        let id = TransferId::from_str(&stored.id).map_err(|_| Error::invalid_record("id", &stored.id, DRIVER))?;
        let status =
            TransferStatus::from_str(&stored.status).map_err(|_| Error::invalid_record("status", &stored.status, DRIVER))?;
        let eta = Eta::from_str(&stored.eta).map_err(|_| Error::invalid_record("eta", &stored.eta, DRIVER))?;

        Ok(TransferRecord {
            id,
            name: stored.name,
            size: from_sql_integer(stored.size),
            progress: stored.progress,
            download_rate: from_sql_integer(stored.download_rate),
            upload_rate: from_sql_integer(stored.upload_rate),
            eta,
            status,
            created_at: from_sql_timestamp(stored.created_at),
            completed_at: stored.completed_at.map(from_sql_timestamp),
            file_path: stored.file_path,
            limits: SpeedLimits::new(
                stored.download_speed_limit.map(from_sql_integer),
                stored.upload_speed_limit.map(from_sql_integer),
            ),
            scheduled_start: stored.scheduled_start.map(from_sql_timestamp),
            num_peers: stored.num_peers,
            num_seeds: stored.num_seeds,
            error: stored.error,
            last_polled_at: stored.last_polled_at.map(from_sql_timestamp),
        })
    }
}

// SQLite integers are signed. Values beyond `i64::MAX` are clamped.

fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn from_sql_integer(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

fn to_sql_timestamp(timestamp: DurationSinceUnixEpoch) -> i64 {
    to_sql_integer(timestamp.as_secs())
}

fn from_sql_timestamp(seconds: i64) -> DurationSinceUnixEpoch {
    Duration::from_secs(from_sql_integer(seconds))
}
