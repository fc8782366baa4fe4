//! Key record persistence.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use tracing::debug;

use enx_export::KeyRecord;

use crate::error::StoreError;
use crate::types::{NewKey, PackageSummary};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tek_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    package_id INTEGER NOT NULL,
    region TEXT NOT NULL,
    key_data BLOB NOT NULL,
    rolling_start_interval_number INTEGER NOT NULL,
    rolling_period INTEGER NOT NULL,
    transmission_risk_level INTEGER NOT NULL,
    epoch INTEGER NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_tek_records_package ON tek_records(package_id);
";

/// SQLite store for submitted exposure keys.
///
/// Interior mutability via `parking_lot::Mutex`; one connection serves
/// the whole process.
pub struct TekStore {
    conn: Mutex<Connection>,
}

impl TekStore {
    /// Open (and initialize) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Store all keys of one submission under a fresh package id.
    ///
    /// Keys are written in submission order; fetching the package later
    /// returns them in that same order. `created_at` is stamped per
    /// record at insert time.
    pub fn insert_submission(
        &self,
        region: &str,
        keys: &[NewKey],
        created_at: i64,
    ) -> Result<i64, StoreError> {
        if keys.is_empty() {
            return Err(StoreError::EmptySubmission);
        }

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let package_id: i64 = tx.query_row(
            "SELECT COALESCE(MAX(package_id), 0) + 1 FROM tek_records",
            [],
            |row| row.get(0),
        )?;
        for key in keys {
            // The 10-minute interval start as epoch seconds, used to
            // order the catalog listing.
            let epoch = i64::from(key.rolling_start_interval_number) * 600;
            tx.execute(
                "INSERT INTO tek_records (
                    package_id, region, key_data, rolling_start_interval_number,
                    rolling_period, transmission_risk_level, epoch, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    package_id,
                    region,
                    key.key_data,
                    key.rolling_start_interval_number,
                    key.rolling_period,
                    key.transmission_risk_level,
                    epoch,
                    created_at,
                ],
            )?;
        }
        tx.commit()?;

        debug!(package_id, keys = keys.len(), region, "stored submission");
        Ok(package_id)
    }

    /// Fetch the ordered records of one package, or `None` if the id is
    /// unknown.
    pub fn fetch_package(&self, package_id: i64) -> Result<Option<Vec<KeyRecord>>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, region, key_data, rolling_start_interval_number,
                    rolling_period, transmission_risk_level, created_at
             FROM tek_records WHERE package_id = ?1 ORDER BY id",
        )?;
        let records = stmt
            .query_map([package_id], |row| {
                Ok(KeyRecord {
                    id: row.get(0)?,
                    region: row.get(1)?,
                    key_data: row.get(2)?,
                    rolling_start_interval_number: row.get(3)?,
                    rolling_period: row.get(4)?,
                    transmission_risk_level: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(records))
    }

    /// List one summary per stored package, ordered by key activation
    /// time.
    pub fn list_packages(&self) -> Result<Vec<PackageSummary>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT package_id, MIN(region), MIN(created_at), MIN(epoch) AS first_epoch
             FROM tek_records GROUP BY package_id ORDER BY first_epoch, package_id",
        )?;
        let summaries = stmt
            .query_map([], |row| {
                Ok(PackageSummary {
                    package_id: row.get(0)?,
                    region: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }
}
