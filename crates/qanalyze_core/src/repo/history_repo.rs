//! Analysis history contracts and SQLite-backed implementation.
//!
//! # Responsibility
//! - Provide the bounded, newest-first history list over persistent
//!   storage.
//! - Keep the persisted layout stable: the whole list as one JSON document
//!   under one well-known storage key.
//!
//! # Invariants
//! - `append` prepends and truncates to [`HISTORY_CAP`] in the same write.
//! - `remove` of an unknown id is a no-op, not an error.
//! - Reads reject undecodable persisted state instead of masking it.

use crate::db::DbError;
use crate::model::record::{AnalysisRecord, RecordId, HISTORY_CAP};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Well-known storage key the serialized history list lives under.
pub const HISTORY_STORAGE_KEY: &str = "quantum_analysis_history";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for history persistence and decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted JSON document could not be decoded.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted history data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// History-store contract exposed to the service layer.
pub trait HistoryRepository {
    /// Prepends `record` and truncates to the newest [`HISTORY_CAP`]
    /// entries, persisting immediately.
    fn append(&self, record: &AnalysisRecord) -> RepoResult<()>;

    /// Returns the full list, newest first.
    fn list(&self) -> RepoResult<Vec<AnalysisRecord>>;

    /// Removes one record by identity. Unknown ids are a no-op.
    fn remove(&self, id: RecordId) -> RepoResult<()>;

    /// Largest record id currently stored, for monotonic id allocation.
    fn latest_id(&self) -> RepoResult<Option<RecordId>> {
        Ok(self.list()?.iter().map(|record| record.id).max())
    }
}

/// SQLite-backed history repository storing the list as one JSON document
/// in the `storage` key-value table.
pub struct SqliteHistoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHistoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_document(&self) -> RepoResult<Vec<AnalysisRecord>> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1;",
                params![HISTORY_STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json)
                .map_err(|err| RepoError::InvalidData(err.to_string())),
        }
    }

    fn write_document(&self, records: &[AnalysisRecord]) -> RepoResult<()> {
        let json = serde_json::to_string(records)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        self.conn.execute(
            "INSERT INTO storage (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![HISTORY_STORAGE_KEY, json],
        )?;
        Ok(())
    }
}

impl HistoryRepository for SqliteHistoryRepository<'_> {
    fn append(&self, record: &AnalysisRecord) -> RepoResult<()> {
        let mut records = self.read_document()?;
        records.insert(0, record.clone());
        records.truncate(HISTORY_CAP);
        self.write_document(&records)?;

        info!(
            "event=history_append module=repo status=ok record_id={} mode={} size={}",
            record.id,
            record.mode,
            records.len()
        );
        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<AnalysisRecord>> {
        self.read_document()
    }

    fn remove(&self, id: RecordId) -> RepoResult<()> {
        let mut records = self.read_document()?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() != before {
            self.write_document(&records)?;
            info!(
                "event=history_remove module=repo status=ok record_id={} size={}",
                id,
                records.len()
            );
        }
        Ok(())
    }
}
