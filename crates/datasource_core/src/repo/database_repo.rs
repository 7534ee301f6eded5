//! SQL-backed record repository.
//!
//! # Responsibility
//! - Serve the `mariaDb` data source through a SQL connection.
//! - Keep SQL text and row parsing inside this module.
//!
//! # Invariants
//! - The connection is fully migrated before the repository is handed out.
//! - One connection per repository, serialized through a mutex.

use super::{RecordRepository, RepoError, RepoResult};
use crate::db::{open_db, open_db_in_memory};
use crate::model::record::{Record, RecordId};
use crate::select::DataSourceKind;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const RECORD_SELECT_SQL: &str = "SELECT
    uuid,
    content,
    created_at
FROM records";

/// Database-backed record repository.
pub struct DatabaseRepository {
    conn: Mutex<Connection>,
}

impl DatabaseRepository {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl RecordRepository for DatabaseRepository {
    fn kind(&self) -> DataSourceKind {
        DataSourceKind::MariaDb
    }

    fn find_all(&self) -> RepoResult<Vec<Record>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("{RECORD_SELECT_SQL} ORDER BY created_at ASC, uuid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Record>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{RECORD_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, record: &Record) -> RepoResult<RecordId> {
        record.validate()?;

        let conn = self.conn()?;
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM records WHERE uuid = ?1);",
            [record.uuid.to_string()],
            |row| row.get(0),
        )?;
        if exists == 1 {
            return Err(RepoError::Duplicate(record.uuid));
        }

        conn.execute(
            "INSERT INTO records (uuid, content, created_at) VALUES (?1, ?2, ?3);",
            params![
                record.uuid.to_string(),
                record.content.as_str(),
                record.created_at
            ],
        )?;

        Ok(record.uuid)
    }

    fn count(&self) -> RepoResult<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("invalid record count `{count}`")))
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<Record> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in records.uuid"))
    })?;

    let record = Record {
        uuid,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
    };
    record.validate()?;
    Ok(record)
}
