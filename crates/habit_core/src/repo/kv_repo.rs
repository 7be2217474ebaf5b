//! Key/value string storage contracts and implementations.
//!
//! # Responsibility
//! - Provide whole-value get/set/remove over string keys.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - A `set` replaces the previous value for the key atomically.
//! - No operation spans more than one key.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for key/value persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A value could not be encoded before writing.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
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

/// String-keyed storage of string values.
pub trait KvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove(&self, key: &str) -> RepoResult<()>;
}

impl<R: KvRepository + ?Sized> KvRepository for &R {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        (**self).remove(key)
    }
}

/// SQLite-backed key/value repository over the `kv_entries` table.
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local key/value repository.
#[derive(Debug, Default)]
pub struct MemoryKvRepository {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvRepository for MemoryKvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
