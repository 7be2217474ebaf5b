//! Habit store: one SQLite file holding the `kv_entries` table.
//!
//! Connections handed out by [`open_db`] and [`open_db_in_memory`] are already
//! migrated; `repo` code can query `kv_entries` directly.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, MEMORY_LOCATION};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening, migrating or querying the habit store.
#[derive(Debug)]
pub enum DbError {
    /// The store file could not be opened or created.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// Any statement failure after the connection is up.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build with more migrations.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open habit store at `{location}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "habit store query failed: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "habit store has schema v{found}, this build understands up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
