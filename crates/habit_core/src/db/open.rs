//! Connection bootstrap for the habit store.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Every open attempt emits one `db_open` start event and one outcome event.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Location reported for in-memory stores.
pub const MEMORY_LOCATION: &str = ":memory:";

/// Opens (or creates) the habit store at `path` and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with(&path.display().to_string(), || Connection::open(path))
}

/// Opens a throwaway in-memory habit store. Used by tests and by the CLI when
/// no database path is configured.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(MEMORY_LOCATION, Connection::open_in_memory)
}

fn open_with(
    location: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start location={location}");

    let mut conn = connect().map_err(|source| {
        error!(
            "event=db_open module=db status=error location={location} duration_ms={} error_code=db_open_failed error={source}",
            started_at.elapsed().as_millis()
        );
        DbError::Open {
            location: location.to_string(),
            source,
        }
    })?;

    if let Err(err) = bootstrap_connection(&mut conn) {
        error!(
            "event=db_open module=db status=error location={location} duration_ms={} error_code=db_bootstrap_failed error={err}",
            started_at.elapsed().as_millis()
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok location={location} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)
}
