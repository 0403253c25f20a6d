// src/db/connection.rs
//! Opening and initialising SQLite with runtime parameters.

use crate::config::model::DatabaseConfig;
use rusqlite::{Connection, OpenFlags};
use std::{fs, path::Path, time::Duration};

use crate::error::StorageFault;

const SCHEMA: &str = include_str!("../../resources/schema.sql");

/// Apply per-connection pragmas from `[database]`.
fn configure(conn: &Connection, cfg: &DatabaseConfig) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(cfg.busy_timeout_ms))?;
    // journal_mode answers with the resulting mode, which plain pragma_update rejects.
    let _mode: String = conn.pragma_update_and_check(
        None,
        "journal_mode",
        cfg.journal_mode.as_str(),
        |row| row.get(0),
    )?;
    conn.pragma_update(None, "synchronous", cfg.synchronous.as_str())?;
    Ok(())
}

/// Open an existing database. Never creates the file, so querying a store
/// that was never initialised fails instead of leaving an empty file behind.
pub fn open_db_connection(path: &Path, cfg: &DatabaseConfig) -> Result<Connection, StorageFault> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;
    configure(&conn, cfg)?;
    Ok(conn)
}

/// Create the parent directory, the file and the schema as needed.
pub fn init_database(path: &Path, cfg: &DatabaseConfig) -> Result<Connection, StorageFault> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    configure(&conn, cfg)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}
