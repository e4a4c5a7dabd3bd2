//! SQLite-backed parts database
//!
//! One table per component family, named after the family, with the IPN as
//! primary key. Tables are created on the first insert of their family.
//!
//! The database file must already exist before it can be opened; it is
//! created by [`PartDb::initialize`] and never implicitly.

mod insert;
mod queries;

pub use insert::{DuplicatePolicy, InsertOutcome};
pub use queries::{Dump, Removal};

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::core::error::{PartError, Result};

/// Columns searched, in order, when removing by part number
pub const REMOVAL_COLUMNS: &[&str] = &["IPN", "MPN", "DPN1", "DPN2"];

pub struct PartDb {
    conn: Connection,
}

impl PartDb {
    /// Create a new, empty database file
    pub fn initialize(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(PartError::AlreadyInitialized(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(|source| PartError::StorageConnection {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "initialized database");
        Ok(Self { conn })
    }

    /// Open an existing database read-write
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|source| PartError::StorageConnection {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Table names in alphabetical order
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn has_table(&self, table: &str) -> Result<bool> {
        table_exists(&self.conn, table)
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?1",
            params![table],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Quoted SQL identifier
fn ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Stored cell rendered the way it is shown and compared
fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(_) => "<blob>".to_string(),
    }
}

/// Every row of a table as (column names, rows of cell text)
fn select_all(conn: &Connection, table: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", ident(table)))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let count = columns.len();
    let rows = stmt
        .query_map([], |row| {
            (0..count)
                .map(|i| row.get::<_, Value>(i).map(cell_text))
                .collect::<std::result::Result<Vec<_>, _>>()
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((columns, rows))
}
