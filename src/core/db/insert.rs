//! Identity resolution and writes
//!
//! Each insert is its own transaction: check the family table exists,
//! look for the candidate IPN, settle a collision according to the
//! [`DuplicatePolicy`], then write.

use std::collections::HashSet;

use rusqlite::types::ToSql;
use rusqlite::Transaction;

use super::{ident, select_all, table_exists, PartDb};
use crate::components::{Component, Conflict, PRIMARY_KEY};
use crate::core::error::{PartError, Result};
use crate::core::identity::with_suffix;

/// What to do when the candidate IPN is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`PartError::DuplicateIdentity`]
    #[default]
    Reject,
    /// Try `_1`, `_2`, ... below the ceiling
    Increment,
    /// Overwrite the stored row
    Update,
}

/// Result of a successful insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    /// IPN the record was stored under
    pub ipn: String,
    pub table: &'static str,
    /// The family table did not exist before this insert
    pub created_table: bool,
    /// An existing row was overwritten
    pub replaced: bool,
}

impl PartDb {
    /// Store a record, resolving IPN collisions per `policy`
    ///
    /// `ceiling` bounds how many rows may share one base IPN under
    /// [`DuplicatePolicy::Increment`].
    pub fn add_component(
        &mut self,
        comp: &Component,
        policy: DuplicatePolicy,
        ceiling: u32,
    ) -> Result<InsertOutcome> {
        let table = comp.table();
        let tx = self.conn.transaction()?;

        let created_table = !table_exists(&tx, table)?;
        if created_table {
            tracing::debug!(table, "creating table");
            tx.execute(&comp.family().create_table_sql(), [])?;
        }

        if policy == DuplicatePolicy::Reject {
            if let Some(existing) = same_content_row(&tx, comp)? {
                return Err(PartError::DuplicateIdentity {
                    ipn: existing,
                    table: table.to_string(),
                });
            }
        }

        let existing = existing_ipns(&tx, table)?;
        let base = comp.ipn();
        let (ipn, conflict, replaced) = if !existing.contains(base) {
            (base.to_string(), Conflict::Reject, false)
        } else {
            match policy {
                DuplicatePolicy::Update => (base.to_string(), Conflict::Replace, true),
                DuplicatePolicy::Increment => {
                    let ipn = (1..ceiling)
                        .map(|n| with_suffix(base, n))
                        .find(|candidate| !existing.contains(candidate))
                        .ok_or_else(|| PartError::DuplicateIdentityCeilingExceeded {
                            ipn: base.to_string(),
                            table: table.to_string(),
                        })?;
                    tracing::debug!(base, %ipn, "resolved duplicate IPN");
                    (ipn, Conflict::Reject, false)
                }
                DuplicatePolicy::Reject => {
                    return Err(PartError::DuplicateIdentity {
                        ipn: base.to_string(),
                        table: table.to_string(),
                    })
                }
            }
        };

        let record = if ipn == base {
            comp.clone()
        } else {
            comp.with_ipn(&ipn)
        };
        write(&tx, &record, conflict)?;
        tx.commit()?;
        tracing::debug!(%ipn, table, replaced, "stored component");

        Ok(InsertOutcome {
            ipn,
            table,
            created_table,
            replaced,
        })
    }

    /// IPN of a stored row equal to `comp` in every column but the IPN
    pub fn find_same_content(&self, comp: &Component) -> Result<Option<String>> {
        if !table_exists(&self.conn, comp.table())? {
            return Ok(None);
        }
        same_content_row(&self.conn, comp)
    }
}

fn existing_ipns(tx: &Transaction<'_>, table: &str) -> Result<HashSet<String>> {
    let mut stmt = tx.prepare(&format!("SELECT {} FROM {}", PRIMARY_KEY, ident(table)))?;
    let ipns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<HashSet<_>, _>>()?;
    Ok(ipns)
}

fn same_content_row(conn: &rusqlite::Connection, comp: &Component) -> Result<Option<String>> {
    let (columns, rows) = select_all(conn, comp.table())?;
    let found = rows.into_iter().find_map(|row| {
        let mut ipn = None;
        for (column, cell) in columns.iter().zip(row) {
            if column == PRIMARY_KEY {
                ipn = Some(cell);
            } else if comp.get(column) != Some(cell.as_str()) {
                return None;
            }
        }
        ipn
    });
    Ok(found)
}

fn write(tx: &Transaction<'_>, record: &Component, conflict: Conflict) -> Result<()> {
    let (sql, params) = record.to_sql(conflict);
    let named: Vec<(&str, &dyn ToSql)> = params
        .iter()
        .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
        .collect();
    tx.execute(&sql, named.as_slice())?;
    Ok(())
}
