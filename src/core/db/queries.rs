//! Removal and dumping across family tables

use std::collections::{BTreeSet, HashMap};

use rusqlite::params;

use super::{ident, select_all, PartDb, REMOVAL_COLUMNS};
use crate::components::PRIMARY_KEY;
use crate::core::error::Result;

/// Outcome of removing by part number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed { ipn: String, table: String },
    /// The first matching column hit several rows; nothing was deleted
    Ambiguous {
        column: &'static str,
        table: String,
        ipns: Vec<String>,
    },
    NotFound,
}

/// Rows of one or more tables, projected onto a common column list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dump {
    pub columns: Vec<String>,
    /// One entry per row, aligned with `columns`; absent cells are empty
    pub rows: Vec<Vec<String>>,
    pub invalid_tables: Vec<String>,
    pub invalid_columns: Vec<String>,
}

impl PartDb {
    /// Delete the first component whose IPN, MPN, DPN1 or DPN2 equals
    /// `part_number`
    ///
    /// Tables are searched alphabetically and columns in that order. The
    /// search stops at the first column with any match; if it matched more
    /// than one row nothing is deleted.
    pub fn remove(&mut self, part_number: &str) -> Result<Removal> {
        let tables = self.table_names()?;
        let tx = self.conn.transaction()?;

        for table in tables {
            for &column in REMOVAL_COLUMNS {
                let ipns: Vec<String> = {
                    let mut stmt = tx.prepare(&format!(
                        "SELECT {} FROM {} WHERE {} = ?1",
                        PRIMARY_KEY,
                        ident(&table),
                        ident(column)
                    ))?;
                    let rows = stmt
                        .query_map(params![part_number], |row| row.get::<_, String>(0))?
                        .collect::<std::result::Result<Vec<_>, _>>()?;
                    rows
                };

                match ipns.len() {
                    0 => continue,
                    1 => {
                        tx.execute(
                            &format!("DELETE FROM {} WHERE {} = ?1", ident(&table), ident(column)),
                            params![part_number],
                        )?;
                        tx.commit()?;
                        tracing::debug!(part_number, %table, column, "removed component");
                        let ipn = ipns.into_iter().next().unwrap_or_default();
                        return Ok(Removal::Removed { ipn, table });
                    }
                    _ => {
                        return Ok(Removal::Ambiguous {
                            column,
                            table,
                            ipns,
                        })
                    }
                }
            }
        }
        Ok(Removal::NotFound)
    }

    /// Dump rows of `tables` (all tables when empty) restricted to `columns`
    ///
    /// With no columns requested, the sorted union of every selected
    /// table's columns is used. Requested columns keep their order.
    /// Unknown tables and columns are skipped and reported in the result.
    pub fn dump(&self, tables: &[String], columns: &[String]) -> Result<Dump> {
        let existing = self.table_names()?;
        let mut invalid_tables: Vec<String> = tables
            .iter()
            .filter(|t| !existing.contains(t))
            .cloned()
            .collect();
        invalid_tables.sort();
        invalid_tables.dedup();

        let selected: Vec<&String> = existing
            .iter()
            .filter(|t| tables.is_empty() || tables.contains(t))
            .collect();

        let mut known_columns = BTreeSet::new();
        let mut records: Vec<HashMap<String, String>> = Vec::new();
        for table in selected {
            let (names, rows) = select_all(&self.conn, table)?;
            known_columns.extend(names.iter().cloned());
            for row in rows {
                records.push(names.iter().cloned().zip(row).collect());
            }
        }

        let mut invalid_columns: Vec<String> = columns
            .iter()
            .filter(|c| !known_columns.contains(*c))
            .cloned()
            .collect();
        invalid_columns.sort();
        invalid_columns.dedup();

        let columns: Vec<String> = if columns.is_empty() {
            known_columns.into_iter().collect()
        } else {
            columns
                .iter()
                .filter(|c| known_columns.contains(*c))
                .cloned()
                .collect()
        };

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Dump {
            columns,
            rows,
            invalid_tables,
            invalid_columns,
        })
    }
}
