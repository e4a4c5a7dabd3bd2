//! Error taxonomy shared by the normalizer, component model and store

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PartError {
    #[error("no part found for distributor part number '{part_number}'")]
    #[diagnostic(code(partdb::not_found))]
    NotFound { part_number: String },

    #[error("no component family handles {what} '{tag}'")]
    #[diagnostic(
        code(partdb::unrecognized_family),
        help("supported IPN prefixes: R, C, OpAmp, MCU, VReg, D, LED, BJT, Conn, Comp, SW, Graphic")
    )]
    UnrecognizedFamily { what: &'static str, tag: String },

    #[error("part '{part}' is missing required attribute '{attribute}'")]
    #[diagnostic(code(partdb::missing_attribute))]
    MissingRequiredAttribute { part: String, attribute: String },

    #[error("unknown {field} value '{value}'")]
    #[diagnostic(
        code(partdb::invalid_value),
        help("the distributor uses a value the normalization rules do not know yet")
    )]
    InvalidEnumeratedValue { field: &'static str, value: String },

    #[error("component '{ipn}' already in table '{table}'")]
    #[diagnostic(
        code(partdb::duplicate),
        help("use --increment-duplicates or --update-existing")
    )]
    DuplicateIdentity { ipn: String, table: String },

    #[error("too many duplicates of '{ipn}' in table '{table}'")]
    #[diagnostic(code(partdb::duplicate_ceiling))]
    DuplicateIdentityCeilingExceeded { ipn: String, table: String },

    #[error("could not connect to database at path: {}", path.display())]
    #[diagnostic(
        code(partdb::storage_connection),
        help("create one with `partdb init --database <path>`")
    )]
    StorageConnection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{} already exists and cannot be re-initialized", .0.display())]
    #[diagnostic(code(partdb::already_initialized))]
    AlreadyInitialized(PathBuf),

    #[error("database error: {0}")]
    #[diagnostic(code(partdb::storage))]
    Storage(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    #[diagnostic(code(partdb::csv))]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(partdb::json))]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    #[diagnostic(code(partdb::io))]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    #[diagnostic(code(partdb::config))]
    Config(String),
}

impl PartError {
    /// Errors that end a single record but leave the rest of a batch running
    pub fn is_record_local(&self) -> bool {
        !matches!(self, PartError::StorageConnection { .. })
    }
}

pub type Result<T> = std::result::Result<T, PartError>;
