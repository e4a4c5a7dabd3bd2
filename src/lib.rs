//! partdb: normalize distributor part data into a canonical KiCad parts
//! database
//!
//! Parts come in from a distributor payload or a CSV file, are rewritten
//! into one canonical form per component family, and are stored in SQLite
//! keyed by a derived internal part number (IPN).

pub mod cli;
pub mod components;
pub mod core;
