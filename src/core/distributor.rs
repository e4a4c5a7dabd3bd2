//! Distributor part data
//!
//! The distributor is an external collaborator: all the core needs is a
//! product record with taxonomy, manufacturer data and an ordered parameter
//! list. Records are read from JSON payloads saved per part number.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{PartError, Result};

/// Distributor's classification of a part; `children` holds subcategories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    pub category: String,
    pub children: Vec<Taxonomy>,
}

/// One (name, value) pair from the distributor's parameter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub parameter: String,
    pub value: String,
}

/// Structured product record as returned by a distributor lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DistributorPart {
    /// Distributor name written to `distributor1`
    pub distributor: String,
    pub datasheet: String,
    pub manufacturer: String,
    pub mpn: String,
    pub dpn: String,
    pub taxonomy: Taxonomy,
    /// Product family label, used to tell capacitor technologies apart
    pub family: String,
    pub series: String,
    pub parameters: Vec<Parameter>,
}

impl DistributorPart {
    /// First subcategory name, or empty
    pub fn subcategory(&self) -> &str {
        self.taxonomy
            .children
            .first()
            .map(|c| c.category.as_str())
            .unwrap_or("")
    }

    /// Value of the first parameter with this name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.parameter == name)
            .map(|p| p.value.as_str())
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters
            .iter()
            .map(|p| (p.parameter.as_str(), p.value.as_str()))
    }
}

/// Anything that can look up a part by distributor part number
///
/// `Ok(None)` means the distributor does not know the part.
pub trait DistributorSource {
    fn product_details(&self, dpn: &str) -> Result<Option<DistributorPart>>;
}

/// Payloads stored as `<dir>/<dpn>.json`, with `/` in part numbers written
/// as `_`
pub struct JsonDirectory {
    dir: PathBuf,
    distributor: String,
}

impl JsonDirectory {
    pub fn new(dir: impl Into<PathBuf>, distributor: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            distributor: distributor.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, dpn: &str) -> PathBuf {
        self.dir.join(format!("{}.json", dpn.replace('/', "_")))
    }
}

impl DistributorSource for JsonDirectory {
    fn product_details(&self, dpn: &str) -> Result<Option<DistributorPart>> {
        let path = self.path_for(dpn);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no payload for part");
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        let mut part: DistributorPart = serde_json::from_str(&contents)?;
        if part.distributor.is_empty() {
            part.distributor = self.distributor.clone();
        }
        if part.dpn.is_empty() {
            part.dpn = dpn.to_string();
        }
        Ok(Some(part))
    }
}

/// Look a part up, turning an unknown part into [`PartError::NotFound`]
pub fn fetch(source: &dyn DistributorSource, dpn: &str) -> Result<DistributorPart> {
    source
        .product_details(dpn)?
        .ok_or_else(|| PartError::NotFound {
            part_number: dpn.to_string(),
        })
}
