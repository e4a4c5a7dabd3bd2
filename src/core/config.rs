//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{PartError, Result};

/// Default increment ceiling for duplicate IPNs
pub const DEFAULT_DUPLICATE_CEILING: u32 = 10;

/// partdb configuration with layered hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub distributor: DistributorConfig,
    pub duplicates: DuplicatesConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DistributorConfig {
    /// Value written to the `distributor1` column
    pub name: String,
    /// Directory holding one JSON payload per distributor part number
    pub cache_dir: Option<PathBuf>,
}

impl Default for DistributorConfig {
    fn default() -> Self {
        Self {
            name: "Digikey".to_string(),
            cache_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DuplicatesConfig {
    /// At most this many rows may share one base IPN
    pub ceiling: u32,
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_DUPLICATE_CEILING,
        }
    }
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// `path` overrides the default config location. A missing file is not
    /// an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // 1. Built-in defaults, then 2. the config file
        let file = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = match file {
            Some(ref file) if file.exists() => Self::read(file)?,
            _ => Config::default(),
        };

        // 3. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Parse one config file
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        let config = serde_yml::from_str(&contents)
            .map_err(|e| PartError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write this config as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let yaml = serde_yml::to_string(self).map_err(|e| PartError::Config(e.to_string()))?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Get the path to the user config file
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "partdb")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(db) = var("PARTDB_DATABASE").filter(|v| !v.is_empty()) {
            self.database.path = Some(PathBuf::from(db));
        }
        if let Some(dir) = var("PARTDB_CACHE_DIR").filter(|v| !v.is_empty()) {
            self.distributor.cache_dir = Some(PathBuf::from(dir));
        }
    }

    /// Database path, or a config error naming how to set one
    pub fn database_path(&self) -> Result<&Path> {
        self.database.path.as_deref().ok_or_else(|| {
            PartError::Config(
                "no database configured; pass --database or run `partdb init`".to_string(),
            )
        })
    }

    /// Directory of distributor payloads; defaults to the per-user cache
    /// directory
    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.distributor.cache_dir.clone().or_else(|| {
            directories::ProjectDirs::from("", "", "partdb")
                .map(|dirs| dirs.cache_dir().to_path_buf())
        })
    }
}
