//! Per-invocation context handed to every command

use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::db::PartDb;
use crate::core::distributor::JsonDirectory;
use crate::core::error::{PartError, Result};
use crate::core::footprint::{BatchResolver, PromptResolver, Resolver};

/// Built once in `main` from the merged config and global flags
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub verbose: bool,
    pub quiet: bool,
    /// Unresolved symbols and footprints are asked for on the terminal
    pub interactive: bool,
}

impl Context {
    pub fn new(config: Config, verbose: bool, quiet: bool) -> Self {
        Self {
            config,
            verbose,
            quiet,
            interactive: std::io::stdin().is_terminal(),
        }
    }

    /// Open the configured database; it must already exist
    pub fn open_db(&self) -> Result<PartDb> {
        PartDb::open(self.config.database_path()?)
    }

    pub fn resolver(&self) -> Box<dyn Resolver> {
        if self.interactive {
            Box::new(PromptResolver::new())
        } else {
            Box::new(BatchResolver::default())
        }
    }

    pub fn distributor(&self) -> Result<JsonDirectory> {
        let dir: PathBuf = self.config.cache_dir().ok_or_else(|| {
            PartError::Config("no distributor cache directory configured".to_string())
        })?;
        Ok(JsonDirectory::new(dir, self.config.distributor.name.clone()))
    }

    pub fn ceiling(&self) -> u32 {
        self.config.duplicates.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_db_without_path_is_config_error() {
        let ctx = Context::new(Config::default(), false, false);
        assert!(matches!(ctx.open_db(), Err(PartError::Config(_))));
    }

    #[test]
    fn test_distributor_uses_configured_dir() {
        let tmp = tempdir().unwrap();
        let mut config = Config::default();
        config.distributor.cache_dir = Some(tmp.path().to_path_buf());
        config.distributor.name = "Mouser".to_string();

        let ctx = Context::new(config, true, false);
        let source = ctx.distributor().unwrap();
        assert_eq!(source.dir(), tmp.path());
        assert_eq!(ctx.ceiling(), 10);
    }
}
