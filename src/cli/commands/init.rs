//! `partdb init` command - write a config file and create an empty database

use clap::{error::ErrorKind, CommandFactory};
use console::style;
use miette::Result;

use crate::cli::{Cli, GlobalOpts};
use crate::core::{Config, PartDb};

#[derive(clap::Args, Debug)]
pub struct InitArgs {}

/// Runs before any config is loaded, since creating the config is its job
pub fn run(_args: InitArgs, global: &GlobalOpts) -> Result<()> {
    if global.config.is_none() && global.database.is_none() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "init needs --config, --database, or both",
            )
            .exit();
    }

    let config_path = match global.config.clone().or_else(Config::default_path) {
        Some(path) => path,
        None => return Err(miette::miette!("could not determine a config file location")),
    };

    let mut config = if config_path.exists() {
        Config::read(&config_path)?
    } else {
        Config::default()
    };

    if let Some(ref db_path) = global.database {
        PartDb::initialize(db_path)?;
        config.database.path = Some(db_path.clone());
        if !global.quiet {
            println!(
                "{} Created database {}",
                style("✓").green(),
                style(db_path.display()).cyan()
            );
        }
    }

    config.save(&config_path)?;
    if !global.quiet {
        println!(
            "{} Wrote config {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }
    Ok(())
}
