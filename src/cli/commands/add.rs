//! `partdb add` command - build records from a distributor or CSV and store them

use clap::ArgGroup;
use console::style;
use csv::ReaderBuilder;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::cli::helpers::{print_error, print_message, render_table};
use crate::components::Component;
use crate::core::distributor::{fetch, DistributorSource};
use crate::core::{BatchResolver, Context, DuplicatePolicy, PartDb, PartError, Resolver};

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["digikey", "csv"])))]
pub struct AddArgs {
    /// Distributor part numbers (space- or comma-separated)
    #[arg(long, short = 'd', num_args = 1.., value_delimiter = ',', value_name = "DPN")]
    pub digikey: Vec<String>,

    /// CSV files with one canonical record per row
    #[arg(long, short = 'p', num_args = 1.., value_name = "FILE")]
    pub csv: Vec<PathBuf>,

    /// Store duplicates under an IPN with a numeric suffix
    #[arg(long, short = 'i', conflicts_with = "update_existing")]
    pub increment_duplicates: bool,

    /// Overwrite a stored part with the same IPN
    #[arg(long, short = 'u')]
    pub update_existing: bool,

    /// Build the records but do not store them
    #[arg(long)]
    pub no_db: bool,

    /// Print the records as a table
    #[arg(long)]
    pub show: bool,

    /// Print the records as CSV
    #[arg(long)]
    pub show_csv: bool,

    /// Print each distributor response as JSON
    #[arg(long)]
    pub show_api_response: bool,

    /// Never prompt; unknown symbols and footprints are left empty
    #[arg(long)]
    pub batch: bool,
}

impl AddArgs {
    fn policy(&self) -> DuplicatePolicy {
        if self.update_existing {
            DuplicatePolicy::Update
        } else if self.increment_duplicates {
            DuplicatePolicy::Increment
        } else {
            DuplicatePolicy::Reject
        }
    }
}

#[derive(Default)]
struct AddStats {
    processed: usize,
    added: usize,
    updated: usize,
    skipped: usize,
    errors: usize,
}

pub fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    // A missing database ends the command before any part is looked up
    let mut db = if args.no_db {
        None
    } else {
        Some(ctx.open_db()?)
    };

    let mut stats = AddStats::default();
    let components = if args.digikey.is_empty() {
        components_from_csv(&args.csv, &mut stats)?
    } else {
        let source = ctx.distributor()?;
        let mut resolver: Box<dyn Resolver> = if args.batch {
            Box::new(BatchResolver::default())
        } else {
            ctx.resolver()
        };
        components_from_distributor(&args, &source, resolver.as_mut(), &mut stats)?
    };

    if let Some(ref mut db) = db {
        store(db, &components, &args, ctx, &mut stats)?;
    }

    if args.show {
        show_table(&components);
    }
    if args.show_csv {
        show_csv(&components)?;
    }

    if !ctx.quiet {
        print_summary(&stats, args.no_db);
    }
    Ok(())
}

fn components_from_distributor(
    args: &AddArgs,
    source: &dyn DistributorSource,
    resolver: &mut dyn Resolver,
    stats: &mut AddStats,
) -> Result<Vec<Component>> {
    let mut components = Vec::new();
    for dpn in args.digikey.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        stats.processed += 1;
        let part = match fetch(source, dpn) {
            Ok(part) => part,
            Err(e @ PartError::NotFound { .. }) => {
                print_error(e.to_string());
                stats.skipped += 1;
                continue;
            }
            Err(e) => {
                print_error(format!("{dpn}: {e}"));
                stats.errors += 1;
                continue;
            }
        };

        if args.show_api_response {
            println!("{}", serde_json::to_string_pretty(&part).into_diagnostic()?);
        }

        match Component::from_distributor_part(&part, resolver) {
            Ok(Some(comp)) => components.push(comp),
            Ok(None) => stats.skipped += 1,
            Err(e) => {
                print_error(format!("{dpn}: {e}"));
                stats.errors += 1;
            }
        }
    }
    Ok(components)
}

fn components_from_csv(files: &[PathBuf], stats: &mut AddStats) -> Result<Vec<Component>> {
    let mut components = Vec::new();
    for path in files {
        read_csv(path, &mut components, stats)?;
    }
    Ok(components)
}

fn read_csv(path: &Path, components: &mut Vec<Component>, stats: &mut AddStats) -> Result<()> {
    let file = File::open(path)
        .map_err(|e| miette::miette!("cannot open {}: {}", path.display(), e))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    for (row_idx, result) in rdr.deserialize::<HashMap<String, String>>().enumerate() {
        let row_num = row_idx + 2; // +2 for 1-indexed and header row
        stats.processed += 1;

        let fields = match result {
            Ok(fields) => fields,
            Err(e) => {
                print_error(format!("{} row {}: {}", path.display(), row_num, e));
                stats.errors += 1;
                continue;
            }
        };

        match Component::from_dict(&fields) {
            Ok(comp) => components.push(comp),
            Err(e) => {
                print_error(format!("{} row {}: {}", path.display(), row_num, e));
                stats.errors += 1;
            }
        }
    }
    Ok(())
}

fn store(
    db: &mut PartDb,
    components: &[Component],
    args: &AddArgs,
    ctx: &Context,
    stats: &mut AddStats,
) -> Result<()> {
    let policy = args.policy();
    for comp in components {
        match db.add_component(comp, policy, ctx.ceiling()) {
            Ok(outcome) => {
                if outcome.created_table {
                    print_message(ctx, format!("Creating table '{}'", outcome.table));
                }
                if outcome.replaced {
                    print_message(
                        ctx,
                        format!(
                            "Updating component '{}' in table '{}'",
                            outcome.ipn, outcome.table
                        ),
                    );
                    stats.updated += 1;
                } else {
                    print_message(
                        ctx,
                        format!(
                            "Adding component '{}' to table '{}'",
                            outcome.ipn, outcome.table
                        ),
                    );
                    stats.added += 1;
                }
            }
            Err(e) if e.is_record_local() => {
                print_error(e.to_string());
                stats.errors += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// One table per run of same-family records
fn show_table(components: &[Component]) {
    for group in components.chunk_by(|a, b| a.family() == b.family()) {
        let header = group[0].family().column_names();
        let rows: Vec<Vec<String>> = group
            .iter()
            .map(|comp| comp.columns().map(|(_, v)| v.to_string()).collect())
            .collect();
        println!("{}", render_table(&header, &rows));
    }
}

/// CSV with a header before each run of same-family records
fn show_csv(components: &[Component]) -> Result<()> {
    let mut previous = None;
    for comp in components {
        let header = previous != Some(comp.family());
        print!("{}", comp.to_csv(header, true)?);
        previous = Some(comp.family());
    }
    Ok(())
}

fn print_summary(stats: &AddStats, no_db: bool) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Add Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Parts processed:  {}", style(stats.processed).cyan());
    if no_db {
        println!("  {}", style("Database not modified (--no-db)").yellow());
    } else {
        println!("  Parts added:      {}", style(stats.added).green());
    }
    if stats.updated > 0 {
        println!("  Parts updated:    {}", style(stats.updated).yellow());
    }
    if stats.skipped > 0 {
        println!("  Skipped:          {}", style(stats.skipped).dim());
    }
    if stats.errors > 0 {
        println!("  Errors:           {}", style(stats.errors).red());
    }
}
