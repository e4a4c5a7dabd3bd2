//! `partdb show` command - dump database contents

use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{print_error, render_table};
use crate::components::MINIMAL_COLUMNS;
use crate::core::{Context, Dump};

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Only these tables (default: all)
    #[arg(long, num_args = 1.., value_name = "TABLE")]
    pub tables: Vec<String>,

    /// Only these columns, in this order
    #[arg(long, num_args = 1.., value_name = "COLUMN", conflicts_with_all = ["minimal_columns", "all_columns"])]
    pub columns: Vec<String>,

    /// Distributor part numbers plus symbol and footprint
    #[arg(long, conflicts_with = "all_columns")]
    pub minimal_columns: bool,

    /// Every column of every selected table, sorted by name
    #[arg(long)]
    pub all_columns: bool,

    /// Output CSV instead of a table
    #[arg(long)]
    pub csv: bool,

    /// List table names and nothing else
    #[arg(long)]
    pub table_names_only: bool,
}

pub fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let db = ctx.open_db()?;

    if args.table_names_only {
        for name in db.table_names()? {
            println!("{name}");
        }
        return Ok(());
    }

    let columns: Vec<String> = if args.minimal_columns {
        MINIMAL_COLUMNS.iter().map(|c| c.to_string()).collect()
    } else if args.all_columns {
        Vec::new()
    } else {
        args.columns.clone()
    };

    let dump = db.dump(&args.tables, &columns)?;
    if !dump.invalid_tables.is_empty() {
        print_error(format!(
            "skipping nonexistent tables: {}",
            dump.invalid_tables.join(", ")
        ));
    }
    if !dump.invalid_columns.is_empty() {
        print_error(format!(
            "skipping nonexistent columns: {}",
            dump.invalid_columns.join(", ")
        ));
    }

    if dump.rows.is_empty() {
        return Ok(());
    }

    if args.csv {
        print!("{}", to_csv(&dump)?);
    } else {
        println!("{}", render_table(&dump.columns, &dump.rows));
    }
    Ok(())
}

fn to_csv(dump: &Dump) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(&dump.columns).into_diagnostic()?;
    for row in &dump.rows {
        writer.write_record(row).into_diagnostic()?;
    }
    let bytes = writer.into_inner().into_diagnostic()?;
    String::from_utf8(bytes).into_diagnostic()
}
