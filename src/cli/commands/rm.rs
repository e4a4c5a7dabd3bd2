//! `partdb rm` command - remove parts by IPN, MPN or distributor part number

use miette::Result;

use crate::cli::helpers::{print_error, print_message, quoted_list};
use crate::core::{Context, Removal};

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// IPN, MPN, DPN1 or DPN2 of each part to remove
    #[arg(required = true, value_name = "PN")]
    pub part_numbers: Vec<String>,
}

pub fn run(args: RmArgs, ctx: &Context) -> Result<()> {
    let mut db = ctx.open_db()?;

    for pn in &args.part_numbers {
        match db.remove(pn) {
            Ok(Removal::Removed { ipn, table }) => {
                print_message(ctx, format!("Removing component '{ipn}' from table '{table}'"));
            }
            Ok(Removal::Ambiguous {
                column,
                table,
                ipns,
            }) => print_message(
                ctx,
                format!(
                    "Multiple components with {column}=='{pn}' in table '{table}' ({}); skipping",
                    quoted_list(&ipns)
                ),
            ),
            Ok(Removal::NotFound) => {
                print_message(ctx, format!("No component matching '{pn}' found"));
            }
            Err(e) if e.is_record_local() => print_error(format!("{pn}: {e}")),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
