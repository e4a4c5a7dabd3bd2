//! Shared helper functions for CLI commands
//!
//! Progress messages go to stdout and only appear with `--verbose`;
//! diagnostics always go to stderr.

use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::core::Context;

/// Print an informational message when running verbose
pub fn print_message(ctx: &Context, message: impl AsRef<str>) {
    if ctx.verbose {
        println!("{}", message.as_ref());
    }
}

/// Print a per-record or per-argument failure to stderr
pub fn print_error(message: impl AsRef<str>) {
    eprintln!("{} {}", style("✗").red(), message.as_ref());
}

pub fn print_warning(message: impl AsRef<str>) {
    eprintln!("{} {}", style("!").yellow(), message.as_ref());
}

/// Plain-text table with a header row
pub fn render_table<H, R>(header: &[H], rows: &[R]) -> String
where
    H: AsRef<str>,
    R: AsRef<[String]>,
{
    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|h| h.as_ref().to_string()));
    for row in rows {
        builder.push_record(row.as_ref().iter().cloned());
    }
    builder.build().with(Style::blank()).to_string()
}

/// `a, b, c` with each name quoted
pub fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("'{}'", s))
        .collect::<Vec<_>>()
        .join(", ")
}
