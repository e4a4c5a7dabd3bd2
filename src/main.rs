use clap::Parser;
use miette::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use partdb::cli::{Cli, Commands};
use partdb::core::{Config, Context};

/// Logs go to stderr; `RUST_LOG` refines the filter
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(if global.quiet { Level::ERROR } else { Level::WARN });

    let command = match cli.command {
        Commands::Init(args) => return partdb::cli::commands::init::run(args, &global),
        Commands::Completions(args) => return partdb::cli::commands::completions::run(args),
        other => other,
    };

    let mut config = Config::load(global.config.as_deref())?;
    if let Some(ref db) = global.database {
        config.database.path = Some(db.clone());
    }
    let ctx = Context::new(config, global.verbose, global.quiet);

    match command {
        Commands::Add(args) => partdb::cli::commands::add::run(args, &ctx),
        Commands::Rm(args) => partdb::cli::commands::rm::run(args, &ctx),
        Commands::Show(args) => partdb::cli::commands::show::run(args, &ctx),
        Commands::Init(_) | Commands::Completions(_) => Ok(()),
    }
}
