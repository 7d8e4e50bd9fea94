//! deptsched CLI - Command-line interface for department schedule generation.

use clap::Parser;
use deptsched_cli::commands;
use deptsched_cli::config::OutputFormat;
use deptsched_cli::{Cli, Command, Config, Formatter};
use deptsched_store::SqliteDocument;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let color_enabled = !cli.no_color;

    if let Err(e) = run(cli) {
        let formatter = Formatter::new(OutputFormat::Table, color_enabled);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> deptsched_cli::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let database = cli.database.unwrap_or(config.settings.database);
    debug!(database = %database, "Opening document");
    let mut document = SqliteDocument::new(&database)?;

    match cli.command {
        Command::Import(args) => {
            commands::execute_import(args, &mut document, &formatter)?;
        }
        Command::Generate(args) => {
            commands::execute_generate(args, &config.schedules, &mut document, &formatter)?;
        }
        Command::Departments(args) => {
            commands::execute_departments(args, &config.schedules, &document, &formatter)?;
        }
        Command::Reports(args) => {
            commands::execute_reports(args, &document, &formatter)?;
        }
    }

    Ok(())
}
