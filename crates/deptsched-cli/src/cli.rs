//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};

/// deptsched CLI - Generate per-department room schedules.
#[derive(Debug, Parser)]
#[command(name = "deptsched")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Document database path
    #[arg(short, long, global = true, env = "DEPTSCHED_DATABASE")]
    pub database: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names or IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import rooms from a JSON file into the document
    Import(ImportArgs),

    /// Create one schedule per department plus the summary schedule
    Generate(GenerateArgs),

    /// Preview departments and the schedules a run would create
    Departments(GenerateArgs),

    /// List schedules in the document, or show one in detail
    Reports(ReportsArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file containing an array of rooms
    pub file: String,

    /// Remove previously imported rooms first
    #[arg(long)]
    pub replace: bool,
}

/// Arguments for the generate and departments commands.
#[derive(Debug, Default, Parser)]
pub struct GenerateArgs {
    /// Use the strict preset (skip rooms without a department, refuse existing names)
    #[arg(long)]
    pub strict: bool,

    /// Skip rooms without a department
    #[arg(long)]
    pub exclude_null: bool,

    /// Fail if a schedule name already exists in the document
    #[arg(long)]
    pub reject_existing: bool,
}

/// Arguments for the reports command.
#[derive(Debug, Parser)]
pub struct ReportsArgs {
    /// Show the schedules with this name in detail
    #[arg(short, long)]
    pub name: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_command() {
        let cli = Cli::parse_from(["deptsched", "generate", "--exclude-null"]);
        match cli.command {
            Command::Generate(args) => {
                assert!(args.exclude_null);
                assert!(!args.strict);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_import_command() {
        let cli = Cli::parse_from(["deptsched", "import", "rooms.json", "--replace"]);
        match cli.command {
            Command::Import(args) => {
                assert_eq!(args.file, "rooms.json");
                assert!(args.replace);
            }
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "deptsched",
            "reports",
            "--name",
            "Dept - ICU",
            "-vv",
            "--format",
            "json",
            "--database",
            "project.db",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.database.as_deref(), Some("project.db"));
        match cli.command {
            Command::Reports(args) => assert_eq!(args.name.as_deref(), Some("Dept - ICU")),
            _ => panic!("Expected Reports command"),
        }
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["deptsched"]).is_err());
    }
}
