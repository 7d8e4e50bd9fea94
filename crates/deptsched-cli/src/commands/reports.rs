//! Reports command implementation.

use crate::cli::ReportsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use deptsched_store::SqliteDocument;

/// Execute the reports command.
pub fn execute_reports(
    args: ReportsArgs,
    document: &SqliteDocument,
    formatter: &Formatter,
) -> Result<()> {
    match args.name {
        Some(name) => {
            let reports = document.find_reports(&name)?;
            if reports.is_empty() {
                return Err(CliError::InvalidInput(format!("No schedule named '{}'", name)));
            }
            for report in &reports {
                println!("{}", formatter.format_report_detail(report)?);
            }
        }
        None => {
            let reports = document.reports()?;
            println!("{}", formatter.format_reports(&reports)?);
        }
    }

    Ok(())
}
