//! Departments command implementation.

use crate::cli::GenerateArgs;
use crate::commands::generate::effective_config;
use crate::error::Result;
use crate::output::Formatter;
use deptsched_builder::{ScheduleConfig, ScheduleGenerator};
use deptsched_domain::traits::RecordSource;
use deptsched_domain::EntityKind;
use deptsched_store::SqliteDocument;

/// Execute the departments command.
///
/// Shows what `generate` would create without writing anything.
pub fn execute_departments(
    args: GenerateArgs,
    config: &ScheduleConfig,
    document: &SqliteDocument,
    formatter: &Formatter,
) -> Result<()> {
    let generator = ScheduleGenerator::new(effective_config(&args, config))?;
    let records = document.records(EntityKind::Room)?;
    let plan = generator.plan(&records)?;

    println!("{}", formatter.format_plan(&plan)?);
    Ok(())
}
