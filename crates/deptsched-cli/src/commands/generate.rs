//! Generate command implementation.

use crate::cli::GenerateArgs;
use crate::error::Result;
use crate::output::Formatter;
use deptsched_builder::{ScheduleConfig, ScheduleGenerator};
use deptsched_store::SqliteDocument;

/// Execute the generate command.
pub fn execute_generate(
    args: GenerateArgs,
    config: &ScheduleConfig,
    document: &mut SqliteDocument,
    formatter: &Formatter,
) -> Result<()> {
    let generator = ScheduleGenerator::new(effective_config(&args, config))?;
    let summary = generator.generate(document)?;

    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}

/// Apply command-line switches on top of the configured options.
pub(crate) fn effective_config(args: &GenerateArgs, config: &ScheduleConfig) -> ScheduleConfig {
    let mut effective = config.clone();
    if args.strict || args.exclude_null {
        effective.exclude_null_categories = true;
    }
    if args.strict || args.reject_existing {
        effective.reject_existing_names = true;
    }
    effective
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptsched_domain::traits::ReportDocument;
    use deptsched_domain::{Record, RecordId, RoomData};

    #[test]
    fn test_switches_override_config() {
        let config = ScheduleConfig::default();

        let effective = effective_config(&GenerateArgs::default(), &config);
        assert!(!effective.exclude_null_categories);
        assert!(!effective.reject_existing_names);

        let strict = GenerateArgs {
            strict: true,
            ..Default::default()
        };
        let effective = effective_config(&strict, &config);
        assert!(effective.exclude_null_categories);
        assert!(effective.reject_existing_names);
    }

    #[test]
    fn test_generate_against_document() {
        let mut document = SqliteDocument::in_memory().unwrap();
        document
            .insert_record(&Record::from_room(
                RecordId::new(1),
                RoomData {
                    department: Some("ER".into()),
                    level: Some("Level 1".into()),
                    ..Default::default()
                },
            ))
            .unwrap();

        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        execute_generate(
            GenerateArgs::default(),
            &ScheduleConfig::default(),
            &mut document,
            &formatter,
        )
        .unwrap();

        assert_eq!(document.report_names().unwrap(), ["Dept - ER", "All Departments"]);
    }
}
