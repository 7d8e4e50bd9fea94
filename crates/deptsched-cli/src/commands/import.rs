//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use deptsched_domain::{Record, RecordId, RoomData};
use deptsched_store::SqliteDocument;
use serde::Deserialize;
use std::fs;
use tracing::debug;

/// Execute the import command.
pub fn execute_import(
    args: ImportArgs,
    document: &mut SqliteDocument,
    formatter: &Formatter,
) -> Result<()> {
    let json_data = fs::read_to_string(&args.file)?;
    let records = parse_rooms(&json_data)?;
    debug!(file = %args.file, rooms = records.len(), "Parsed room file");

    let (count, replaced) = if args.replace {
        (records.len(), document.replace_records(&records)?)
    } else {
        (document.insert_records(&records)?, 0)
    };

    println!("{}", formatter.import_result(count, replaced));
    Ok(())
}

/// Parse a JSON array of rooms into records, keeping file order.
pub fn parse_rooms(json_data: &str) -> Result<Vec<Record>> {
    let rows: Vec<RoomRow> = serde_json::from_str(json_data)?;

    if rows.is_empty() {
        return Err(CliError::InvalidInput("No rooms provided".to_string()));
    }

    Ok(rows.into_iter().map(RoomRow::into_record).collect())
}

/// Room as written in an import file.
#[derive(Debug, Deserialize)]
struct RoomRow {
    id: i64,
    #[serde(default)]
    number: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    comments: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    area: f64,
    #[serde(default)]
    is_type: bool,
}

impl RoomRow {
    fn into_record(self) -> Record {
        let record = Record::from_room(
            RecordId::new(self.id),
            RoomData {
                number: self.number,
                name: self.name,
                department: self.department,
                comments: self.comments,
                level: self.level,
                area: self.area,
            },
        );
        if self.is_type {
            record.as_type()
        } else {
            record
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptsched_domain::traits::RecordSource;
    use deptsched_domain::{AttributeValue, EntityKind};
    use deptsched_store::StoreError;
    use tempfile::TempDir;

    fn import(document: &mut SqliteDocument, json: &str, replace: bool) -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rooms.json");
        fs::write(&path, json).unwrap();

        let args = ImportArgs {
            file: path.to_string_lossy().into_owned(),
            replace,
        };
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        execute_import(args, document, &formatter)
    }

    #[test]
    fn test_room_row_defaults() {
        let json = r#"[{ "id": 7, "name": "Triage", "department": "ER" }]"#;
        let records = parse_rooms(json).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, RecordId::new(7));
        assert!(!record.is_type);
        assert_eq!(record.attributes[1].value, AttributeValue::Text("Triage".to_string()));
        assert_eq!(record.attributes[2].value, AttributeValue::Text("ER".to_string()));
        assert_eq!(record.attributes[3].value, AttributeValue::Empty);
    }

    #[test]
    fn test_type_rows() {
        let json = r#"[{ "id": 1, "is_type": true }, { "id": 2, "area": 12.5 }]"#;
        let records = parse_rooms(json).unwrap();
        assert!(records[0].is_type);
        assert!(!records[1].is_type);
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(matches!(parse_rooms("[]"), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_rooms("{ nope"), Err(CliError::Serialization(_))));
    }

    #[test]
    fn test_replace_swaps_rooms() {
        let mut document = SqliteDocument::in_memory().unwrap();
        import(&mut document, r#"[{ "id": 1 }, { "id": 2 }]"#, false).unwrap();
        import(&mut document, r#"[{ "id": 3, "department": "ER" }]"#, true).unwrap();

        let records = document.records(EntityKind::Room).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::new(3));
    }

    #[test]
    fn test_failed_replace_keeps_existing_rooms() {
        let mut document = SqliteDocument::in_memory().unwrap();
        import(&mut document, r#"[{ "id": 1 }, { "id": 2 }]"#, false).unwrap();

        let result = import(&mut document, r#"[{ "id": 5 }, { "id": 5 }]"#, true);
        assert!(matches!(result, Err(CliError::Store(StoreError::Duplicate(_)))));
        assert_eq!(document.record_count().unwrap(), 2);
    }
}
