//! deptsched Storage Layer
//!
//! Implements the host document traits using SQLite.
//!
//! # Architecture
//!
//! - `records` / `attributes` hold imported rooms, in import order
//! - `reports` and its child tables hold schedule definitions
//! - `history` holds one labelled entry per committed scope
//!
//! A [`SqliteScope`] wraps a SQLite transaction: reports created through it
//! become visible on commit, and dropping it uncommitted rolls everything back.
//!
//! # Examples
//!
//! ```no_run
//! use deptsched_store::SqliteDocument;
//!
//! let document = SqliteDocument::new(":memory:").unwrap();
//! // Document is now ready for record import and report generation
//! ```

#![warn(missing_docs)]

mod codec;
mod scope;

pub use scope::SqliteScope;

use deptsched_domain::traits::{RecordSource, ReportDocument};
use deptsched_domain::{EntityKind, Record, RecordId, ReportDefinition, ReportId};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Report not found
    #[error("Report not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record with the same id was already imported
    #[error("Record already exists: {0}")]
    Duplicate(RecordId),
}

/// A report as persisted, with its document metadata
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    /// Identifier assigned at creation
    pub id: ReportId,

    /// Label of the scope that created the report
    pub label: String,

    /// Unix timestamp (seconds) of the scope
    pub created_at: u64,

    /// The schedule itself
    pub definition: ReportDefinition,
}

/// SQLite-based host document
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteDocument instance.
pub struct SqliteDocument {
    conn: Connection,
}

impl SqliteDocument {
    /// Open (or create) a document at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use deptsched_store::SqliteDocument;
    ///
    /// let document = SqliteDocument::new("project.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        let mut document = Self { conn };
        document.initialize_schema()?;
        Ok(document)
    }

    /// Open an in-memory document
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Import records in one transaction, keeping their order
    ///
    /// Fails without importing anything if any record id already exists.
    pub fn insert_records(&mut self, records: &[Record]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        write_records(&tx, records)?;
        tx.commit()?;

        info!(count = records.len(), "Imported records");
        Ok(records.len())
    }

    /// Import a single record
    pub fn insert_record(&mut self, record: &Record) -> Result<(), StoreError> {
        self.insert_records(std::slice::from_ref(record)).map(|_| ())
    }

    /// Swap every imported record for `records` in one transaction; reports
    /// are kept
    ///
    /// Returns the number of records removed. On error the previous records
    /// stay in place.
    pub fn replace_records(&mut self, records: &[Record]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM attributes", [])?;
        let removed = tx.execute("DELETE FROM records", [])?;
        write_records(&tx, records)?;
        tx.commit()?;

        info!(removed, count = records.len(), "Replaced records");
        Ok(removed)
    }

    /// Number of imported records, type-level entities included
    pub fn record_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Every persisted report in creation order
    pub fn reports(&self) -> Result<Vec<StoredReport>, StoreError> {
        codec::read_reports(&self.conn, None)
    }

    /// Reports with the given name, in creation order
    pub fn find_reports(&self, name: &str) -> Result<Vec<StoredReport>, StoreError> {
        codec::read_reports(&self.conn, Some(name))
    }

    /// A report by id
    pub fn get_report(&self, id: ReportId) -> Result<Option<StoredReport>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE r.id = ?1", codec::REPORT_SELECT),
                params![codec::report_id_to_bytes(id)],
                codec::report_row,
            )
            .optional()?;

        row.map(|row| codec::load_report(&self.conn, row)).transpose()
    }

    /// Labels of committed scopes, oldest first
    pub fn history(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT label FROM history ORDER BY id")?;
        let labels = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(labels)
    }
}

fn write_records(tx: &Transaction<'_>, records: &[Record]) -> Result<(), StoreError> {
    for record in records {
        let exists: bool = tx
            .query_row(
                "SELECT 1 FROM records WHERE id = ?1",
                params![record.id.value()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if exists {
            return Err(StoreError::Duplicate(record.id));
        }
        codec::write_record(tx, record)?;
    }
    debug!(count = records.len(), "Wrote records");
    Ok(())
}

impl RecordSource for SqliteDocument {
    type Error = StoreError;

    fn records(&self, kind: EntityKind) -> Result<Vec<Record>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id FROM records WHERE kind = ?1 AND is_type = 0 ORDER BY seq",
        )?;
        let ids = stmt
            .query_map(params![kind.as_str()], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        ids.into_iter()
            .map(|id| {
                let mut record = Record::new(RecordId::new(id), kind);
                record.attributes = codec::read_attributes(&self.conn, id)?;
                Ok(record)
            })
            .collect()
    }
}

impl ReportDocument for SqliteDocument {
    type Error = StoreError;
    type Scope<'a>
        = SqliteScope<'a>
    where
        Self: 'a;

    fn begin(&mut self, label: &str) -> Result<SqliteScope<'_>, Self::Error> {
        SqliteScope::open(self.conn.transaction()?, label)
    }

    fn report_names(&self) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self.conn.prepare("SELECT name FROM reports ORDER BY seq")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptsched_domain::traits::ReportScope;
    use deptsched_domain::{
        Field, FieldId, FieldKind, Filter, RoomData, SortGroupEntry, LEVEL_HANDLE,
    };

    fn room(id: i64, department: &str) -> Record {
        Record::from_room(
            RecordId::new(id),
            RoomData {
                number: format!("{}", 100 + id),
                name: format!("Room {}", id),
                department: Some(department.to_string()),
                comments: None,
                level: Some("Level 1".to_string()),
                area: 12.5,
            },
        )
    }

    fn definition(name: &str) -> ReportDefinition {
        ReportDefinition {
            name: name.to_string(),
            entity_kind: EntityKind::Room,
            fields: vec![Field {
                id: FieldId(0),
                handle: LEVEL_HANDLE,
                heading: "Level".to_string(),
                kind: FieldKind::PerInstance,
                hidden: true,
                totals: false,
            }],
            filters: vec![Filter::equal(FieldId(0), "Level 1")],
            sort_group: vec![SortGroupEntry::sectioned(FieldId(0))],
            itemized: true,
            show_grand_total: true,
            show_grand_total_title: false,
            show_grand_total_count: true,
        }
    }

    #[test]
    fn test_records_round_trip_in_order() {
        let mut document = SqliteDocument::in_memory().unwrap();
        let rooms = vec![room(3, "ER"), room(1, "ICU")];
        document.insert_records(&rooms).unwrap();

        let loaded = document.records(EntityKind::Room).unwrap();
        assert_eq!(loaded, rooms);
    }

    #[test]
    fn test_type_records_excluded() {
        let mut document = SqliteDocument::in_memory().unwrap();
        document.insert_record(&room(1, "ER")).unwrap();
        document.insert_record(&room(2, "ER").as_type()).unwrap();

        assert_eq!(document.record_count().unwrap(), 2);
        assert_eq!(document.records(EntityKind::Room).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_record_rejected() {
        let mut document = SqliteDocument::in_memory().unwrap();
        let result = document.insert_records(&[room(1, "ER"), room(1, "ICU")]);

        assert!(matches!(result, Err(StoreError::Duplicate(id)) if id == RecordId::new(1)));
        assert_eq!(document.record_count().unwrap(), 0);
    }

    #[test]
    fn test_replace_records() {
        let mut document = SqliteDocument::in_memory().unwrap();
        document.insert_records(&[room(1, "ER"), room(2, "ICU")]).unwrap();

        assert_eq!(document.replace_records(&[room(2, "Lobby")]).unwrap(), 2);
        let records = document.records(EntityKind::Room).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::new(2));
    }

    #[test]
    fn test_failed_replace_keeps_previous_records() {
        let mut document = SqliteDocument::in_memory().unwrap();
        document.insert_records(&[room(1, "ER"), room(2, "ICU")]).unwrap();

        let result = document.replace_records(&[room(5, "ER"), room(5, "ICU")]);
        assert!(matches!(result, Err(StoreError::Duplicate(id)) if id == RecordId::new(5)));

        let ids: Vec<RecordId> = document
            .records(EntityKind::Room)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, [RecordId::new(1), RecordId::new(2)]);
    }

    #[test]
    fn test_commit_persists_report() {
        let mut document = SqliteDocument::in_memory().unwrap();
        let mut scope = document.begin("Create Schedules").unwrap();
        let id = scope.create_report(definition("Dept - ER")).unwrap();
        scope.commit().unwrap();

        let stored = document.get_report(id).unwrap().unwrap();
        assert_eq!(stored.definition, definition("Dept - ER"));
        assert_eq!(stored.label, "Create Schedules");
        assert_eq!(document.history().unwrap(), ["Create Schedules"]);
    }

    #[test]
    fn test_rollback_discards_reports() {
        let mut document = SqliteDocument::in_memory().unwrap();
        let mut scope = document.begin("Create Schedules").unwrap();
        scope.create_report(definition("Dept - ER")).unwrap();
        scope.rollback().unwrap();

        assert!(document.report_names().unwrap().is_empty());
        assert!(document.history().unwrap().is_empty());
    }

    #[test]
    fn test_drop_without_commit_discards_reports() {
        let mut document = SqliteDocument::in_memory().unwrap();
        {
            let mut scope = document.begin("Create Schedules").unwrap();
            scope.create_report(definition("Dept - ER")).unwrap();
        }

        assert!(document.reports().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_report_names_allowed() {
        let mut document = SqliteDocument::in_memory().unwrap();
        for _ in 0..2 {
            let mut scope = document.begin("Create Schedules").unwrap();
            scope.create_report(definition("Dept - ER")).unwrap();
            scope.commit().unwrap();
        }

        assert_eq!(document.find_reports("Dept - ER").unwrap().len(), 2);
        assert_eq!(document.report_names().unwrap(), ["Dept - ER", "Dept - ER"]);
    }

    #[test]
    fn test_get_missing_report() {
        let document = SqliteDocument::in_memory().unwrap();
        assert!(document.get_report(ReportId::new()).unwrap().is_none());
    }
}
