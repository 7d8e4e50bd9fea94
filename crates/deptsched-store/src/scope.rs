//! Atomic report scope backed by a SQLite transaction

use crate::codec;
use crate::StoreError;
use deptsched_domain::traits::ReportScope;
use deptsched_domain::{ReportDefinition, ReportId};
use rusqlite::{params, Transaction};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// An open scope on a [`SqliteDocument`](crate::SqliteDocument)
///
/// Holds the document's connection exclusively until committed, rolled back
/// or dropped. Dropping rolls back.
pub struct SqliteScope<'a> {
    tx: Transaction<'a>,
    history_id: i64,
    label: String,
    created: usize,
}

impl<'a> SqliteScope<'a> {
    pub(crate) fn open(tx: Transaction<'a>, label: &str) -> Result<Self, StoreError> {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        tx.execute(
            "INSERT INTO history (label, created_at) VALUES (?1, ?2)",
            params![label, created_at],
        )?;
        let history_id = tx.last_insert_rowid();

        debug!(label, history_id, "Opened scope");
        Ok(Self {
            tx,
            history_id,
            label: label.to_string(),
            created: 0,
        })
    }
}

impl ReportScope for SqliteScope<'_> {
    type Error = StoreError;

    fn create_report(&mut self, definition: ReportDefinition) -> Result<ReportId, Self::Error> {
        let id = ReportId::new();
        codec::write_report(&self.tx, id, self.history_id, &definition)?;
        self.created += 1;

        debug!(report = %definition.name, %id, "Staged report");
        Ok(id)
    }

    fn commit(self) -> Result<(), Self::Error> {
        self.tx.commit()?;
        info!(label = %self.label, reports = self.created, "Committed scope");
        Ok(())
    }

    fn rollback(self) -> Result<(), Self::Error> {
        self.tx.rollback()?;
        info!(label = %self.label, discarded = self.created, "Rolled back scope");
        Ok(())
    }
}
