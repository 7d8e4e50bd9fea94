//! Trait definitions for host interactions
//!
//! These traits define the boundary between schedule generation and the host
//! document that owns records and persists reports. Implementations live in
//! other crates (`deptsched-store` provides a SQLite-backed document).

use crate::{EntityKind, Record, ReportDefinition, ReportId};

/// Trait for enumerating records held by the host
pub trait RecordSource {
    /// Error type for source operations
    type Error;

    /// Instance records of one entity kind, in host order
    ///
    /// Type-level entities must be excluded.
    fn records(&self, kind: EntityKind) -> Result<Vec<Record>, Self::Error>;
}

/// Trait for a document that persists report definitions atomically
///
/// Implemented by the infrastructure layer (deptsched-store)
pub trait ReportDocument {
    /// Error type for document operations
    type Error;

    /// Atomic scope type; borrows the document exclusively while open
    type Scope<'a>: ReportScope<Error = Self::Error>
    where
        Self: 'a;

    /// Open an atomic scope labelled for the host's undo history
    fn begin(&mut self, label: &str) -> Result<Self::Scope<'_>, Self::Error>;

    /// Names of reports already persisted in the document
    fn report_names(&self) -> Result<Vec<String>, Self::Error>;

    /// Whether the host treats report names differing only in case as the
    /// same name
    fn case_insensitive_names(&self) -> bool {
        false
    }
}

/// An open atomic scope
///
/// Everything created through the scope becomes visible together on
/// [`commit`](ReportScope::commit). Dropping a scope without committing must
/// discard everything created through it.
pub trait ReportScope {
    /// Error type for scope operations
    type Error;

    /// Persist a report definition inside the scope
    fn create_report(&mut self, definition: ReportDefinition) -> Result<ReportId, Self::Error>;

    /// Apply everything created in the scope
    fn commit(self) -> Result<(), Self::Error>;

    /// Discard everything created in the scope
    fn rollback(self) -> Result<(), Self::Error>;
}
