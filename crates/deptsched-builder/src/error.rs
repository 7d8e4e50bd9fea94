//! Error types for schedule generation

use crate::registry::AttributeRole;
use deptsched_domain::RecordId;
use thiserror::Error;

/// Errors that can occur while generating schedules
///
/// Every variant aborts the whole run; nothing created before the failure
/// survives.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// No input records
    #[error("No room records found; nothing to schedule")]
    EmptySource,

    /// A required attribute cannot be resolved on the template record
    #[error("Attribute '{role}' not found on template record {record}")]
    MissingAttribute {
        /// Role that failed to resolve
        role: AttributeRole,
        /// Template record that was searched
        record: RecordId,
    },

    /// Two reports would share a name under the host's naming rule
    #[error("Duplicate report name '{name}' (conflicts with {conflicts_with})")]
    DuplicateReportName {
        /// Report name that collides
        name: String,
        /// What it collides with
        conflicts_with: String,
    },

    /// The host failed to commit the atomic scope
    #[error("Commit failed: {0}")]
    Commit(String),

    /// The host failed to enumerate records
    #[error("Record source error: {0}")]
    Source(String),

    /// The host failed to open the scope or create a report
    #[error("Document error: {0}")]
    Document(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
