//! deptsched Domain Layer
//!
//! This crate holds the domain model for department schedule generation and
//! the trait interfaces the host document implements. Apart from `uuid` for
//! report identifiers it has no external dependencies.
//!
//! ## Key Concepts
//!
//! - **Record**: a room read from the host document, a bag of attributes
//! - **Category**: a distinct department value used to partition records
//! - **ReportDefinition**: columns, filters, grouping and totals of one schedule
//! - **Traits**: the seams to the host (record enumeration, atomic report scope)
//!
//! ## Architecture
//!
//! - Pure data and predicates only
//! - Grouping and report construction live in `deptsched-builder`
//! - Persistence lives in host implementations such as `deptsched-store`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod category;
pub mod record;
pub mod report;
pub mod traits;

// Re-exports for convenience
pub use attribute::{Attribute, AttributeHandle, AttributeKey, AttributeValue, BuiltInAttribute};
pub use category::Category;
pub use record::{EntityKind, Record, RecordId, RoomData, LEVEL_ATTRIBUTE_NAME, LEVEL_HANDLE};
pub use report::{
    Field, FieldId, FieldKind, Filter, FilterOp, ReportDefinition, ReportId, SortGroupEntry,
};
