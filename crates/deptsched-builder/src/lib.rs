//! deptsched Builder
//!
//! Partitions room records by department and builds one schedule per
//! department plus a cross-department summary, persisted atomically.
//!
//! # Overview
//!
//! The builder reads records through [`RecordSource`](deptsched_domain::traits::RecordSource),
//! derives the distinct departments, turns each into a filtered report
//! definition and hands everything to a
//! [`ReportDocument`](deptsched_domain::traits::ReportDocument) inside a single
//! scope. Either every report is committed or none is.
//!
//! # Architecture
//!
//! ```text
//! Records → CategoryExtractor → CategorySet → ReportBuilder ─┐
//!                                      AggregateReportBuilder ┴→ ReportScope → commit
//! ```
//!
//! # Example Usage
//!
//! ```
//! use deptsched_builder::{ScheduleConfig, ScheduleGenerator};
//! use deptsched_domain::{Record, RecordId, RoomData};
//!
//! let rooms = vec![
//!     Record::from_room(RecordId::new(1), RoomData {
//!         department: Some("ICU".into()),
//!         ..Default::default()
//!     }),
//!     Record::from_room(RecordId::new(2), RoomData {
//!         department: None,
//!         ..Default::default()
//!     }),
//! ];
//!
//! let generator = ScheduleGenerator::new(ScheduleConfig::strict()).unwrap();
//! let plan = generator.plan(&rooms).unwrap();
//!
//! assert_eq!(plan.report_names, ["Dept - ICU"]);
//! assert_eq!(plan.aggregate_name, "All Departments");
//! ```

#![warn(missing_docs)]

pub mod accessor;
pub mod naming;

mod aggregate;
mod category_set;
mod config;
mod error;
mod extractor;
mod generator;
mod registry;
mod report_builder;
mod summary;


pub use aggregate::AggregateReportBuilder;
pub use category_set::CategorySet;
pub use config::{AttributeBindings, ScheduleConfig};
pub use error::ScheduleError;
pub use extractor::CategoryExtractor;
pub use generator::ScheduleGenerator;
pub use registry::{AttributeRegistry, AttributeRole, ResolvedAttribute, ResolvedAttributes};
pub use report_builder::ReportBuilder;
pub use summary::{CreatedReport, RunSummary, SchedulePlan};
