//! Cross-department summary report

use crate::registry::{AttributeRegistry, AttributeRole};
use crate::report_builder::FieldList;
use crate::ScheduleError;
use deptsched_domain::{EntityKind, FieldKind, Record, ReportDefinition, SortGroupEntry};

/// Builds the summary schedule spanning every department
///
/// One row per department (not itemized) with the total area; no filter.
#[derive(Debug, Clone)]
pub struct AggregateReportBuilder {
    registry: AttributeRegistry,
    name: String,
}

impl AggregateReportBuilder {
    /// Roles the summary report needs, in column order
    pub const ROLES: [AttributeRole; 2] = [AttributeRole::Department, AttributeRole::Area];

    /// Create a builder
    pub fn new(registry: AttributeRegistry, name: impl Into<String>) -> Self {
        Self {
            registry,
            name: name.into(),
        }
    }

    /// Name of the summary report
    pub fn report_name(&self) -> &str {
        &self.name
    }

    /// Build the summary report from a template record
    pub fn build(&self, template: &Record) -> Result<ReportDefinition, ScheduleError> {
        let columns = self.registry.resolve(template, &Self::ROLES)?;

        let mut fields = FieldList::default();
        let department = fields.push(&columns, AttributeRole::Department, FieldKind::PerInstance)?;
        let area = fields.push(&columns, AttributeRole::Area, FieldKind::AggregatedPerView)?;
        fields.show_totals(area);

        Ok(ReportDefinition {
            name: self.name.clone(),
            entity_kind: EntityKind::Room,
            fields: fields.into_vec(),
            filters: Vec::new(),
            sort_group: vec![SortGroupEntry::new(department)],
            itemized: false,
            show_grand_total: true,
            show_grand_total_title: true,
            show_grand_total_count: true,
        })
    }
}
