//! Per-department report definitions

use crate::registry::{AttributeRegistry, AttributeRole, ResolvedAttributes};
use crate::ScheduleError;
use deptsched_domain::{
    Category, EntityKind, Field, FieldId, FieldKind, Filter, Record, ReportDefinition,
    SortGroupEntry,
};

/// Builds one itemized schedule per department
///
/// Columns: number, name, department, comments, level (hidden) and area
/// (aggregated, with totals). Rows are filtered to the department, grouped by
/// level with header/footer/blank line, then sorted by name.
///
/// # Examples
///
/// ```
/// use deptsched_builder::{AttributeRegistry, ReportBuilder};
/// use deptsched_domain::{Category, Record, RecordId, RoomData};
///
/// let builder = ReportBuilder::new(AttributeRegistry::default(), "Dept - ");
/// let template = Record::from_room(RecordId::new(1), RoomData {
///     level: Some("Level 1".into()),
///     ..Default::default()
/// });
///
/// let report = builder.build(&Category::new("ICU"), &template).unwrap();
/// assert_eq!(report.name, "Dept - ICU");
/// assert_eq!(report.fields.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    registry: AttributeRegistry,
    prefix: String,
}

impl ReportBuilder {
    /// Roles a per-department report needs, in column order
    pub const ROLES: [AttributeRole; 6] = AttributeRole::ALL;

    /// Create a builder
    pub fn new(registry: AttributeRegistry, prefix: impl Into<String>) -> Self {
        Self {
            registry,
            prefix: prefix.into(),
        }
    }

    /// Report name for a category
    pub fn report_name(&self, category: &Category) -> String {
        format!("{}{}", self.prefix, category.as_str())
    }

    /// Resolve the column attributes on a template record
    ///
    /// The template only supplies attribute handles; it has no bearing on which
    /// records the report lists.
    pub fn resolve(&self, template: &Record) -> Result<ResolvedAttributes, ScheduleError> {
        self.registry.resolve(template, &Self::ROLES)
    }

    /// Build the report for a category from a template record
    pub fn build(&self, category: &Category, template: &Record) -> Result<ReportDefinition, ScheduleError> {
        let columns = self.resolve(template)?;
        self.build_resolved(category, &columns)
    }

    /// Build the report for a category from already resolved columns
    pub fn build_resolved(
        &self,
        category: &Category,
        columns: &ResolvedAttributes,
    ) -> Result<ReportDefinition, ScheduleError> {
        let mut fields = FieldList::default();
        let _number = fields.push(columns, AttributeRole::Number, FieldKind::PerInstance)?;
        let name = fields.push(columns, AttributeRole::Name, FieldKind::PerInstance)?;
        let department = fields.push(columns, AttributeRole::Department, FieldKind::PerInstance)?;
        let _comments = fields.push(columns, AttributeRole::Comments, FieldKind::PerInstance)?;
        let level = fields.push(columns, AttributeRole::Level, FieldKind::PerInstance)?;
        let area = fields.push(columns, AttributeRole::Area, FieldKind::AggregatedPerView)?;

        fields.hide(level);
        fields.show_totals(area);

        Ok(ReportDefinition {
            name: self.report_name(category),
            entity_kind: EntityKind::Room,
            fields: fields.into_vec(),
            filters: vec![Filter::equal(department, category.as_str())],
            sort_group: vec![SortGroupEntry::sectioned(level), SortGroupEntry::new(name)],
            itemized: true,
            show_grand_total: true,
            show_grand_total_title: true,
            show_grand_total_count: true,
        })
    }
}

/// Ordered field list that hands out positional ids
#[derive(Debug, Default)]
pub(crate) struct FieldList {
    fields: Vec<Field>,
}

impl FieldList {
    /// Append a visible column for a resolved role
    pub(crate) fn push(
        &mut self,
        columns: &ResolvedAttributes,
        role: AttributeRole,
        kind: FieldKind,
    ) -> Result<FieldId, ScheduleError> {
        // Roles are resolved before building; a gap here is a caller bug.
        let resolved = columns
            .get(role)
            .ok_or_else(|| ScheduleError::Config(format!("role '{}' was not resolved", role)))?;
        let id = FieldId(self.fields.len());
        self.fields.push(Field {
            id,
            handle: resolved.handle,
            heading: resolved.heading.clone(),
            kind,
            hidden: false,
            totals: false,
        });
        Ok(id)
    }

    pub(crate) fn hide(&mut self, id: FieldId) {
        self.fields[id.0].hidden = true;
    }

    pub(crate) fn show_totals(&mut self, id: FieldId) {
        self.fields[id.0].totals = true;
    }

    pub(crate) fn into_vec(self) -> Vec<Field> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptsched_domain::{BuiltInAttribute, RecordId, RoomData, LEVEL_HANDLE};

    fn template() -> Record {
        Record::from_room(
            RecordId::new(1),
            RoomData {
                number: "101".into(),
                name: "Bay 1".into(),
                department: Some("ICU".into()),
                level: Some("Level 1".into()),
                area: 18.0,
                ..Default::default()
            },
        )
    }

    fn builder() -> ReportBuilder {
        ReportBuilder::new(AttributeRegistry::default(), "Dept - ")
    }

    #[test]
    fn test_field_order_and_flags() {
        let report = builder().build(&Category::new("ICU"), &template()).unwrap();

        let headings: Vec<&str> = report.fields.iter().map(|f| f.heading.as_str()).collect();
        assert_eq!(headings, ["Number", "Name", "Department", "Comments", "Level", "Area"]);

        let hidden: Vec<bool> = report.fields.iter().map(|f| f.hidden).collect();
        assert_eq!(hidden, [false, false, false, false, true, false]);

        let totals: Vec<bool> = report.fields.iter().map(|f| f.totals).collect();
        assert_eq!(totals, [false, false, false, false, false, true]);

        assert_eq!(report.fields[4].handle, LEVEL_HANDLE);
        assert_eq!(report.fields[5].kind, FieldKind::AggregatedPerView);
        assert!(report.fields[..5].iter().all(|f| f.kind == FieldKind::PerInstance));
        assert_eq!(report.visible_fields().count(), 5);
    }

    #[test]
    fn test_filter_on_department() {
        let report = builder().build(&Category::new("ICU"), &template()).unwrap();

        assert_eq!(report.filters.len(), 1);
        let filter = &report.filters[0];
        assert_eq!(
            report.field(filter.field).unwrap().handle,
            BuiltInAttribute::RoomDepartment.default_handle()
        );
        assert_eq!(filter.value, "ICU");
    }

    #[test]
    fn test_sort_group_hierarchy() {
        let report = builder().build(&Category::new("ICU"), &template()).unwrap();

        assert_eq!(report.sort_group.len(), 2);
        let level = report.sort_group[0];
        assert_eq!(report.field(level.field).unwrap().heading, "Level");
        assert!(level.show_header && level.show_footer && level.show_blank_line);

        let name = report.sort_group[1];
        assert_eq!(report.field(name.field).unwrap().heading, "Name");
        assert!(!name.show_header && !name.show_footer && !name.show_blank_line);
    }

    #[test]
    fn test_totals_flags() {
        let report = builder().build(&Category::new("ICU"), &template()).unwrap();
        assert!(report.itemized);
        assert!(report.show_grand_total);
        assert!(report.show_grand_total_title);
        assert!(report.show_grand_total_count);
    }

    #[test]
    fn test_membership_governed_by_filter_only() {
        let report = builder().build(&Category::new("ER"), &template()).unwrap();
        let er_room = Record::from_room(
            RecordId::new(2),
            RoomData {
                department: Some("ER".into()),
                ..Default::default()
            },
        );

        assert!(!report.admits(&template()));
        assert!(report.admits(&er_room));
    }

    #[test]
    fn test_null_and_empty_category_names() {
        let b = builder();
        assert_eq!(b.report_name(&Category::new("")), "Dept - ");
        assert_eq!(b.report_name(&Category::null()), "Dept - ");

        let report = b.build(&Category::null(), &template()).unwrap();
        assert_eq!(report.filters[0].value, "");
    }

    #[test]
    fn test_missing_level_fails() {
        let mut template = Record::from_room(RecordId::new(5), RoomData::default());
        template.attributes.retain(|a| a.name != "Level");

        match builder().build(&Category::new("ICU"), &template) {
            Err(ScheduleError::MissingAttribute { role, .. }) => {
                assert_eq!(role, AttributeRole::Level);
            }
            other => panic!("Expected MissingAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_fields_built_fresh_per_report() {
        let b = builder();
        let columns = b.resolve(&template()).unwrap();
        let icu = b.build_resolved(&Category::new("ICU"), &columns).unwrap();
        let er = b.build_resolved(&Category::new("ER"), &columns).unwrap();

        assert_eq!(icu.fields, er.fields);
        assert_ne!(icu.filters, er.filters);
        assert_ne!(icu.name, er.name);
    }
}
