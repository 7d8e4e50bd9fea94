//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use deptsched_builder::{RunSummary, SchedulePlan};
use deptsched_domain::{Category, ReportDefinition, ReportId};
use deptsched_store::StoredReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of a generation run.
    pub fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let reports: Vec<serde_json::Value> = summary
                    .reports
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "id": r.id.to_string(),
                            "name": r.name,
                            "department": r.category.as_ref().and_then(Category::value),
                            "summary": r.category.is_none(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "created": summary.created_count,
                    "departments": summary.department_count(),
                    "reports": reports,
                }))?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["ID", "Schedule", "Department"]);
                for report in &summary.reports {
                    let department = match &report.category {
                        Some(category) => category.to_string(),
                        None => "(all)".to_string(),
                    };
                    builder.push_record([short_id(report.id), report.name.clone(), department]);
                }
                let mut lines = vec![self.table(builder), self.success(&summary.message())];
                if summary.department_count() == 0 {
                    lines.push(self.warning("No rooms carry a department; only the summary schedule was created"));
                }
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(summary
                .reports
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a dry-run plan.
    pub fn format_plan(&self, plan: &SchedulePlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let departments: Vec<serde_json::Value> = plan
                    .categories
                    .iter()
                    .zip(&plan.report_names)
                    .map(|(category, name)| {
                        serde_json::json!({
                            "department": category.value(),
                            "schedule": name,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "departments": departments,
                    "summary": plan.aggregate_name,
                    "total": plan.report_count(),
                }))?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Department", "Schedule"]);
                for (category, name) in plan.categories.iter().zip(&plan.report_names) {
                    builder.push_record([category.to_string(), name.clone()]);
                }
                builder.push_record(["(all)".to_string(), plan.aggregate_name.clone()]);
                Ok(format!(
                    "{}\n{}",
                    self.table(builder),
                    self.info(&format!("{} schedule(s) would be created", plan.report_count()))
                ))
            }
            OutputFormat::Quiet => Ok(plan.all_names().collect::<Vec<_>>().join("\n")),
        }
    }

    /// Format a list of persisted reports.
    pub fn format_reports(&self, reports: &[StoredReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = reports.iter().map(report_json).collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if reports.is_empty() {
                    return Ok(self.colorize("No schedules found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Columns", "Filter", "Itemized", "Created By"]);
                for report in reports {
                    let definition = &report.definition;
                    builder.push_record([
                        short_id(report.id),
                        definition.name.clone(),
                        definition.visible_fields().count().to_string(),
                        filter_text(definition),
                        yes_no(definition.itemized).to_string(),
                        report.label.clone(),
                    ]);
                }
                Ok(self.table(builder))
            }
            OutputFormat::Quiet => Ok(reports
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format one persisted report with its columns and grouping.
    pub fn format_report_detail(&self, report: &StoredReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report_json(report))?),
            OutputFormat::Quiet => Ok(report.id.to_string()),
            OutputFormat::Table => {
                let definition = &report.definition;

                let mut fields = Builder::default();
                fields.push_record(["#", "Heading", "Handle", "Kind", "Hidden", "Totals"]);
                for field in &definition.fields {
                    fields.push_record([
                        field.id.0.to_string(),
                        field.heading.clone(),
                        field.handle.to_string(),
                        field.kind.as_str().to_string(),
                        yes_no(field.hidden).to_string(),
                        yes_no(field.totals).to_string(),
                    ]);
                }

                let grouping: Vec<String> = definition
                    .sort_group
                    .iter()
                    .map(|entry| {
                        let heading = heading(definition, entry.field);
                        if entry.show_header {
                            format!("{} (sectioned)", heading)
                        } else {
                            heading
                        }
                    })
                    .collect();

                let lines = [
                    self.colorize(&definition.name, "cyan"),
                    format!("ID:         {}", report.id),
                    format!("Created by: {}", report.label),
                    format!("Filter:     {}", filter_text(definition)),
                    format!("Grouping:   {}", grouping.join(" > ")),
                    format!("Itemized:   {}", yes_no(definition.itemized)),
                    format!("Totals:     {}", yes_no(definition.show_grand_total)),
                    self.table(fields),
                ];
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format import result.
    pub fn import_result(&self, count: usize, replaced: usize) -> String {
        if replaced > 0 {
            self.success(&format!("Imported {} room(s), replacing {}", count, replaced))
        } else {
            self.success(&format!("Imported {} room(s)", count))
        }
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn short_id(id: ReportId) -> String {
    id.to_string().chars().take(8).collect()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn heading(definition: &ReportDefinition, field: deptsched_domain::FieldId) -> String {
    definition
        .field(field)
        .map(|f| f.heading.clone())
        .unwrap_or_else(|| format!("#{}", field.0))
}

fn filter_text(definition: &ReportDefinition) -> String {
    if definition.filters.is_empty() {
        return "-".to_string();
    }
    definition
        .filters
        .iter()
        .map(|filter| {
            format!(
                "{} {} \"{}\"",
                heading(definition, filter.field),
                filter.op.as_str(),
                filter.value
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn report_json(report: &StoredReport) -> serde_json::Value {
    let definition = &report.definition;
    serde_json::json!({
        "id": report.id.to_string(),
        "name": definition.name,
        "created_by": report.label,
        "created_at": report.created_at,
        "entity_kind": definition.entity_kind.as_str(),
        "fields": definition.fields.iter().map(|f| serde_json::json!({
            "heading": f.heading,
            "handle": f.handle.value(),
            "kind": f.kind.as_str(),
            "hidden": f.hidden,
            "totals": f.totals,
        })).collect::<Vec<_>>(),
        "filters": definition.filters.iter().map(|f| serde_json::json!({
            "field": f.field.0,
            "op": f.op.as_str(),
            "value": f.value,
        })).collect::<Vec<_>>(),
        "sort_group": definition.sort_group.iter().map(|s| serde_json::json!({
            "field": s.field.0,
            "header": s.show_header,
            "footer": s.show_footer,
            "blank_line": s.show_blank_line,
        })).collect::<Vec<_>>(),
        "itemized": definition.itemized,
        "grand_total": definition.show_grand_total,
        "grand_total_title": definition.show_grand_total_title,
        "grand_total_count": definition.show_grand_total_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptsched_builder::CreatedReport;
    use deptsched_domain::{EntityKind, Field, FieldId, FieldKind, Filter, SortGroupEntry, LEVEL_HANDLE};

    fn run_summary() -> RunSummary {
        RunSummary {
            created_count: 2,
            categories: vec![Category::new("ICU")],
            reports: vec![
                CreatedReport {
                    id: ReportId::new(),
                    name: "Dept - ICU".to_string(),
                    category: Some(Category::new("ICU")),
                },
                CreatedReport {
                    id: ReportId::new(),
                    name: "All Departments".to_string(),
                    category: None,
                },
            ],
        }
    }

    fn stored() -> StoredReport {
        StoredReport {
            id: ReportId::new(),
            label: "Create Schedules".to_string(),
            created_at: 1_700_000_000,
            definition: ReportDefinition {
                name: "Dept - ICU".to_string(),
                entity_kind: EntityKind::Room,
                fields: vec![Field {
                    id: FieldId(0),
                    handle: LEVEL_HANDLE,
                    heading: "Level".to_string(),
                    kind: FieldKind::PerInstance,
                    hidden: false,
                    totals: false,
                }],
                filters: vec![Filter::equal(FieldId(0), "Level 2")],
                sort_group: vec![SortGroupEntry::sectioned(FieldId(0))],
                itemized: true,
                show_grand_total: true,
                show_grand_total_title: true,
                show_grand_total_count: true,
            },
        }
    }

    #[test]
    fn test_summary_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_summary(&run_summary()).unwrap();
        assert!(output.contains("Dept - ICU"));
        assert!(output.contains("(all)"));
        assert!(output.contains("✓ 1 individual schedules created, and extra one."));
    }

    #[test]
    fn test_summary_without_departments_warns() {
        let summary = RunSummary {
            created_count: 1,
            categories: Vec::new(),
            reports: vec![CreatedReport {
                id: ReportId::new(),
                name: "All Departments".to_string(),
                category: None,
            }],
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_summary(&summary).unwrap();
        assert!(output.contains("⚠ No rooms carry a department"));

        let output = formatter.format_summary(&run_summary()).unwrap();
        assert!(!output.contains("⚠"));
    }

    #[test]
    fn test_summary_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_summary(&run_summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["created"], 2);
        assert_eq!(value["reports"][0]["department"], "ICU");
        assert_eq!(value["reports"][1]["summary"], true);
    }

    #[test]
    fn test_summary_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_summary(&run_summary()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(!output.contains("Dept"));
    }

    #[test]
    fn test_plan_table() {
        let plan = SchedulePlan {
            categories: vec![Category::null(), Category::new("ER")],
            report_names: vec!["Dept - ".to_string(), "Dept - ER".to_string()],
            aggregate_name: "All Departments".to_string(),
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_plan(&plan).unwrap();
        assert!(output.contains("<none>"));
        assert!(output.contains("3 schedule(s) would be created"));

        let quiet = Formatter::new(OutputFormat::Quiet, false).format_plan(&plan).unwrap();
        assert_eq!(quiet, "Dept - \nDept - ER\nAll Departments");
    }

    #[test]
    fn test_reports_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reports(&[stored()]).unwrap();
        assert!(output.contains("Level equal \"Level 2\""));
        assert!(output.contains("Create Schedules"));
    }

    #[test]
    fn test_empty_reports() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reports(&[]).unwrap();
        assert!(output.contains("No schedules found"));
    }

    #[test]
    fn test_report_detail() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report_detail(&stored()).unwrap();
        assert!(output.contains("Level (sectioned)"));
        assert!(output.contains("per_instance"));

        let json = Formatter::new(OutputFormat::Json, false)
            .format_report_detail(&stored())
            .unwrap();
        assert!(json.contains("\"grand_total_count\": true"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("failed"), "✗ failed");
    }
}
