//! Results of planning and running schedule generation

use deptsched_domain::{Category, ReportId};

/// Reports a run would create, computed without touching the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePlan {
    /// Departments in report order
    pub categories: Vec<Category>,

    /// Per-department report names, parallel to `categories`
    pub report_names: Vec<String>,

    /// Name of the summary report
    pub aggregate_name: String,
}

impl SchedulePlan {
    /// Number of reports the plan creates, summary included
    pub fn report_count(&self) -> usize {
        self.categories.len() + 1
    }

    /// Every report name in creation order
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.report_names
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.aggregate_name.as_str()))
    }
}

/// A report persisted by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedReport {
    /// Identifier assigned by the document
    pub id: ReportId,

    /// Report name
    pub name: String,

    /// Department, `None` for the summary report
    pub category: Option<Category>,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Reports created, summary included
    pub created_count: usize,

    /// Departments scheduled, in order
    pub categories: Vec<Category>,

    /// Created reports in creation order
    pub reports: Vec<CreatedReport>,
}

impl RunSummary {
    /// Number of per-department reports
    pub fn department_count(&self) -> usize {
        self.categories.len()
    }

    /// One-line notice for the user
    pub fn message(&self) -> String {
        format!(
            "{} individual schedules created, and extra one.",
            self.department_count()
        )
    }

    /// Generate a multi-line summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Schedule Generation Summary".to_string(),
            "===========================".to_string(),
            format!("Departments: {}", self.department_count()),
            format!("Reports created: {}", self.created_count),
            String::new(),
        ];

        for report in &self.reports {
            match &report.category {
                Some(category) => lines.push(format!("  {} [{}]", report.name, category)),
                None => lines.push(format!("  {} [summary]", report.name)),
            }
        }

        lines.join("\n")
    }
}
