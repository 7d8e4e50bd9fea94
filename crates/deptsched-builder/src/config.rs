//! Configuration for schedule generation
//!
//! Naming rules, category handling and attribute bindings.

use crate::ScheduleError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the schedule generator
///
/// # Examples
///
/// ```
/// use deptsched_builder::ScheduleConfig;
///
/// let config = ScheduleConfig::default();
/// assert_eq!(config.report_prefix, "Dept - ");
/// assert!(!config.exclude_null_categories);
///
/// let config = ScheduleConfig::strict();
/// assert!(config.reject_existing_names);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Prefix of every per-department report name
    #[serde(default = "default_report_prefix")]
    pub report_prefix: String,

    /// Name of the cross-department summary report
    #[serde(default = "default_aggregate_name")]
    pub aggregate_name: String,

    /// Label of the atomic scope in the host's undo history
    #[serde(default = "default_transaction_label")]
    pub transaction_label: String,

    /// Drop records without a department value instead of scheduling them
    /// under an empty-named report
    #[serde(default)]
    pub exclude_null_categories: bool,

    /// Treat report names differing only in case as duplicates even when the
    /// document itself compares names case-sensitively
    #[serde(default)]
    pub case_insensitive_names: bool,

    /// Fail when a report name already exists in the document
    /// Default: false (re-runs create another set of reports)
    #[serde(default)]
    pub reject_existing_names: bool,

    /// Attribute display-name bindings
    #[serde(default)]
    pub attributes: AttributeBindings,
}

/// Display names used where the host has no well-known key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeBindings {
    /// Display name of the level attribute
    #[serde(default = "default_level_name")]
    pub level_name: String,

    /// Display name tried when the well-known department key is absent
    #[serde(default = "default_department_name")]
    pub department_fallback_name: String,
}

fn default_report_prefix() -> String {
    "Dept - ".to_string()
}

fn default_aggregate_name() -> String {
    "All Departments".to_string()
}

fn default_transaction_label() -> String {
    "Create Schedules".to_string()
}

fn default_level_name() -> String {
    "Level".to_string()
}

fn default_department_name() -> String {
    "Department".to_string()
}

impl Default for AttributeBindings {
    fn default() -> Self {
        Self {
            level_name: default_level_name(),
            department_fallback_name: default_department_name(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            report_prefix: default_report_prefix(),
            aggregate_name: default_aggregate_name(),
            transaction_label: default_transaction_label(),
            exclude_null_categories: false,
            case_insensitive_names: false,
            reject_existing_names: false,
            attributes: AttributeBindings::default(),
        }
    }
}

impl ScheduleConfig {
    /// Strict preset: skip rooms without a department and refuse to create a
    /// report whose name already exists
    pub fn strict() -> Self {
        Self {
            exclude_null_categories: true,
            reject_existing_names: true,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ScheduleError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: ScheduleConfig = toml::from_str(&contents)
            .map_err(|e| ScheduleError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.report_prefix.trim().is_empty() {
            return Err(ScheduleError::Config("report_prefix must not be empty".to_string()));
        }
        if self.aggregate_name.trim().is_empty() {
            return Err(ScheduleError::Config("aggregate_name must not be empty".to_string()));
        }
        if self.transaction_label.is_empty() {
            return Err(ScheduleError::Config("transaction_label must not be empty".to_string()));
        }
        if self.attributes.level_name.is_empty() {
            return Err(ScheduleError::Config("attributes.level_name must not be empty".to_string()));
        }
        if self.attributes.department_fallback_name.is_empty() {
            return Err(ScheduleError::Config(
                "attributes.department_fallback_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
