//! Schedule generation run: categories, per-department reports, summary, commit

use crate::aggregate::AggregateReportBuilder;
use crate::category_set::CategorySet;
use crate::extractor::CategoryExtractor;
use crate::naming;
use crate::registry::AttributeRegistry;
use crate::report_builder::ReportBuilder;
use crate::summary::{CreatedReport, RunSummary, SchedulePlan};
use crate::{ScheduleConfig, ScheduleError};
use deptsched_domain::traits::{RecordSource, ReportDocument, ReportScope};
use deptsched_domain::{EntityKind, Record};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Generates one schedule per department plus a summary schedule
///
/// A run is all-or-nothing: every report is created inside one document scope
/// that is committed only if every report was built and accepted.
///
/// # Examples
///
/// ```
/// use deptsched_builder::ScheduleGenerator;
/// use deptsched_domain::{Record, RecordId, RoomData};
///
/// let rooms: Vec<Record> = ["ICU", "ER", "ICU"]
///     .iter()
///     .enumerate()
///     .map(|(i, dept)| {
///         Record::from_room(RecordId::new(i as i64), RoomData {
///             department: Some(dept.to_string()),
///             ..Default::default()
///         })
///     })
///     .collect();
///
/// let plan = ScheduleGenerator::default_config().plan(&rooms).unwrap();
/// assert_eq!(plan.report_names, ["Dept - ER", "Dept - ICU"]);
/// assert_eq!(plan.report_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    config: ScheduleConfig,
    extractor: CategoryExtractor,
    report_builder: ReportBuilder,
    aggregate_builder: AggregateReportBuilder,
}

impl ScheduleGenerator {
    /// Create a generator with the given configuration
    pub fn new(config: ScheduleConfig) -> Result<Self, ScheduleError> {
        let registry = AttributeRegistry::new(&config.attributes);
        Self::with_registry(config, registry)
    }

    /// Create a generator with a custom attribute registry
    pub fn with_registry(
        config: ScheduleConfig,
        registry: AttributeRegistry,
    ) -> Result<Self, ScheduleError> {
        config.validate()?;
        Ok(Self::assemble(config, registry))
    }

    /// Create a generator with default configuration
    pub fn default_config() -> Self {
        // Defaults always validate; see config tests.
        Self::assemble(ScheduleConfig::default(), AttributeRegistry::default())
    }

    fn assemble(config: ScheduleConfig, registry: AttributeRegistry) -> Self {
        Self {
            extractor: CategoryExtractor::new(&registry),
            report_builder: ReportBuilder::new(registry.clone(), config.report_prefix.clone()),
            aggregate_builder: AggregateReportBuilder::new(registry, config.aggregate_name.clone()),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Distinct departments across records
    pub fn categories(&self, records: &[Record]) -> CategorySet {
        CategorySet::build(records, &self.extractor, self.config.exclude_null_categories)
    }

    /// Compute the reports a run would create without touching any document
    ///
    /// # Errors
    ///
    /// [`ScheduleError::EmptySource`] for no records,
    /// [`ScheduleError::DuplicateReportName`] when two planned names collide.
    ///
    /// Names are compared under the configured naming rule only; [`run`]
    /// also applies the document's own rule.
    ///
    /// [`run`]: ScheduleGenerator::run
    pub fn plan(&self, records: &[Record]) -> Result<SchedulePlan, ScheduleError> {
        self.plan_with(records, self.config.case_insensitive_names)
    }

    fn plan_with(
        &self,
        records: &[Record],
        case_insensitive: bool,
    ) -> Result<SchedulePlan, ScheduleError> {
        if records.is_empty() {
            return Err(ScheduleError::EmptySource);
        }

        let categories = self.categories(records).into_vec();
        let report_names: Vec<String> = categories
            .iter()
            .map(|category| self.report_builder.report_name(category))
            .collect();
        let aggregate_name = self.aggregate_builder.report_name().to_string();

        let origins = categories
            .iter()
            .zip(&report_names)
            .map(|(category, name)| (name.as_str(), format!("department '{}'", category)))
            .chain(std::iter::once((
                aggregate_name.as_str(),
                "the summary report".to_string(),
            )));
        naming::ensure_unique(origins, case_insensitive)?;

        Ok(SchedulePlan {
            categories,
            report_names,
            aggregate_name,
        })
    }

    /// Generate schedules for the given records inside one document scope
    ///
    /// Per-department reports take their attribute handles from the first
    /// record; the summary report takes them from the last.
    pub fn run<D>(&self, records: &[Record], document: &mut D) -> Result<RunSummary, ScheduleError>
    where
        D: ReportDocument,
        D::Error: Display,
    {
        info!(records = records.len(), "Generating department schedules");

        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(ScheduleError::EmptySource);
        };
        let case_insensitive =
            self.config.case_insensitive_names || document.case_insensitive_names();
        let plan = self.plan_with(records, case_insensitive)?;

        if self.config.reject_existing_names {
            let existing = document
                .report_names()
                .map_err(|e| ScheduleError::Document(e.to_string()))?;
            naming::ensure_absent(plan.all_names(), &existing, case_insensitive)?;
        }

        let mut scope = document
            .begin(&self.config.transaction_label)
            .map_err(|e| ScheduleError::Document(e.to_string()))?;

        let reports = match self.populate(&mut scope, &plan, first, last) {
            Ok(reports) => reports,
            Err(e) => {
                warn!(error = %e, "Schedule generation failed, rolling back");
                if let Err(rollback) = scope.rollback() {
                    warn!(error = %rollback, "Rollback reported an error");
                }
                return Err(e);
            }
        };

        scope
            .commit()
            .map_err(|e| ScheduleError::Commit(e.to_string()))?;

        let summary = RunSummary {
            created_count: plan.report_count(),
            categories: plan.categories,
            reports,
        };
        info!(
            departments = summary.department_count(),
            created = summary.created_count,
            "Department schedules committed"
        );
        Ok(summary)
    }

    /// Pull room records from the host and generate schedules for them
    ///
    /// This is the parameterless entry point a host command calls.
    pub fn generate<H>(&self, host: &mut H) -> Result<RunSummary, ScheduleError>
    where
        H: RecordSource + ReportDocument,
        <H as RecordSource>::Error: Display,
        <H as ReportDocument>::Error: Display,
    {
        let mut records = host
            .records(EntityKind::Room)
            .map_err(|e| ScheduleError::Source(e.to_string()))?;
        records.retain(|record| !record.is_type && record.kind == EntityKind::Room);
        debug!(rooms = records.len(), "Collected room records");

        self.run(&records, host)
    }

    fn populate<S>(
        &self,
        scope: &mut S,
        plan: &SchedulePlan,
        first: &Record,
        last: &Record,
    ) -> Result<Vec<CreatedReport>, ScheduleError>
    where
        S: ReportScope,
        S::Error: Display,
    {
        let mut created = Vec::with_capacity(plan.report_count());

        if !plan.categories.is_empty() {
            let columns = self.report_builder.resolve(first)?;
            for category in &plan.categories {
                let definition = self.report_builder.build_resolved(category, &columns)?;
                let name = definition.name.clone();
                let id = scope
                    .create_report(definition)
                    .map_err(|e| ScheduleError::Document(e.to_string()))?;
                debug!(report = %name, %id, "Created department schedule");
                created.push(CreatedReport {
                    id,
                    name,
                    category: Some(category.clone()),
                });
            }
        }

        let aggregate = self.aggregate_builder.build(last)?;
        let name = aggregate.name.clone();
        let id = scope
            .create_report(aggregate)
            .map_err(|e| ScheduleError::Document(e.to_string()))?;
        debug!(report = %name, %id, "Created summary schedule");
        created.push(CreatedReport {
            id,
            name,
            category: None,
        });

        Ok(created)
    }
}
