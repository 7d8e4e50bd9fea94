//! Report module - tabular schedule definitions handed to the host

use crate::attribute::AttributeHandle;
use crate::record::{EntityKind, Record};
use std::fmt;

/// Unique identifier of a persisted report, based on UUIDv7
///
/// Assigned by the host document when a definition is persisted; UUIDv7 keeps
/// identifiers sortable by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportId(u128);

impl ReportId {
    /// Generate a new UUIDv7-based ReportId
    ///
    /// # Examples
    ///
    /// ```
    /// use deptsched_domain::ReportId;
    ///
    /// let id = ReportId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ReportId from a raw u128 value (storage deserialization)
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ReportId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid report id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Position of a field within its report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(pub usize);

/// How a field's values are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// One value per record
    PerInstance,

    /// Value aggregated by the view (areas, counts)
    AggregatedPerView,
}

impl FieldKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::PerInstance => "per_instance",
            FieldKind::AggregatedPerView => "aggregated_per_view",
        }
    }

    /// Parse a kind from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "per_instance" => Some(FieldKind::PerInstance),
            "aggregated_per_view" => Some(FieldKind::AggregatedPerView),
            _ => None,
        }
    }
}

/// One column of a report
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Position within the report
    pub id: FieldId,

    /// Attribute projected into this column
    pub handle: AttributeHandle,

    /// Column heading
    pub heading: String,

    /// How values are produced
    pub kind: FieldKind,

    /// Hidden columns still take part in filtering and grouping
    pub hidden: bool,

    /// Show totals for this column
    pub totals: bool,
}

/// Comparison used by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Exact, case-sensitive string equality
    Equal,
}

impl FilterOp {
    /// Get the operator as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Equal => "equal",
        }
    }

    /// Parse an operator from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "equal" => Some(FilterOp::Equal),
            _ => None,
        }
    }
}

/// Predicate restricting which records populate a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field the predicate reads
    pub field: FieldId,

    /// Comparison
    pub op: FilterOp,

    /// Value compared against
    pub value: String,
}

impl Filter {
    /// Equality filter on a field
    pub fn equal(field: FieldId, value: impl Into<String>) -> Self {
        Self {
            field,
            op: FilterOp::Equal,
            value: value.into(),
        }
    }

    /// Evaluate against a rendered field value (`None` renders as empty text)
    pub fn matches(&self, actual: Option<&str>) -> bool {
        match self.op {
            FilterOp::Equal => actual.unwrap_or("") == self.value,
        }
    }
}

/// One level of a report's grouping hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortGroupEntry {
    /// Field sorted and grouped on
    pub field: FieldId,

    /// Show a header row per group
    pub show_header: bool,

    /// Show a footer row per group
    pub show_footer: bool,

    /// Leave a blank line after each group
    pub show_blank_line: bool,
}

impl SortGroupEntry {
    /// Plain sort entry with every display flag off
    pub fn new(field: FieldId) -> Self {
        Self {
            field,
            show_header: false,
            show_footer: false,
            show_blank_line: false,
        }
    }

    /// Sectioned entry with header, footer and blank line all on
    pub fn sectioned(field: FieldId) -> Self {
        Self {
            field,
            show_header: true,
            show_footer: true,
            show_blank_line: true,
        }
    }
}

/// A complete schedule definition
///
/// Built once and never mutated; ownership passes to the host scope that
/// persists it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDefinition {
    /// Report name, unique within the document
    pub name: String,

    /// Entity kind the report lists
    pub entity_kind: EntityKind,

    /// Ordered columns
    pub fields: Vec<Field>,

    /// Record filters, all of which must match
    pub filters: Vec<Filter>,

    /// Grouping hierarchy, outermost first
    pub sort_group: Vec<SortGroupEntry>,

    /// List every record instead of one row per group
    pub itemized: bool,

    /// Show the grand total row
    pub show_grand_total: bool,

    /// Show the grand total title
    pub show_grand_total_title: bool,

    /// Show the grand total record count
    pub show_grand_total_count: bool,
}

impl ReportDefinition {
    /// Look up a field by id
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Columns that are not hidden
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.hidden)
    }

    /// Whether a record would appear in this report
    ///
    /// A record must be of the report's entity kind and satisfy every filter.
    /// A filter whose field the record lacks does not match.
    pub fn admits(&self, record: &Record) -> bool {
        if record.kind != self.entity_kind {
            return false;
        }

        self.filters.iter().all(|filter| {
            let Some(field) = self.field(filter.field) else {
                return false;
            };
            match record.attributes.iter().find(|a| a.handle == field.handle) {
                Some(attribute) => filter.matches(attribute.value.display_text().as_deref()),
                None => false,
            }
        })
    }
}
