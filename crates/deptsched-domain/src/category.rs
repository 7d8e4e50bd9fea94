//! Category module - department values that partition records

use std::fmt;

/// A distinct department value
///
/// `None` models a record whose department holds no value. Ordering is ordinal:
/// the null category sorts first, then values compare byte-wise on their UTF-8
/// encoding (case-sensitive, locale-independent).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(Option<String>);

impl Category {
    /// Create a category from a department value
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// The category of records without a department value
    pub fn null() -> Self {
        Self(None)
    }

    /// Whether this is the null category
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Category text; the null category renders as empty text
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    /// Underlying optional value
    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<Option<String>> for Category {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "<none>"),
        }
    }
}
