//! Attribute module - named, typed values attached to records

use std::fmt;

/// Host-side identifier of an attribute definition
///
/// Handles are attribute-level, not instance-level: every record of the same
/// kind exposes the same handle for the same attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeHandle(i64);

impl AttributeHandle {
    /// Create a handle from the host's raw value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AttributeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-known room attributes the host can look up without a display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInAttribute {
    /// Room number
    RoomNumber,

    /// Room name
    RoomName,

    /// Department the room belongs to
    RoomDepartment,

    /// Free-text instance comments
    Comments,

    /// Computed room area
    RoomArea,
}

impl BuiltInAttribute {
    /// All well-known attributes, in column order
    pub const ALL: [BuiltInAttribute; 5] = [
        BuiltInAttribute::RoomNumber,
        BuiltInAttribute::RoomName,
        BuiltInAttribute::RoomDepartment,
        BuiltInAttribute::Comments,
        BuiltInAttribute::RoomArea,
    ];

    /// Get the attribute key as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltInAttribute::RoomNumber => "room_number",
            BuiltInAttribute::RoomName => "room_name",
            BuiltInAttribute::RoomDepartment => "room_department",
            BuiltInAttribute::Comments => "comments",
            BuiltInAttribute::RoomArea => "room_area",
        }
    }

    /// Parse a well-known key from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "room_number" => Some(BuiltInAttribute::RoomNumber),
            "room_name" => Some(BuiltInAttribute::RoomName),
            "room_department" => Some(BuiltInAttribute::RoomDepartment),
            "comments" => Some(BuiltInAttribute::Comments),
            "room_area" => Some(BuiltInAttribute::RoomArea),
            _ => None,
        }
    }

    /// Default display name shown to users
    pub fn display_name(&self) -> &'static str {
        match self {
            BuiltInAttribute::RoomNumber => "Number",
            BuiltInAttribute::RoomName => "Name",
            BuiltInAttribute::RoomDepartment => "Department",
            BuiltInAttribute::Comments => "Comments",
            BuiltInAttribute::RoomArea => "Area",
        }
    }

    /// Handle under which the reference host registers this attribute
    pub fn default_handle(&self) -> AttributeHandle {
        match self {
            BuiltInAttribute::RoomNumber => AttributeHandle::new(-1_006_900),
            BuiltInAttribute::RoomName => AttributeHandle::new(-1_006_901),
            BuiltInAttribute::RoomDepartment => AttributeHandle::new(-1_006_902),
            BuiltInAttribute::Comments => AttributeHandle::new(-1_010_106),
            BuiltInAttribute::RoomArea => AttributeHandle::new(-1_012_805),
        }
    }
}

/// How an attribute is addressed on a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Well-known key (fast path)
    BuiltIn(BuiltInAttribute),

    /// Display name (scanned across the record's attributes)
    Named(String),
}

impl AttributeKey {
    /// Shorthand for a display-name key
    pub fn named(name: impl Into<String>) -> Self {
        AttributeKey::Named(name.into())
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKey::BuiltIn(b) => write!(f, "{}", b.as_str()),
            AttributeKey::Named(name) => write!(f, "\"{}\"", name),
        }
    }
}

/// Value stored in an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Text value
    Text(String),

    /// Numeric value (areas are in square metres)
    Number(f64),

    /// Reference to another element, carried by its display name
    Reference(String),

    /// The attribute exists but holds no value
    Empty,
}

impl AttributeValue {
    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Human-readable rendering used for display and filter comparison
    pub fn display_text(&self) -> Option<String> {
        match self {
            AttributeValue::Text(s) | AttributeValue::Reference(s) => Some(s.clone()),
            AttributeValue::Number(n) => Some(n.to_string()),
            AttributeValue::Empty => None,
        }
    }
}

/// One attribute on one record
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Host handle of the attribute definition
    pub handle: AttributeHandle,

    /// Well-known key, if the host exposes one for this attribute
    pub builtin: Option<BuiltInAttribute>,

    /// Display name
    pub name: String,

    /// Current value
    pub value: AttributeValue,
}

impl Attribute {
    /// Create a well-known attribute with its default handle and display name
    pub fn builtin(key: BuiltInAttribute, value: AttributeValue) -> Self {
        Self {
            handle: key.default_handle(),
            builtin: Some(key),
            name: key.display_name().to_string(),
            value,
        }
    }

    /// Create an attribute addressable only by display name
    pub fn named(handle: AttributeHandle, name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            handle,
            builtin: None,
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_key_roundtrip() {
        for key in BuiltInAttribute::ALL {
            assert_eq!(BuiltInAttribute::parse(key.as_str()), Some(key));
        }
        assert_eq!(BuiltInAttribute::parse("level"), None);
    }

    #[test]
    fn test_default_handles_are_distinct() {
        let mut handles: Vec<_> = BuiltInAttribute::ALL.iter().map(|b| b.default_handle()).collect();
        handles.sort();
        handles.dedup();
        assert_eq!(handles.len(), BuiltInAttribute::ALL.len());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(AttributeValue::Text("ICU".into()).as_text(), Some("ICU"));
        assert_eq!(AttributeValue::Reference("Level 1".into()).as_text(), None);
        assert_eq!(
            AttributeValue::Reference("Level 1".into()).display_text(),
            Some("Level 1".to_string())
        );
        assert_eq!(AttributeValue::Number(12.5).as_number(), Some(12.5));
        assert_eq!(AttributeValue::Empty.display_text(), None);
    }
}
