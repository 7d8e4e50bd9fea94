//! Record module - read-only entities supplied by the host document

use crate::attribute::{Attribute, AttributeHandle, AttributeValue, BuiltInAttribute};
use std::fmt;

/// Display name of the room level attribute
///
/// The level has no well-known key; hosts expose it only by name.
pub const LEVEL_ATTRIBUTE_NAME: &str = "Level";

/// Handle under which the reference host registers the level attribute
pub const LEVEL_HANDLE: AttributeHandle = AttributeHandle::new(-1_007_200);

/// Host identifier of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(i64);

impl RecordId {
    /// Create an id from the host's raw value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of entity a record (and a report) is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Spatial rooms
    Room,
}

impl EntityKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Room => "room",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "room" | "rooms" => Some(EntityKind::Room),
            _ => None,
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid entity kind: {}", s))
    }
}

/// A record owned by the host document
///
/// Records are read-only inputs: nothing in this workspace mutates a record
/// after the host hands it out.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Host identifier
    pub id: RecordId,

    /// Entity kind
    pub kind: EntityKind,

    /// Whether this is a type-level entity rather than a placed instance
    pub is_type: bool,

    /// Attributes in host order
    pub attributes: Vec<Attribute>,
}

impl Record {
    /// Create an instance record with no attributes
    pub fn new(id: RecordId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            is_type: false,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Mark the record as a type-level entity
    pub fn as_type(mut self) -> Self {
        self.is_type = true;
        self
    }

    /// Build a room record carrying the standard room attributes
    ///
    /// # Examples
    ///
    /// ```
    /// use deptsched_domain::{Record, RecordId, RoomData};
    ///
    /// let room = Record::from_room(RecordId::new(1), RoomData {
    ///     number: "101".into(),
    ///     name: "Triage".into(),
    ///     department: Some("ER".into()),
    ///     comments: None,
    ///     level: Some("Level 1".into()),
    ///     area: 24.0,
    /// });
    /// assert_eq!(room.attributes.len(), 6);
    /// ```
    pub fn from_room(id: RecordId, room: RoomData) -> Self {
        let text = |value: Option<String>| value.map_or(AttributeValue::Empty, AttributeValue::Text);

        Record::new(id, EntityKind::Room)
            .with_attribute(Attribute::builtin(
                BuiltInAttribute::RoomNumber,
                AttributeValue::Text(room.number),
            ))
            .with_attribute(Attribute::builtin(
                BuiltInAttribute::RoomName,
                AttributeValue::Text(room.name),
            ))
            .with_attribute(Attribute::builtin(
                BuiltInAttribute::RoomDepartment,
                text(room.department),
            ))
            .with_attribute(Attribute::builtin(
                BuiltInAttribute::Comments,
                text(room.comments),
            ))
            .with_attribute(Attribute::named(
                LEVEL_HANDLE,
                LEVEL_ATTRIBUTE_NAME,
                room.level.map_or(AttributeValue::Empty, AttributeValue::Reference),
            ))
            .with_attribute(Attribute::builtin(
                BuiltInAttribute::RoomArea,
                AttributeValue::Number(room.area),
            ))
    }
}

/// Plain room data used to build a room [`Record`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomData {
    /// Room number
    pub number: String,

    /// Room name
    pub name: String,

    /// Department; `None` when the host holds no value
    pub department: Option<String>,

    /// Instance comments
    pub comments: Option<String>,

    /// Name of the level the room sits on
    pub level: Option<String>,

    /// Area in square metres
    pub area: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_room_attribute_order() {
        let room = Record::from_room(
            RecordId::new(7),
            RoomData {
                number: "101".into(),
                name: "Lobby".into(),
                department: None,
                comments: Some("north wing".into()),
                level: Some("Level 1".into()),
                area: 40.0,
            },
        );

        let names: Vec<&str> = room.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Number", "Name", "Department", "Comments", "Level", "Area"]);
        assert_eq!(room.attributes[2].value, AttributeValue::Empty);
        assert_eq!(room.attributes[4].builtin, None);
        assert!(!room.is_type);
    }

    #[test]
    fn test_entity_kind_parse() {
        assert_eq!(EntityKind::parse("Rooms"), Some(EntityKind::Room));
        assert_eq!("room".parse::<EntityKind>(), Ok(EntityKind::Room));
        assert!("wall".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::new(42).to_string(), "#42");
    }
}
