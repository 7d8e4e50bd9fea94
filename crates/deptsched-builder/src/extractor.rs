//! Department extraction

use crate::accessor;
use crate::registry::{AttributeRegistry, AttributeRole};
use deptsched_domain::{AttributeKey, Record};

/// Derives the category key (department) of a record
///
/// Tries the well-known department key first, then the department display
/// name. Returns `None` when neither is present or the value is not text.
#[derive(Debug, Clone)]
pub struct CategoryExtractor {
    keys: Vec<AttributeKey>,
}

impl CategoryExtractor {
    /// Create an extractor using the department keys of a registry
    pub fn new(registry: &AttributeRegistry) -> Self {
        Self {
            keys: registry.keys(AttributeRole::Department).to_vec(),
        }
    }

    /// Department of a record
    pub fn extract(&self, record: &Record) -> Option<String> {
        accessor::get_first(record, &self.keys)?
            .value
            .as_text()
            .map(str::to_string)
    }
}

impl Default for CategoryExtractor {
    fn default() -> Self {
        Self::new(&AttributeRegistry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptsched_domain::{
        Attribute, AttributeHandle, AttributeValue, EntityKind, RecordId, RoomData,
    };

    #[test]
    fn test_extract_builtin_department() {
        let room = Record::from_room(
            RecordId::new(1),
            RoomData {
                department: Some("ICU".into()),
                ..Default::default()
            },
        );
        assert_eq!(CategoryExtractor::default().extract(&room), Some("ICU".to_string()));
    }

    #[test]
    fn test_extract_empty_and_null() {
        let extractor = CategoryExtractor::default();
        let empty = Record::from_room(
            RecordId::new(1),
            RoomData {
                department: Some(String::new()),
                ..Default::default()
            },
        );
        let null = Record::from_room(RecordId::new(2), RoomData::default());

        assert_eq!(extractor.extract(&empty), Some(String::new()));
        assert_eq!(extractor.extract(&null), None);
    }

    #[test]
    fn test_extract_by_display_name() {
        let record = Record::new(RecordId::new(3), EntityKind::Room).with_attribute(
            Attribute::named(AttributeHandle::new(1), "Department", AttributeValue::Text("ER".into())),
        );
        assert_eq!(CategoryExtractor::default().extract(&record), Some("ER".to_string()));
    }

    #[test]
    fn test_extract_missing_attribute() {
        let record = Record::new(RecordId::new(4), EntityKind::Room);
        assert_eq!(CategoryExtractor::default().extract(&record), None);
    }
}
