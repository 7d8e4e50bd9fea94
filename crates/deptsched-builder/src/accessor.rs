//! Attribute lookup on records
//!
//! Well-known keys match on the attribute's built-in tag; display names fall
//! back to scanning the record's attribute list. An absent attribute is a
//! normal `None`, not an error.

use deptsched_domain::{Attribute, AttributeKey, AttributeValue, BuiltInAttribute, Record};
use tracing::trace;

/// Look up an attribute by key
pub fn get<'r>(record: &'r Record, key: &AttributeKey) -> Option<&'r Attribute> {
    match key {
        AttributeKey::BuiltIn(builtin) => get_builtin(record, *builtin),
        AttributeKey::Named(name) => get_named(record, name),
    }
}

/// Look up an attribute by its well-known key
pub fn get_builtin(record: &Record, builtin: BuiltInAttribute) -> Option<&Attribute> {
    record.attributes.iter().find(|a| a.builtin == Some(builtin))
}

/// Look up an attribute by display name; the first match wins
pub fn get_named<'r>(record: &'r Record, name: &str) -> Option<&'r Attribute> {
    let found = record.attributes.iter().find(|a| a.name == name);
    trace!(record = %record.id, name, found = found.is_some(), "attribute name scan");
    found
}

/// Try each key in order and return the first attribute found
pub fn get_first<'r>(record: &'r Record, keys: &[AttributeKey]) -> Option<&'r Attribute> {
    keys.iter().find_map(|key| get(record, key))
}

/// Value of an attribute, if present
pub fn value<'r>(record: &'r Record, key: &AttributeKey) -> Option<&'r AttributeValue> {
    get(record, key).map(|a| &a.value)
}

/// Text value of an attribute; `None` if absent or not text
pub fn text(record: &Record, key: &AttributeKey) -> Option<String> {
    value(record, key)?.as_text().map(str::to_string)
}
