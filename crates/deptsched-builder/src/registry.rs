//! Attribute role registry
//!
//! Maps the semantic roles a schedule needs (number, name, department, ...)
//! to the keys used to find them on a record, and resolves those keys to host
//! attribute handles against a template record.

use crate::accessor;
use crate::config::AttributeBindings;
use crate::ScheduleError;
use deptsched_domain::{AttributeHandle, AttributeKey, BuiltInAttribute, Record};
use std::collections::HashMap;
use std::fmt;

/// Semantic role of a schedule column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeRole {
    /// Room number
    Number,

    /// Room name
    Name,

    /// Department (the category key)
    Department,

    /// Instance comments
    Comments,

    /// Level the room sits on
    Level,

    /// Room area
    Area,
}

impl AttributeRole {
    /// All roles, in per-department column order
    pub const ALL: [AttributeRole; 6] = [
        AttributeRole::Number,
        AttributeRole::Name,
        AttributeRole::Department,
        AttributeRole::Comments,
        AttributeRole::Level,
        AttributeRole::Area,
    ];

    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeRole::Number => "number",
            AttributeRole::Name => "name",
            AttributeRole::Department => "department",
            AttributeRole::Comments => "comments",
            AttributeRole::Level => "level",
            AttributeRole::Area => "area",
        }
    }
}

impl fmt::Display for AttributeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry of lookup keys per role
///
/// Each role holds an ordered list of keys; resolution takes the first key
/// that finds an attribute.
#[derive(Debug, Clone)]
pub struct AttributeRegistry {
    bindings: HashMap<AttributeRole, Vec<AttributeKey>>,
}

impl AttributeRegistry {
    /// Create a registry with the standard room bindings
    pub fn new(names: &AttributeBindings) -> Self {
        let builtin = |b| vec![AttributeKey::BuiltIn(b)];
        let mut bindings = HashMap::new();
        bindings.insert(AttributeRole::Number, builtin(BuiltInAttribute::RoomNumber));
        bindings.insert(AttributeRole::Name, builtin(BuiltInAttribute::RoomName));
        bindings.insert(
            AttributeRole::Department,
            vec![
                AttributeKey::BuiltIn(BuiltInAttribute::RoomDepartment),
                AttributeKey::named(names.department_fallback_name.clone()),
            ],
        );
        bindings.insert(AttributeRole::Comments, builtin(BuiltInAttribute::Comments));
        bindings.insert(
            AttributeRole::Level,
            vec![AttributeKey::named(names.level_name.clone())],
        );
        bindings.insert(AttributeRole::Area, builtin(BuiltInAttribute::RoomArea));
        Self { bindings }
    }

    /// Replace the keys bound to a role
    pub fn bind(&mut self, role: AttributeRole, keys: Vec<AttributeKey>) {
        self.bindings.insert(role, keys);
    }

    /// Keys bound to a role, in lookup order
    pub fn keys(&self, role: AttributeRole) -> &[AttributeKey] {
        self.bindings.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve roles to attribute handles on a template record
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::MissingAttribute`] for the first role that
    /// cannot be found on the template.
    pub fn resolve(
        &self,
        template: &Record,
        roles: &[AttributeRole],
    ) -> Result<ResolvedAttributes, ScheduleError> {
        let mut resolved = HashMap::with_capacity(roles.len());

        for &role in roles {
            let attribute = accessor::get_first(template, self.keys(role)).ok_or(
                ScheduleError::MissingAttribute {
                    role,
                    record: template.id,
                },
            )?;
            resolved.insert(
                role,
                ResolvedAttribute {
                    handle: attribute.handle,
                    heading: attribute.name.clone(),
                },
            );
        }

        Ok(ResolvedAttributes { resolved })
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::new(&AttributeBindings::default())
    }
}

/// Handle and heading of one resolved role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    /// Host attribute handle
    pub handle: AttributeHandle,

    /// Column heading (the attribute's display name)
    pub heading: String,
}

/// Roles resolved against one template record
#[derive(Debug, Clone)]
pub struct ResolvedAttributes {
    resolved: HashMap<AttributeRole, ResolvedAttribute>,
}

impl ResolvedAttributes {
    /// Resolved attribute for a role, if it was requested
    pub fn get(&self, role: AttributeRole) -> Option<&ResolvedAttribute> {
        self.resolved.get(&role)
    }
}
