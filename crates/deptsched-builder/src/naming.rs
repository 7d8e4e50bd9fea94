//! Report name uniqueness under the host's naming rule

use crate::ScheduleError;
use std::collections::HashMap;

/// Name in the form the host compares it
pub fn normalize(name: &str, case_insensitive: bool) -> String {
    let trimmed = name.trim();
    if case_insensitive {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Check that every planned name is unique
///
/// `names` pairs each report name with a label describing its origin, used in
/// the error.
pub fn ensure_unique<'a, I>(names: I, case_insensitive: bool) -> Result<(), ScheduleError>
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut seen: HashMap<String, String> = HashMap::new();

    for (name, origin) in names {
        let key = normalize(name, case_insensitive);
        if let Some(previous) = seen.get(&key) {
            return Err(ScheduleError::DuplicateReportName {
                name: name.to_string(),
                conflicts_with: previous.clone(),
            });
        }
        seen.insert(key, origin);
    }

    Ok(())
}

/// Check that no planned name collides with a report already in the document
pub fn ensure_absent<'a, I>(
    planned: I,
    existing: &[String],
    case_insensitive: bool,
) -> Result<(), ScheduleError>
where
    I: IntoIterator<Item = &'a str>,
{
    let existing: HashMap<String, &String> = existing
        .iter()
        .map(|name| (normalize(name, case_insensitive), name))
        .collect();

    for name in planned {
        if let Some(found) = existing.get(&normalize(name, case_insensitive)) {
            return Err(ScheduleError::DuplicateReportName {
                name: name.to_string(),
                conflicts_with: format!("existing report '{}'", found),
            });
        }
    }

    Ok(())
}
