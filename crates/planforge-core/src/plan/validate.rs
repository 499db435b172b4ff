//! Read-only structural and referential validation.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Outcome of [`validate_plan`]. Every violation found is listed, in the
/// order the checks ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a raw plan document without modifying it.
pub fn validate_plan(plan: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    let Some(root) = plan.as_object() else {
        errors.push(if plan.is_null() {
            "Plan is null".to_string()
        } else {
            "Plan must be an object".to_string()
        });
        return ValidationResult::from_errors(errors);
    };

    if !non_empty_str(root.get("id")) {
        errors.push("Plan is missing an id".to_string());
    }
    if !non_empty_str(root.get("name")) {
        errors.push("Plan is missing a name".to_string());
    }

    let walls = root.get("walls").and_then(Value::as_array);
    if walls.is_none() {
        errors.push("Plan walls must be an array".to_string());
    }
    if !root.get("rooms").is_some_and(Value::is_array) {
        errors.push("Plan rooms must be an array".to_string());
    }

    let wall_ids: HashSet<String> = walls
        .into_iter()
        .flatten()
        .filter_map(|w| id_text(w.get("id")))
        .collect();

    for (key, label) in [("doors", "Door"), ("windows", "Window")] {
        let Some(openings) = root.get(key).and_then(Value::as_array) else {
            continue;
        };
        for opening in openings {
            let id = id_text(opening.get("id")).unwrap_or_else(|| "<unknown>".to_string());
            match id_text(opening.get("wallId")) {
                Some(wall_id) if wall_ids.contains(&wall_id) => {}
                Some(wall_id) => {
                    log::warn!("{} {} references missing wall {}", label, id, wall_id);
                    errors.push(format!("{label} {id} references missing wall {wall_id}"));
                }
                None => errors.push(format!("{label} {id} has no wallId")),
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// A non-empty string id, or a legacy numeric id in string form.
fn id_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).is_some_and(|s| !s.is_empty())
}
