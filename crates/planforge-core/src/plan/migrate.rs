//! Additive schema migration of raw plan documents.
//!
//! Migration only ever fills gaps: missing collections, ids, opening types
//! and furniture transforms. A present value is never overwritten, so running
//! it twice is a no-op apart from the schema version stamp. Numeric ids are
//! kept but rewritten as their string form.

use super::entities::{DEFAULT_DOOR_TYPE, DEFAULT_WINDOW_TYPE};
use super::id::generate_id;
use super::{COLLECTIONS, CURRENT_SCHEMA_VERSION, DEFAULT_FLOOR_HEIGHT, DEFAULT_WALL_THICKNESS};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value, json};

/// The accepted encodings of a plan's annotations.
///
/// Older documents split annotations into notes and measurements. Both
/// forms collapse into a single ordered list via [`AnnotationSet::into_flat`].
/// A legacy half that is missing, `null` or not a list counts as empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AnnotationSet {
    Flat(Vec<Value>),
    Legacy {
        #[serde(default, deserialize_with = "list_or_empty")]
        notes: Vec<Value>,
        #[serde(default, deserialize_with = "list_or_empty")]
        measurements: Vec<Value>,
    },
}

fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

impl AnnotationSet {
    /// Notes first, then measurements.
    pub fn into_flat(self) -> Vec<Value> {
        match self {
            AnnotationSet::Flat(items) => items,
            AnnotationSet::Legacy { mut notes, measurements } => {
                notes.extend(measurements);
                notes
            }
        }
    }
}

/// Upgrade a raw plan document to the current schema.
///
/// Anything other than a JSON object (including `null`) is returned unchanged.
pub fn migrate_plan(mut plan: Value) -> Value {
    let Some(root) = plan.as_object_mut() else {
        return plan;
    };

    let from_version = root.get("schemaVersion").and_then(Value::as_u64);

    insert_missing(root, "units", json!("meters"));
    insert_missing(root, "floorHeight", json!(DEFAULT_FLOOR_HEIGHT));
    insert_missing(root, "wallThickness", json!(DEFAULT_WALL_THICKNESS));

    normalize_annotations(root);

    let mut assigned = 0usize;
    for (key, prefix) in COLLECTIONS {
        let collection = root.entry(key).or_insert_with(|| Value::Array(Vec::new()));
        if collection.is_null() {
            *collection = Value::Array(Vec::new());
        }
        let Some(items) = collection.as_array_mut() else {
            log::warn!("Plan collection '{}' is not an array, leaving it untouched", key);
            continue;
        };

        for item in items.iter_mut().filter_map(Value::as_object_mut) {
            if !has_id(item) {
                item.insert("id".to_string(), Value::String(generate_id(prefix)));
                assigned += 1;
            }
            stringify_number(item, "id");
            match key {
                "doors" => {
                    insert_missing(item, "type", json!(DEFAULT_DOOR_TYPE));
                    stringify_number(item, "wallId");
                }
                "windows" => {
                    insert_missing(item, "type", json!(DEFAULT_WINDOW_TYPE));
                    stringify_number(item, "wallId");
                }
                "furniture" => {
                    insert_missing(item, "position", json!({ "x": 0.0, "y": 0.0 }));
                    insert_missing(item, "rotation", json!(0.0));
                    insert_missing(item, "scale", json!({ "x": 1.0, "y": 1.0, "z": 1.0 }));
                }
                _ => {}
            }
        }
    }

    root.insert("schemaVersion".to_string(), json!(CURRENT_SCHEMA_VERSION));

    log::debug!(
        "Migrated plan from schema {:?} to {}, assigned {} ids",
        from_version,
        CURRENT_SCHEMA_VERSION,
        assigned
    );
    plan
}

fn insert_missing(object: &mut Map<String, Value>, key: &str, value: Value) {
    match object.get(key) {
        Some(existing) if !existing.is_null() => {}
        _ => {
            object.insert(key.to_string(), value);
        }
    }
}

fn has_id(object: &Map<String, Value>) -> bool {
    match object.get("id") {
        Some(Value::String(id)) => !id.is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    }
}

/// Legacy documents used numeric ids; the typed model keys everything by string.
fn stringify_number(object: &mut Map<String, Value>, key: &str) {
    if let Some(Value::Number(n)) = object.get(key) {
        let text = n.to_string();
        object.insert(key.to_string(), Value::String(text));
    }
}

fn normalize_annotations(root: &mut Map<String, Value>) {
    let Some(raw) = root.get("annotations") else {
        return;
    };
    if raw.is_array() || raw.is_null() {
        return;
    }
    let flat = match AnnotationSet::deserialize(raw) {
        Ok(set) => set.into_flat(),
        Err(e) => {
            log::warn!("Unrecognized annotations shape, dropping it: {}", e);
            Vec::new()
        }
    };
    root.insert("annotations".to_string(), Value::Array(flat));
}
