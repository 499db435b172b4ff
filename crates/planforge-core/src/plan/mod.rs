//! The floor-plan document model.
//!
//! Two views of a plan exist. The typed [`Plan`] is what the editor works
//! with. Raw `serde_json::Value` documents are what loaders hand in: they may
//! be missing collections or carry legacy shapes, so [`migrate_plan`] and
//! [`validate_plan`] operate on them before anything is deserialized.

mod entities;
mod id;
mod migrate;
mod validate;

pub use entities::{
    Annotation, Column, DEFAULT_DOOR_TYPE, DEFAULT_WINDOW_TYPE, Dimension, Furniture, Opening,
    Room, Scale3, Stairs, Wall,
};
pub use id::generate_id;
pub use migrate::{AnnotationSet, migrate_plan};
pub use validate::{ValidationResult, validate_plan};

use crate::error::{HistoryError, PlanError};
use crate::history::{Snapshot, StateHost};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema version written by [`create_default_plan`] and [`migrate_plan`].
pub const CURRENT_SCHEMA_VERSION: u32 = 2;
/// Default storey height in meters.
pub const DEFAULT_FLOOR_HEIGHT: f64 = 2.8;
/// Default wall thickness in meters.
pub const DEFAULT_WALL_THICKNESS: f64 = 0.15;

/// Entity collections of a plan with the id prefix used for each.
pub(crate) const COLLECTIONS: [(&str, &str); 9] = [
    ("walls", "wall"),
    ("rooms", "room"),
    ("doors", "door"),
    ("windows", "window"),
    ("dimensions", "dim"),
    ("annotations", "note"),
    ("furniture", "furn"),
    ("stairs", "stairs"),
    ("columns", "col"),
];

/// Length unit used for display. Geometry is always stored in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Meters,
    Centimeters,
    Feet,
}

/// A floor-plan document.
///
/// Collection order is insertion order. It decides rendering order and
/// breaks ties in hit testing, so collections are never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub units: Units,
    #[serde(default = "default_floor_height")]
    pub floor_height: f64,
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f64,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub doors: Vec<Opening>,
    #[serde(default)]
    pub windows: Vec<Opening>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub furniture: Vec<Furniture>,
    #[serde(default)]
    pub stairs: Vec<Stairs>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

fn default_floor_height() -> f64 {
    DEFAULT_FLOOR_HEIGHT
}

fn default_wall_thickness() -> f64 {
    DEFAULT_WALL_THICKNESS
}

/// Create an empty plan at the current schema version.
pub fn create_default_plan(name: &str) -> Plan {
    Plan {
        id: generate_id("plan"),
        name: name.to_string(),
        schema_version: CURRENT_SCHEMA_VERSION,
        units: Units::default(),
        floor_height: DEFAULT_FLOOR_HEIGHT,
        wall_thickness: DEFAULT_WALL_THICKNESS,
        walls: Vec::new(),
        rooms: Vec::new(),
        doors: Vec::new(),
        windows: Vec::new(),
        dimensions: Vec::new(),
        annotations: Vec::new(),
        furniture: Vec::new(),
        stairs: Vec::new(),
        columns: Vec::new(),
    }
}

impl Default for Plan {
    fn default() -> Self {
        create_default_plan("Untitled")
    }
}

impl Plan {
    /// Migrate a raw document and deserialize it.
    pub fn from_value(value: Value) -> Result<Self, PlanError> {
        if !value.is_object() {
            return Err(PlanError::NotAnObject);
        }
        Ok(serde_json::from_value(migrate_plan(value))?)
    }

    /// Parse, migrate and deserialize a JSON document.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn to_value(&self) -> Result<Value, PlanError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run [`validate_plan`] on this plan's serialized form.
    pub fn validate(&self) -> ValidationResult {
        match self.to_value() {
            Ok(value) => validate_plan(&value),
            Err(e) => {
                ValidationResult::from_errors(vec![format!("Plan could not be serialized: {e}")])
            }
        }
    }

    pub fn wall(&self, id: &str) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    /// Doors and windows hosted by the given wall, doors first.
    pub fn openings_on_wall<'a>(
        &'a self,
        wall_id: &'a str,
    ) -> impl Iterator<Item = &'a Opening> + 'a {
        self.doors
            .iter()
            .chain(self.windows.iter())
            .filter(move |o| o.wall_id == wall_id)
    }

    /// Total number of entities across all collections.
    pub fn len(&self) -> usize {
        self.walls.len()
            + self.rooms.len()
            + self.doors.len()
            + self.windows.len()
            + self.dimensions.len()
            + self.annotations.len()
            + self.furniture.len()
            + self.stairs.len()
            + self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateHost for Plan {
    fn capture_state(&self) -> Result<Snapshot, HistoryError> {
        serde_json::to_string(self)
            .map(Snapshot::new)
            .map_err(|e| HistoryError::Capture(e.to_string()))
    }

    fn restore_state(&mut self, snapshot: &Snapshot) -> Result<(), HistoryError> {
        *self = serde_json::from_str(snapshot.as_str())
            .map_err(|e| HistoryError::Restore(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use serde_json::json;

    #[test]
    fn test_default_plan() {
        let plan = create_default_plan("Ground floor");
        assert_eq!(plan.name, "Ground floor");
        assert!(plan.id.starts_with("plan_"));
        assert_eq!(plan.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(plan.units, Units::Meters);
        assert!((plan.wall_thickness - DEFAULT_WALL_THICKNESS).abs() < f64::EPSILON);
        assert!((plan.floor_height - DEFAULT_FLOOR_HEIGHT).abs() < f64::EPSILON);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_default_plan_serializes_all_collections() {
        let value = create_default_plan("A").to_value().unwrap();
        for (key, _) in COLLECTIONS {
            assert_eq!(value[key], json!([]), "collection {key}");
        }
        assert_eq!(value["schemaVersion"], json!(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn test_from_json_migrates_legacy_document() {
        let json = r#"{
            "id": "p1",
            "name": "Legacy",
            "walls": [{ "start": { "x": 0, "y": 0 }, "end": { "x": 5, "y": 0 } }],
            "annotations": { "notes": [{ "id": "n1", "text": "hi" }], "measurements": [] }
        }"#;
        let plan = Plan::from_json(json).unwrap();
        assert_eq!(plan.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(plan.walls.len(), 1);
        assert!(plan.walls[0].id.starts_with("wall_"));
        assert_eq!(plan.annotations.len(), 1);
        assert_eq!(plan.annotations[0].text, "hi");
    }

    #[test]
    fn test_from_json_tolerates_odd_annotations() {
        let json = r#"{
            "id": "p1",
            "name": "A",
            "annotations": { "notes": null, "measurements": [{ "id": "m1" }] }
        }"#;
        let plan = Plan::from_json(json).unwrap();
        assert_eq!(plan.annotations.len(), 1);
        assert_eq!(plan.annotations[0].id, "m1");

        let plan =
            Plan::from_json(r#"{ "id": "p1", "name": "A", "annotations": "legacy" }"#).unwrap();
        assert!(plan.annotations.is_empty());
    }

    #[test]
    fn test_from_json_accepts_numeric_ids() {
        let json = r#"{
            "id": "p1",
            "name": "Numeric",
            "walls": [{ "id": 7, "start": { "x": 0, "y": 0 }, "end": { "x": 5, "y": 0 } }],
            "doors": [{ "id": 3, "wallId": 7, "position": 1.0 }]
        }"#;
        let plan = Plan::from_json(json).unwrap();
        assert_eq!(plan.walls[0].id, "7");
        assert_eq!(plan.doors[0].id, "3");
        assert_eq!(plan.openings_on_wall("7").count(), 1);
        assert!(plan.validate().valid);
    }

    #[test]
    fn test_from_json_keeps_opening_without_wall() {
        let plan = Plan::from_json(r#"{ "id": "p1", "name": "A", "doors": [{ "id": "d1" }] }"#)
            .unwrap();
        assert_eq!(plan.doors[0].wall_id, "");
        assert_eq!(plan.validate().errors, vec!["Door d1 has no wallId".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(Plan::from_json("[1, 2]"), Err(PlanError::NotAnObject)));
        assert!(matches!(Plan::from_json("{"), Err(PlanError::Json(_))));
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let mut plan = create_default_plan("Order");
        plan.walls.push(Wall::new("b", Point::new(0.0, 0.0), Point::new(1.0, 0.0)));
        plan.walls.push(Wall::new("a", Point::new(1.0, 0.0), Point::new(1.0, 1.0)));

        let loaded = Plan::from_json(&plan.to_json().unwrap()).unwrap();
        assert_eq!(loaded, plan);
    }

    #[test]
    fn test_openings_on_wall() {
        let mut plan = create_default_plan("Openings");
        plan.walls.push(Wall::new("w1", Point::new(0.0, 0.0), Point::new(5.0, 0.0)));
        plan.doors.push(Opening::door("d1", "w1", 1.0, 0.9));
        plan.doors.push(Opening::door("d2", "w2", 1.0, 0.9));
        plan.windows.push(Opening::window("win1", "w1", 3.0, 1.2));

        let ids: Vec<&str> = plan.openings_on_wall("w1").map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "win1"]);
        assert!(plan.wall("w1").is_some());
        assert!(plan.wall("w2").is_none());
    }

    #[test]
    fn test_state_host_roundtrip() {
        let mut plan = create_default_plan("History");
        let snapshot = plan.capture_state().unwrap();
        plan.columns.push(Column { id: "c1".into(), position: Point::new(1.0, 1.0), size: 0.4 });

        plan.restore_state(&snapshot).unwrap();
        assert!(plan.columns.is_empty());
    }
}
