//! Plan entity definitions.
//!
//! Field names serialize in camelCase to match the exchanged document shape.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default door type written by migration.
pub const DEFAULT_DOOR_TYPE: &str = "single";
/// Default window type written by migration.
pub const DEFAULT_WINDOW_TYPE: &str = "standard";

/// A straight wall segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: String,
    pub start: Point,
    pub end: Point,
    /// Overrides the plan-wide wall thickness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    /// Overrides the plan-wide floor height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Wall {
    pub fn new(id: impl Into<String>, start: Point, end: Point) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            thickness: None,
            height: None,
        }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    /// Zero-length walls are tolerated but host no hittable openings.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// A room outline, an ordered ring of vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vertices: Vec<Point>,
    #[serde(default = "default_floor_material")]
    pub floor_material: String,
    #[serde(default = "default_floor_color")]
    pub floor_color: String,
}

fn default_floor_material() -> String {
    "wood".to_string()
}

fn default_floor_color() -> String {
    "#c8b59a".to_string()
}

impl Room {
    pub fn new(id: impl Into<String>, vertices: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            vertices,
            floor_material: default_floor_material(),
            floor_color: default_floor_color(),
        }
    }
}

/// A door or window hosted by a wall.
///
/// `position` is the offset of the opening's near edge from the wall's start,
/// measured along the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: String,
    /// Empty when the document names no host wall; validation reports it.
    #[serde(default)]
    pub wall_id: String,
    #[serde(default)]
    pub position: f64,
    #[serde(default = "default_opening_width")]
    pub width: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

fn default_opening_width() -> f64 {
    0.9
}

impl Opening {
    pub fn door(
        id: impl Into<String>,
        wall_id: impl Into<String>,
        position: f64,
        width: f64,
    ) -> Self {
        Self {
            id: id.into(),
            wall_id: wall_id.into(),
            position,
            width,
            kind: DEFAULT_DOOR_TYPE.to_string(),
        }
    }

    pub fn window(
        id: impl Into<String>,
        wall_id: impl Into<String>,
        position: f64,
        width: f64,
    ) -> Self {
        Self {
            kind: DEFAULT_WINDOW_TYPE.to_string(),
            ..Self::door(id, wall_id, position, width)
        }
    }
}

/// A linear dimension drawn `offset` meters to the left of start→end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: String,
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub offset: f64,
}

/// A free-form note or measurement label.
///
/// Fields this crate does not interpret are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-axis scale factors of a furniture model. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Scale3 {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0, z: 1.0 }
    }
}

/// A placed catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Furniture {
    pub id: String,
    #[serde(default)]
    pub catalog_id: String,
    #[serde(default)]
    pub position: Point,
    /// Rotation in radians around the item's center.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub scale: Scale3,
}

impl Furniture {
    pub fn new(id: impl Into<String>, catalog_id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            catalog_id: catalog_id.into(),
            position,
            rotation: 0.0,
            scale: Scale3::default(),
        }
    }
}

/// A straight stair run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stairs {
    pub id: String,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_stairs_width")]
    pub width: f64,
    #[serde(default = "default_stairs_depth")]
    pub depth: f64,
}

fn default_stairs_width() -> f64 {
    1.0
}

fn default_stairs_depth() -> f64 {
    3.0
}

/// A round structural column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub position: Point,
    /// Diameter in meters.
    #[serde(default = "default_column_size")]
    pub size: f64,
}

fn default_column_size() -> f64 {
    0.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_opening_type_field_name() {
        let door = Opening::door("d1", "w1", 1.0, 0.9);
        let value = serde_json::to_value(&door).unwrap();
        assert_eq!(value["type"], json!("single"));
        assert_eq!(value["wallId"], json!("w1"));

        let window = Opening::window("win1", "w1", 2.0, 1.2);
        assert_eq!(window.kind, DEFAULT_WINDOW_TYPE);
        assert_eq!(window.wall_id, "w1");
    }

    #[test]
    fn test_annotation_keeps_unknown_fields() {
        let value = json!({ "id": "n1", "text": "Kitchen", "fontSize": 14 });
        let annotation: Annotation = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(annotation.extra.get("fontSize"), Some(&json!(14)));
        assert_eq!(serde_json::to_value(&annotation).unwrap(), value);
    }

    #[test]
    fn test_furniture_defaults() {
        let item: Furniture = serde_json::from_value(json!({ "id": "f1" })).unwrap();
        assert_eq!(item.position, Point::ZERO);
        assert_eq!(item.rotation, 0.0);
        assert_eq!(item.scale, Scale3::default());
    }

    #[test]
    fn test_wall_length() {
        let wall = Wall::new("w1", Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((wall.length() - 5.0).abs() < 1e-12);
        assert!(!wall.is_degenerate());
        assert!(Wall::new("w2", Point::ZERO, Point::ZERO).is_degenerate());
    }
}
