//! Editor tuning: grid, snapping, hit tolerances and history depth.

use crate::error::ConfigError;
use crate::history::MAX_UNDO_HISTORY;
use crate::snap::{ANGLE_SNAP_INCREMENT, GRID_SIZE, MAGNETIC_SNAP_THRESHOLD, SnapMode};
use serde::{Deserialize, Serialize};

/// Default hit tolerance around walls.
pub const WALL_TOLERANCE: f64 = 0.3;
/// Default hit tolerance added to a door/window's half width.
pub const OPENING_TOLERANCE: f64 = 0.3;
/// Default hit tolerance around furniture footprints.
pub const FURNITURE_TOLERANCE: f64 = 0.2;
/// Default hit tolerance added to a column's radius.
pub const COLUMN_TOLERANCE: f64 = 0.3;
/// Default hit tolerance around stair runs.
pub const STAIRS_TOLERANCE: f64 = 0.2;
/// Default hit tolerance around dimension lines.
pub const DIMENSION_TOLERANCE: f64 = 0.3;

/// Per-element-type hit tolerances in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HitTolerances {
    pub wall: f64,
    pub opening: f64,
    pub furniture: f64,
    pub column: f64,
    pub stairs: f64,
    pub dimension: f64,
}

impl Default for HitTolerances {
    fn default() -> Self {
        Self {
            wall: WALL_TOLERANCE,
            opening: OPENING_TOLERANCE,
            furniture: FURNITURE_TOLERANCE,
            column: COLUMN_TOLERANCE,
            stairs: STAIRS_TOLERANCE,
            dimension: DIMENSION_TOLERANCE,
        }
    }
}

impl HitTolerances {
    /// Every tolerance replaced by one value.
    pub fn uniform(tolerance: f64) -> Self {
        Self {
            wall: tolerance,
            opening: tolerance,
            furniture: tolerance,
            column: tolerance,
            stairs: tolerance,
            dimension: tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub snap_mode: SnapMode,
    pub grid_size: f64,
    pub magnetic_threshold: f64,
    pub angle_increment_degrees: f64,
    pub history_limit: usize,
    pub hit_tolerances: HitTolerances,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_mode: SnapMode::default(),
            grid_size: GRID_SIZE,
            magnetic_threshold: MAGNETIC_SNAP_THRESHOLD,
            angle_increment_degrees: ANGLE_SNAP_INCREMENT,
            history_limit: MAX_UNDO_HISTORY,
            hit_tolerances: HitTolerances::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a config document; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_size > 0.0 && self.grid_size.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "gridSize must be positive, got {}",
                self.grid_size
            )));
        }
        if !(self.angle_increment_degrees > 0.0 && self.angle_increment_degrees.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "angleIncrementDegrees must be positive, got {}",
                self.angle_increment_degrees
            )));
        }
        if self.magnetic_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "magneticThreshold must not be negative, got {}",
                self.magnetic_threshold
            )));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("historyLimit must be at least 1".to_string()));
        }
        Ok(())
    }
}
