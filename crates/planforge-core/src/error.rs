//! Error types for the serialization and host-accessor boundaries.
//!
//! Validation and hit testing never produce these: they report through
//! [`ValidationResult`](crate::plan::ValidationResult) and `Option` instead.

use thiserror::Error;

/// Errors raised while converting plan documents.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Plan document is not a JSON object")]
    NotAnObject,
    #[error("Wall not found: {0}")]
    UnknownWall(String),
    #[error("Wall {wall_id} still hosts openings: {}", openings.join(", "))]
    WallHasOpenings {
        wall_id: String,
        openings: Vec<String>,
    },
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Errors raised by undo/redo state accessors.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to capture state: {0}")]
    Capture(String),
    #[error("Failed to restore state: {0}")]
    Restore(String),
}

/// Errors raised while loading editor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}
