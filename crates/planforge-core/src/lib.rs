//! PlanForge Core Library
//!
//! Platform-agnostic geometry, hit testing, plan data model and undo history
//! for the PlanForge floor-plan editor.

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod history;
pub mod plan;
pub mod session;
pub mod snap;
pub mod viewport;

pub use catalog::{Footprint, FurnitureCatalog, NoCatalog, StaticCatalog};
pub use config::{EditorConfig, HitTolerances};
pub use error::{ConfigError, HistoryError, PlanError};
pub use events::{EventBus, EventCategory, EventFilter, PlanEvent, SubscriptionId};
pub use history::{HistoryManager, MAX_UNDO_HISTORY, Snapshot, StateAccessors, StateHost};
pub use hit_test::{ElementKind, ElementRef, HitTester, find_element_at};
pub use plan::{
    Plan, ValidationResult, create_default_plan, generate_id, migrate_plan, validate_plan,
};
pub use session::{PlanSession, WallDeletePolicy};
pub use snap::{GRID_SIZE, SnapKind, SnapMode, SnapResult, snap_point};
pub use viewport::{Viewport, screen_to_world, world_to_screen};
