//! Edit session: the current plan together with its view, history and
//! listeners.
//!
//! This is the glue an editing controller drives. It makes sure every
//! mutation goes through [`PlanSession::edit`], which snapshots the plan
//! before running the edit.

use crate::catalog::{FurnitureCatalog, NoCatalog};
use crate::config::EditorConfig;
use crate::error::{HistoryError, PlanError};
use crate::events::{EventBus, PlanEvent};
use crate::hit_test::{ElementRef, HitTester};
use crate::history::HistoryManager;
use crate::plan::{Plan, ValidationResult, Wall};
use crate::snap::{SnapResult, constrain_line, snap_with_mode};
use crate::viewport::Viewport;
use kurbo::Point;

/// What deleting a wall does to the doors and windows it hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallDeletePolicy {
    /// Delete only the wall. Its openings dangle until validation reports them.
    #[default]
    LeaveDangling,
    /// Delete the wall's doors and windows with it.
    Cascade,
    /// Refuse to delete a wall that still hosts openings.
    Reject,
}

pub struct PlanSession {
    plan: Plan,
    viewport: Viewport,
    history: HistoryManager,
    events: EventBus,
    config: EditorConfig,
    catalog: Box<dyn FurnitureCatalog>,
}

impl Default for PlanSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl PlanSession {
    /// Create a session editing an empty plan.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            plan: Plan::default(),
            viewport: Viewport::default(),
            history: HistoryManager::with_limit(config.history_limit),
            events: EventBus::new(),
            config,
            catalog: Box::new(NoCatalog),
        }
    }

    pub fn with_catalog(mut self, catalog: impl FurnitureCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the current plan. History from the previous plan is dropped.
    pub fn load_plan(&mut self, plan: Plan) {
        log::info!("Loaded plan {} ({} elements)", plan.id, plan.len());
        self.plan = plan;
        self.history.clear();
        self.events.publish(&PlanEvent::PlanLoaded { plan_id: self.plan.id.clone() });
        self.publish_history();
    }

    /// Parse, migrate and load a JSON document.
    pub fn load_json(&mut self, json: &str) -> Result<(), PlanError> {
        let plan = Plan::from_json(json)?;
        self.load_plan(plan);
        Ok(())
    }

    /// Snapshot the plan, then apply `f` to it.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut Plan) -> T) -> Result<T, HistoryError> {
        self.history.snapshot(&self.plan)?;
        let result = f(&mut self.plan);
        self.events.publish(&PlanEvent::PlanChanged);
        self.publish_history();
        Ok(result)
    }

    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        let undone = self.history.undo(&mut self.plan)?;
        if undone {
            self.events.publish(&PlanEvent::PlanChanged);
            self.publish_history();
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        let redone = self.history.redo(&mut self.plan)?;
        if redone {
            self.events.publish(&PlanEvent::PlanChanged);
            self.publish_history();
        }
        Ok(redone)
    }

    /// Element under a world point using the configured tolerances.
    pub fn element_at(&self, world_point: Point, tolerance: Option<f64>) -> Option<ElementRef<'_>> {
        HitTester::new(self.catalog.as_ref())
            .with_tolerances(self.config.hit_tolerances)
            .find_element_at(world_point, &self.plan, tolerance)
    }

    /// Element under a screen point.
    pub fn element_at_screen(&self, screen_point: Point) -> Option<ElementRef<'_>> {
        self.element_at(self.viewport.screen_to_world(screen_point), None)
    }

    /// Snapped world position for a screen point, per the configured snap mode.
    pub fn snap_cursor(&self, screen_point: Point) -> SnapResult {
        let world = self.viewport.screen_to_world(screen_point);
        snap_with_mode(
            world,
            self.config.snap_mode,
            &self.plan.walls,
            self.config.magnetic_threshold,
            self.config.grid_size,
        )
    }

    /// Constrain a line being drawn to the configured angle increment.
    pub fn constrain(&self, start: Point, end: Point) -> Point {
        constrain_line(start, end, self.config.angle_increment_degrees)
    }

    /// Delete a wall, handling its openings per `policy`.
    pub fn delete_wall(
        &mut self,
        wall_id: &str,
        policy: WallDeletePolicy,
    ) -> Result<Wall, PlanError> {
        let index = self
            .plan
            .walls
            .iter()
            .position(|w| w.id == wall_id)
            .ok_or_else(|| PlanError::UnknownWall(wall_id.to_string()))?;

        if policy == WallDeletePolicy::Reject {
            let openings: Vec<String> =
                self.plan.openings_on_wall(wall_id).map(|o| o.id.clone()).collect();
            if !openings.is_empty() {
                return Err(PlanError::WallHasOpenings {
                    wall_id: wall_id.to_string(),
                    openings,
                });
            }
        }

        let wall = self.edit(|plan| {
            let wall = plan.walls.remove(index);
            if policy == WallDeletePolicy::Cascade {
                plan.doors.retain(|d| d.wall_id != wall.id);
                plan.windows.retain(|w| w.wall_id != wall.id);
            }
            wall
        })?;
        Ok(wall)
    }

    /// Validate the current plan, publishing a notification when it fails.
    pub fn validate(&self) -> ValidationResult {
        let result = self.plan.validate();
        if !result.valid {
            self.events.publish(&PlanEvent::ValidationFailed { errors: result.errors.clone() });
        }
        result
    }

    fn publish_history(&self) {
        self.events.publish(&PlanEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }
}
