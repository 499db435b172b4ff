//! Bounded undo/redo history over serialized document snapshots.
//!
//! The manager never touches the document itself. A [`StateHost`] captures
//! and restores state on its behalf, and every operation takes the host as an
//! argument.
//!
//! Callers must take a snapshot *before* the mutation it guards; a missing
//! call cannot be detected. Each snapshot is a full copy of the document,
//! so memory grows with document size times history depth.

use crate::error::HistoryError;
use std::collections::VecDeque;

/// Default number of undo steps kept.
pub const MAX_UNDO_HISTORY: usize = 50;

/// An immutable serialized capture of document state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(serialized: String) -> Self {
        Self(serialized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// State accessors supplied by whoever owns the document.
pub trait StateHost {
    /// Serialize the current document state.
    fn capture_state(&self) -> Result<Snapshot, HistoryError>;

    /// Replace the current document state with a captured one.
    fn restore_state(&mut self, snapshot: &Snapshot) -> Result<(), HistoryError>;
}

/// A [`StateHost`] built from a pair of closures.
pub struct StateAccessors<G, R> {
    get_state: G,
    restore_state: R,
}

impl<G, R> StateAccessors<G, R>
where
    G: Fn() -> Result<Snapshot, HistoryError>,
    R: FnMut(&Snapshot) -> Result<(), HistoryError>,
{
    pub fn new(get_state: G, restore_state: R) -> Self {
        Self { get_state, restore_state }
    }
}

impl<G, R> StateHost for StateAccessors<G, R>
where
    G: Fn() -> Result<Snapshot, HistoryError>,
    R: FnMut(&Snapshot) -> Result<(), HistoryError>,
{
    fn capture_state(&self) -> Result<Snapshot, HistoryError> {
        (self.get_state)()
    }

    fn restore_state(&mut self, snapshot: &Snapshot) -> Result<(), HistoryError> {
        (self.restore_state)(snapshot)
    }
}

/// Linear undo/redo stacks. Taking a new snapshot discards redo history.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::with_limit(MAX_UNDO_HISTORY)
    }

    /// Create a manager keeping at most `limit` undo steps (minimum 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Push the host's current state to the undo stack (call before making changes).
    pub fn snapshot(&mut self, host: &impl StateHost) -> Result<(), HistoryError> {
        let snapshot = host.capture_state()?;
        self.push_undo(snapshot);
        self.redo_stack.clear();
        log::debug!("History snapshot taken, {} undo steps", self.undo_stack.len());
        Ok(())
    }

    /// Undo the last change.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. If the host fails,
    /// both stacks are left as they were.
    pub fn undo(&mut self, host: &mut impl StateHost) -> Result<bool, HistoryError> {
        let Some(previous) = self.undo_stack.back() else {
            return Ok(false);
        };
        let current = host.capture_state()?;
        host.restore_state(previous)?;

        self.undo_stack.pop_back();
        self.redo_stack.push(current);
        Ok(true)
    }

    /// Redo the last undone change. Mirrors [`HistoryManager::undo`].
    pub fn redo(&mut self, host: &mut impl StateHost) -> Result<bool, HistoryError> {
        let Some(next) = self.redo_stack.last() else {
            return Ok(false);
        };
        let current = host.capture_state()?;
        host.restore_state(next)?;

        self.redo_stack.pop();
        self.push_undo(current);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history, e.g. when a different document is loaded.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }
}
