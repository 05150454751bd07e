//! Snapshot-based undo/redo.
//!
//! One linear timeline per drawing id, each a bounded pair of past and
//! future stacks holding immutable geometry snapshots. The manager is
//! generic over the snapshot type so callers can version whole line
//! sets, tapered diagrams, or anything else cloneable.

use crate::model::DrawingId;
use std::collections::{HashMap, VecDeque};

/// Default maximum number of undo steps kept per drawing.
pub const DEFAULT_HISTORY_DEPTH: usize = 30;

#[derive(Debug, Clone)]
struct Timeline<S> {
    past: VecDeque<S>,
    future: Vec<S>,
}

impl<S> Default for Timeline<S> {
    fn default() -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
        }
    }
}

/// Linear undo/redo stacks keyed by drawing id.
#[derive(Debug, Clone)]
pub struct HistoryManager<S> {
    timelines: HashMap<DrawingId, Timeline<S>>,
    capacity: usize,
}

impl<S: Clone> HistoryManager<S> {
    /// Manager with the default per-drawing depth.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_DEPTH)
    }

    /// Manager keeping at most `capacity` undo steps per drawing; the
    /// oldest snapshot is discarded first when full.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timelines: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Records the state as it was before a mutation. Clears any redo
    /// history for the drawing: timelines are linear, never branching.
    pub fn commit(&mut self, drawing: &str, snapshot: S) {
        let timeline = self.timelines.entry(drawing.to_string()).or_default();
        if timeline.past.len() == self.capacity {
            timeline.past.pop_front();
        }
        timeline.past.push_back(snapshot);
        timeline.future.clear();
        tracing::trace!(drawing, depth = timeline.past.len(), "committed snapshot");
    }

    /// Steps the drawing back one snapshot. `present` is the state
    /// currently live, pushed onto the redo stack. Returns `None` when
    /// there is nothing to undo, in which case `present` is dropped
    /// untouched.
    pub fn undo(&mut self, drawing: &str, present: S) -> Option<S> {
        let timeline = self.timelines.get_mut(drawing)?;
        let snapshot = timeline.past.pop_back()?;
        timeline.future.push(present);
        Some(snapshot)
    }

    /// Mirror of [`undo`](Self::undo).
    pub fn redo(&mut self, drawing: &str, present: S) -> Option<S> {
        let timeline = self.timelines.get_mut(drawing)?;
        let snapshot = timeline.future.pop()?;
        timeline.past.push_back(present);
        Some(snapshot)
    }

    pub fn can_undo(&self, drawing: &str) -> bool {
        self.timelines
            .get(drawing)
            .is_some_and(|t| !t.past.is_empty())
    }

    pub fn can_redo(&self, drawing: &str) -> bool {
        self.timelines
            .get(drawing)
            .is_some_and(|t| !t.future.is_empty())
    }

    /// `(undo steps, redo steps)` available for the drawing.
    pub fn depths(&self, drawing: &str) -> (usize, usize) {
        self.timelines
            .get(drawing)
            .map_or((0, 0), |t| (t.past.len(), t.future.len()))
    }

    /// Drops the drawing's entire timeline.
    pub fn clear(&mut self, drawing: &str) {
        self.timelines.remove(drawing);
    }
}

impl<S: Clone> Default for HistoryManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
