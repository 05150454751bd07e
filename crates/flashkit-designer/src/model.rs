//! Drawing model for the diagram engine.
//!
//! A [`Line`] is an ordered polyline with an optional fold attached to
//! either endpoint and optional user-pinned label positions. Lines are
//! treated as immutable values by every editor in this crate: edits take
//! the current line and return a new one, so snapshots pushed onto the
//! history manager can never alias live state.

use flashkit_core::geometry::{interior_angle, normalize_signed_degrees, segment_angle, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Identifier of a logical drawing (one undo/redo timeline each).
pub type DrawingId = String;

/// What a drawing represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingKind {
    /// The user-drawn polyline.
    Original,
    /// A derived diagram with independently edited segment lengths.
    Tapered,
    /// Anything else layered onto the canvas.
    Custom,
}

/// One of the two endpoints of a line. Folds hang off an endpoint and
/// segment appends extend one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnd {
    Start,
    End,
}

/// Orientation of a fold relative to its template definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldDirection {
    /// As defined by the template.
    Normal,
    /// Mirrored ("opposite") orientation.
    Opposite,
}

impl Default for FoldDirection {
    fn default() -> Self {
        Self::Normal
    }
}

impl FoldDirection {
    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            Self::Normal => Self::Opposite,
            Self::Opposite => Self::Normal,
        }
    }
}

/// One user-editable fold segment: length plus signed turn angle in
/// degrees, measured against the incoming direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldSegmentEdit {
    pub length: f64,
    pub angle: f64,
}

/// A fold attached to one endpoint of a line: the chosen template plus
/// the per-segment overrides the user has made. Owned exclusively by the
/// line it is attached to; created and replaced only through
/// [`crate::fold`] operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldState {
    /// Id of the selected template in the catalog.
    pub template_id: String,
    /// Contiguous per-segment edits, index 0 first. Synthesis always
    /// reads these, never the template, so customizations survive
    /// anchor moves.
    pub segment_edits: Vec<FoldSegmentEdit>,
    pub direction: FoldDirection,
}

/// An ordered polyline on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: Uuid,
    pub points: Vec<Point>,
    pub color: String,
    /// Fold attached to the first point, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_fold: Option<FoldState>,
    /// Fold attached to the last point, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_fold: Option<FoldState>,
    /// User-pinned position of the label for segment `i`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_positions: Option<Vec<Option<Point>>>,
    /// User-pinned position of the label for the interior vertex at
    /// index `i + 1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_label_positions: Option<Vec<Option<Point>>>,
}

impl Line {
    /// Creates an empty line with a fresh id.
    pub fn new(color: impl Into<String>) -> Self {
        Self::with_points(color, Vec::new())
    }

    /// Creates a line from an existing point list.
    pub fn with_points(color: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color: color.into(),
            start_fold: None,
            end_fold: None,
            label_positions: None,
            angle_label_positions: None,
        }
    }

    /// Number of visible segments. A line with fewer than 2 points has
    /// none.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Length of segment `i` (between `points[i]` and `points[i + 1]`),
    /// or `None` when out of range.
    pub fn segment_length(&self, i: usize) -> Option<f64> {
        let a = self.points.get(i)?;
        let b = self.points.get(i + 1)?;
        Some(a.distance_to(b))
    }

    /// Appends a point, as drawing mode does while the line is being
    /// traced.
    pub fn push_point(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Per-segment data for the layers panel: length plus the angle
    /// relative to the previous segment (absolute direction for segment
    /// 0).
    pub fn segments(&self) -> Vec<SegmentData> {
        let mut out = Vec::with_capacity(self.segment_count());
        for i in 0..self.segment_count() {
            let start = self.points[i];
            let end = self.points[i + 1];
            let angle = if i == 0 {
                segment_angle(start, end)
            } else {
                let prev = segment_angle(self.points[i - 1], start);
                normalize_signed_degrees(segment_angle(start, end) - prev)
            };
            out.push(SegmentData {
                index: i,
                length: start.distance_to(&end),
                angle,
                start_point: start,
                end_point: end,
            });
        }
        out
    }

    /// Per-vertex interior angles for the layers panel. Vertex `i + 1`
    /// of the polyline yields entry `i`.
    pub fn angles(&self) -> Vec<AngleData> {
        let segments = self.segments();
        let mut out = Vec::new();
        for i in 1..self.points.len().saturating_sub(1) {
            out.push(AngleData {
                index: i - 1,
                angle: interior_angle(self.points[i - 1], self.points[i], self.points[i + 1]),
                vertex: self.points[i],
                prev_segment: segments[i - 1].clone(),
                next_segment: segments[i].clone(),
            });
        }
        out
    }

    /// Full geometry summary of the line.
    pub fn geometry_info(&self) -> GeometryInfo {
        let segments = self.segments();
        let angles = self.angles();
        GeometryInfo {
            total_length: segments.iter().map(|s| s.length).sum(),
            segment_count: segments.len(),
            segments,
            angles,
        }
    }

    /// Returns the pinned label position for segment `i`, if the user
    /// dragged it somewhere.
    pub fn pinned_label(&self, i: usize) -> Option<Point> {
        self.label_positions.as_ref()?.get(i).copied().flatten()
    }

    /// Returns the pinned label position for the vertex at `i + 1`.
    pub fn pinned_angle_label(&self, i: usize) -> Option<Point> {
        self.angle_label_positions
            .as_ref()?
            .get(i)
            .copied()
            .flatten()
    }

    /// Pins the label for segment `i` at `position`, growing the pin
    /// list as needed.
    pub fn pin_label(&mut self, i: usize, position: Point) {
        let pins = self.label_positions.get_or_insert_with(Vec::new);
        if pins.len() <= i {
            pins.resize(i + 1, None);
        }
        pins[i] = Some(position);
    }

    /// Pins the angle label for the vertex at `i + 1`.
    pub fn pin_angle_label(&mut self, i: usize, position: Point) {
        let pins = self.angle_label_positions.get_or_insert_with(Vec::new);
        if pins.len() <= i {
            pins.resize(i + 1, None);
        }
        pins[i] = Some(position);
    }
}

/// Segment summary shown in the layers panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentData {
    pub index: usize,
    pub length: f64,
    /// Angle in degrees from the previous segment; absolute direction
    /// for the first segment.
    pub angle: f64,
    pub start_point: Point,
    pub end_point: Point,
}

/// Interior-angle summary shown in the layers panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleData {
    pub index: usize,
    /// Interior angle in degrees, unsigned.
    pub angle: f64,
    pub vertex: Point,
    pub prev_segment: SegmentData,
    pub next_segment: SegmentData,
}

/// Geometry summary of a whole line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryInfo {
    pub total_length: f64,
    pub segment_count: usize,
    pub segments: Vec<SegmentData>,
    pub angles: Vec<AngleData>,
}

/// A named drawing: a set of lines plus layer flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub id: DrawingId,
    pub name: String,
    pub kind: DrawingKind,
    pub lines: Vec<Line>,
    pub visible: bool,
    pub locked: bool,
    /// For derived drawings, the drawing they were generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<DrawingId>,
}

impl Drawing {
    pub fn new(id: impl Into<DrawingId>, name: impl Into<String>, kind: DrawingKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            lines: Vec::new(),
            visible: true,
            locked: false,
            source_id: None,
        }
    }
}

/// Id of the drawing every registry starts with.
pub const DEFAULT_DRAWING_ID: &str = "original";

/// Registry of the drawings on a canvas, in render order (first entry is
/// the bottom layer). Always contains the default original drawing.
#[derive(Debug, Clone)]
pub struct DrawingRegistry {
    drawings: HashMap<DrawingId, Drawing>,
    order: Vec<DrawingId>,
    active: DrawingId,
}

impl DrawingRegistry {
    pub fn new() -> Self {
        let original = Drawing::new(DEFAULT_DRAWING_ID, "Original", DrawingKind::Original);
        let mut drawings = HashMap::new();
        drawings.insert(original.id.clone(), original);
        Self {
            drawings,
            order: vec![DEFAULT_DRAWING_ID.to_string()],
            active: DEFAULT_DRAWING_ID.to_string(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Drawing> {
        self.drawings.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Drawing> {
        self.drawings.get_mut(id)
    }

    pub fn active_id(&self) -> &DrawingId {
        &self.active
    }

    pub fn active(&self) -> &Drawing {
        &self.drawings[&self.active]
    }

    /// Render order, bottom layer first.
    pub fn order(&self) -> &[DrawingId] {
        &self.order
    }

    /// Adds a drawing on top of the stack. Replaces any drawing already
    /// registered under the same id.
    pub fn add(&mut self, drawing: Drawing) {
        if !self.drawings.contains_key(&drawing.id) {
            self.order.push(drawing.id.clone());
        }
        self.drawings.insert(drawing.id.clone(), drawing);
    }

    /// Removes a drawing. The default original drawing cannot be
    /// removed; removing the active drawing activates the original.
    pub fn remove(&mut self, id: &str) -> Option<Drawing> {
        if id == DEFAULT_DRAWING_ID {
            return None;
        }
        let removed = self.drawings.remove(id)?;
        self.order.retain(|d| d != id);
        if self.active == id {
            self.active = DEFAULT_DRAWING_ID.to_string();
        }
        Some(removed)
    }

    /// Switches the active drawing; ignored for unknown ids.
    pub fn set_active(&mut self, id: &str) {
        if self.drawings.contains_key(id) {
            self.active = id.to_string();
        } else {
            tracing::debug!(id, "ignoring activation of unknown drawing");
        }
    }

    /// First drawing of the given kind, if any.
    pub fn by_kind(&self, kind: DrawingKind) -> Option<&Drawing> {
        self.order
            .iter()
            .filter_map(|id| self.drawings.get(id))
            .find(|d| d.kind == kind)
    }
}

impl Default for DrawingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
