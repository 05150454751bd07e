//! Label placement with collision avoidance.
//!
//! Every layout pass rebuilds the full set of [`LabelDescriptor`]s and
//! resolves them in one deterministic sweep: pinned labels (dragged by
//! the user) are placed verbatim and become obstacles, then floating
//! labels try a short candidate ladder of offsets perpendicular to and
//! along their rotation until one clears every obstacle placed so far.
//! The resolver is a pure function of its inputs so re-running it on an
//! unchanged scene yields identical offsets.
//!
//! Text measurement is an external capability; [`CharCountMeasure`] is
//! the headless fallback when the host cannot measure real glyphs.

use crate::model::Line;
use flashkit_core::geometry::{
    angle_label_position, format_angle, midpoint, perpendicular_offset, readable_rotation,
    segment_angle, Point,
};
use flashkit_core::units::{format_length, MeasurementSystem};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Default font size for segment length labels, in pixels.
pub const SEGMENT_FONT_SIZE: f64 = 12.0;
/// Default font size for interior angle labels, in pixels.
pub const ANGLE_FONT_SIZE: f64 = 13.0;

/// Horizontal padding added around measured text.
const PADDING_X: f64 = 12.0;
/// Vertical padding added around measured text.
const PADDING_Y: f64 = 6.0;

/// Displacement magnitudes tried on each side of the preferred offset.
const STEP_MAGNITUDES: [f64; 8] = [12.0, -12.0, 24.0, -24.0, 36.0, -36.0, 48.0, -48.0];

/// What a label annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Segment,
    Angle,
}

/// A screen-space displacement from a label's anchor. Serialized with
/// the drawing when the user pins a label.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// One label to place, rebuilt fresh on every layout pass.
#[derive(Debug, Clone)]
pub struct LabelDescriptor {
    pub id: String,
    pub kind: LabelKind,
    pub anchor: Point,
    /// Rotation of the rendered text in degrees.
    pub rotation: f64,
    pub text: String,
    pub font_size: f64,
    /// Higher priority labels are placed earlier and therefore win the
    /// better spots.
    pub priority: i32,
    pub preferred_offset: Offset,
    /// Offset from a prior user drag; placed verbatim when present.
    pub pinned: Option<Offset>,
}

/// Measured extent of a piece of rendered text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Synchronous text measurement supplied by the host environment. Must
/// be deterministic in `(text, font_size, font_family)`.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f64, font_family: &str) -> TextSize;
}

/// Headless fallback measurement based on character count.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCountMeasure;

impl TextMeasure for CharCountMeasure {
    fn measure(&self, text: &str, font_size: f64, _font_family: &str) -> TextSize {
        TextSize {
            width: text.chars().count() as f64 * font_size * 0.6,
            height: font_size,
        }
    }
}

/// Distance from a segment to its length label.
const SEGMENT_LABEL_CLEARANCE: f64 = 14.0;
/// Distance from a vertex to its angle label, along the bisector.
const ANGLE_LABEL_CLEARANCE: f64 = 30.0;

/// Builds the label set for one line: a length label per segment,
/// rotated to read along it, and an interior-angle label per vertex,
/// offset along the bisector. Pinned positions stored on the line are
/// converted to offsets from the natural anchors.
pub fn line_labels(
    line: &Line,
    system: MeasurementSystem,
    decimals: usize,
) -> Vec<LabelDescriptor> {
    let mut out = Vec::new();

    for i in 0..line.segment_count() {
        let start = line.points[i];
        let end = line.points[i + 1];
        let anchor = midpoint(start, end);
        let lift = perpendicular_offset(start, end, -SEGMENT_LABEL_CLEARANCE);
        out.push(LabelDescriptor {
            id: format!("{}-segment-{i}", line.id),
            kind: LabelKind::Segment,
            anchor,
            rotation: readable_rotation(segment_angle(start, end)),
            text: format_length(start.distance_to(&end), system, decimals),
            font_size: SEGMENT_FONT_SIZE,
            priority: 0,
            preferred_offset: Offset::new(lift.x, lift.y),
            pinned: line
                .pinned_label(i)
                .map(|p| Offset::new(p.x - anchor.x, p.y - anchor.y)),
        });
    }

    for angle in line.angles() {
        let i = angle.index;
        let anchor = angle_label_position(
            line.points[i],
            angle.vertex,
            line.points[i + 2],
            ANGLE_LABEL_CLEARANCE,
        );
        out.push(LabelDescriptor {
            id: format!("{}-angle-{i}", line.id),
            kind: LabelKind::Angle,
            anchor,
            rotation: 0.0,
            text: format_angle(angle.angle, decimals),
            font_size: ANGLE_FONT_SIZE,
            // Angle labels win spots over segment labels.
            priority: 1,
            preferred_offset: Offset::default(),
            pinned: line
                .pinned_angle_label(i)
                .map(|p| Offset::new(p.x - anchor.x, p.y - anchor.y)),
        });
    }

    out
}

/// A label's bounding rectangle after rotation, cached with its AABB
/// for the cheap pre-check.
#[derive(Debug, Clone)]
struct PlacedRect {
    corners: [Point; 4],
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl PlacedRect {
    fn new(center: Point, width: f64, height: f64, rotation_deg: f64) -> Self {
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        let hw = width / 2.0;
        let hh = height / 2.0;
        let local = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
        let mut corners = [Point::new(0.0, 0.0); 4];
        for (i, (x, y)) in local.iter().enumerate() {
            corners[i] = Point::new(
                center.x + x * cos - y * sin,
                center.y + x * sin + y * cos,
            );
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for c in &corners {
            min_x = min_x.min(c.x);
            min_y = min_y.min(c.y);
            max_x = max_x.max(c.x);
            max_y = max_y.max(c.y);
        }
        Self {
            corners,
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn aabb_overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Exact intersection via the separating-axis test. Each rectangle
    /// contributes two unique edge normals.
    fn intersects(&self, other: &Self) -> bool {
        if !self.aabb_overlaps(other) {
            return false;
        }
        for rect in [self, other] {
            for i in 0..2 {
                let edge_x = rect.corners[i + 1].x - rect.corners[i].x;
                let edge_y = rect.corners[i + 1].y - rect.corners[i].y;
                let axis_x = -edge_y;
                let axis_y = edge_x;
                let (a_min, a_max) = project(&self.corners, axis_x, axis_y);
                let (b_min, b_max) = project(&other.corners, axis_x, axis_y);
                if a_max < b_min || b_max < a_min {
                    return false;
                }
            }
        }
        true
    }
}

fn project(corners: &[Point; 4], axis_x: f64, axis_y: f64) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for c in corners {
        let d = c.x * axis_x + c.y * axis_y;
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// Resolves the whole label set to non-overlapping offsets, keyed by
/// label id.
///
/// Pinned labels are placed first, at their pinned offset, no search.
/// Within each group labels are processed by descending priority, ties
/// broken by ascending id. A floating label that cannot find a clear
/// candidate falls back to its preferred offset even though it
/// collides: labels always render, overlap is an aesthetics issue only.
pub fn resolve(
    descriptors: &[LabelDescriptor],
    measure: &dyn TextMeasure,
    font_family: &str,
) -> BTreeMap<String, Offset> {
    let mut ordered: Vec<&LabelDescriptor> = descriptors.iter().collect();
    ordered.sort_by(|a, b| {
        let group_a = a.pinned.is_none();
        let group_b = b.pinned.is_none();
        group_a
            .cmp(&group_b)
            .then(b.priority.cmp(&a.priority))
            .then(a.id.cmp(&b.id))
    });

    let mut obstacles: Vec<PlacedRect> = Vec::with_capacity(ordered.len());
    let mut result = BTreeMap::new();

    for label in ordered {
        let size = measure.measure(&label.text, label.font_size, font_family);
        let width = size.width + PADDING_X;
        let height = size.height + PADDING_Y;

        let chosen = if let Some(pinned) = label.pinned {
            pinned
        } else {
            let mut placed = None;
            for candidate in candidates(label) {
                let rect = rect_at(label, candidate, width, height);
                if !obstacles.iter().any(|o| rect.intersects(o)) {
                    placed = Some(candidate);
                    break;
                }
            }
            placed.unwrap_or_else(|| {
                tracing::trace!(id = %label.id, "no clear placement, accepting overlap");
                label.preferred_offset
            })
        };

        obstacles.push(rect_at(label, chosen, width, height));
        result.insert(label.id.clone(), chosen);
    }

    result
}

fn rect_at(label: &LabelDescriptor, offset: Offset, width: f64, height: f64) -> PlacedRect {
    let center = Point::new(label.anchor.x + offset.dx, label.anchor.y + offset.dy);
    PlacedRect::new(center, width, height, label.rotation)
}

/// Candidate ladder for a floating label: the preferred offset, then
/// steps perpendicular to the rotation, then steps along it.
fn candidates(label: &LabelDescriptor) -> SmallVec<[Offset; 17]> {
    let (sin, cos) = label.rotation.to_radians().sin_cos();
    let base = label.preferred_offset;
    let mut out = SmallVec::new();
    out.push(base);
    for m in STEP_MAGNITUDES {
        out.push(Offset::new(base.dx - sin * m, base.dy + cos * m));
    }
    for m in STEP_MAGNITUDES {
        out.push(Offset::new(base.dx + cos * m, base.dy + sin * m));
    }
    out
}
