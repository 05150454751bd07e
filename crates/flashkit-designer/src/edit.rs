//! Interactive geometry edits on a line.
//!
//! Every operation here is a pure transform: it takes a line, validates
//! the request, and returns a new line, leaving the input untouched so
//! callers can push the old value onto the undo history. The interior
//! angle edit is built on a single rigid sub-chain rotation about the
//! edited vertex, which keeps all segment lengths and all other angles
//! exactly as they were.

use crate::fold::next_position_by_angle_length;
use crate::model::{Line, LineEnd};
use flashkit_core::error::EditError;
use flashkit_core::geometry::{
    angle_at_vertex, deg_to_rad, point_from_angle_distance, rotate_around, segment_angle, Point,
};

/// Which side of a vertex a sub-chain rotation moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Points before the vertex (indices `0..vertex`).
    Before,
    /// Points after the vertex (indices `vertex + 1..`).
    After,
}

/// Rigidly rotates the points on one side of `vertex_index` about that
/// vertex by `delta_deg` degrees. The vertex itself and the other side
/// never move.
pub fn rotate_subchain(
    points: &[Point],
    vertex_index: usize,
    side: Side,
    delta_deg: f64,
) -> Result<Vec<Point>, EditError> {
    let Some(&pivot) = points.get(vertex_index) else {
        return Err(EditError::IndexOutOfRange {
            index: vertex_index,
            len: points.len(),
        });
    };
    let delta_rad = deg_to_rad(delta_deg);
    let mut out = points.to_vec();
    match side {
        Side::Before => {
            let rotated = rotate_around(pivot, &points[..vertex_index], delta_rad);
            out[..vertex_index].copy_from_slice(&rotated);
        }
        Side::After => {
            let rotated = rotate_around(pivot, &points[vertex_index + 1..], delta_rad);
            out[vertex_index + 1..].copy_from_slice(&rotated);
        }
    }
    Ok(out)
}

/// Sets the interior angle at interior vertex `angle_index` (vertex
/// `angle_index + 1` of the polyline) to `requested_deg` degrees by
/// rotating everything downstream of the vertex.
///
/// The requested value is the unsigned angle the user reads off the
/// label, strictly inside `(0, 180)`. The turn keeps its current
/// orientation: the rotation delta is computed against the signed
/// current angle with the requested magnitude mapped onto the same
/// sign, so editing a right angle never flips the elbow to the other
/// side.
pub fn edit_interior_angle(
    line: &Line,
    angle_index: usize,
    requested_deg: f64,
) -> Result<Line, EditError> {
    if !requested_deg.is_finite() || requested_deg <= 0.0 || requested_deg >= 180.0 {
        return Err(EditError::invalid_input(
            "angle",
            "must be strictly between 0 and 180 degrees",
        ));
    }
    let vertex_index = angle_index + 1;
    if vertex_index + 1 >= line.points.len() {
        return Err(EditError::IndexOutOfRange {
            index: angle_index,
            len: line.points.len().saturating_sub(2),
        });
    }

    let prev = line.points[vertex_index - 1];
    let vertex = line.points[vertex_index];
    let next = line.points[vertex_index + 1];
    let current = angle_at_vertex(prev, vertex, next);
    if current == 0.0 {
        return Err(EditError::not_applicable(
            "angle is undefined next to a zero-length segment",
        ));
    }

    let delta = requested_deg.copysign(current) - current;
    let mut updated = line.clone();
    updated.points = rotate_subchain(&line.points, vertex_index, Side::After, delta)?;
    tracing::debug!(
        vertex = vertex_index,
        current,
        requested = requested_deg,
        delta,
        "edited interior angle"
    );
    Ok(updated)
}

/// Sets the length of segment `segment_index` to `new_length`, keeping
/// its direction and translating every downstream point by the endpoint
/// displacement so the rest of the shape rides along unchanged.
pub fn edit_segment_length(
    line: &Line,
    segment_index: usize,
    new_length: f64,
) -> Result<Line, EditError> {
    if !new_length.is_finite() || new_length <= 0.0 {
        return Err(EditError::invalid_input(
            "length",
            "must be a positive number",
        ));
    }
    if segment_index + 1 >= line.points.len() {
        return Err(EditError::IndexOutOfRange {
            index: segment_index,
            len: line.segment_count(),
        });
    }

    let start = line.points[segment_index];
    let end = line.points[segment_index + 1];
    if start.distance_to(&end) == 0.0 {
        return Err(EditError::not_applicable(
            "zero-length segment has no direction to scale along",
        ));
    }

    let direction = segment_angle(start, end);
    let new_end = point_from_angle_distance(start, direction, new_length);
    let dx = new_end.x - end.x;
    let dy = new_end.y - end.y;

    let mut updated = line.clone();
    for p in &mut updated.points[segment_index + 1..] {
        p.x += dx;
        p.y += dy;
    }
    tracing::debug!(
        segment = segment_index,
        new_length,
        "edited segment length"
    );
    Ok(updated)
}

/// Extends the line at `end` with a new segment of `length`, turned by
/// the signed `turn_deg` relative to the outgoing direction of that
/// endpoint. Uses the same positioning routine as fold synthesis so the
/// turn convention is identical everywhere.
pub fn append_segment(
    line: &Line,
    end: LineEnd,
    length: f64,
    turn_deg: f64,
) -> Result<Line, EditError> {
    if !length.is_finite() || length <= 0.0 {
        return Err(EditError::invalid_input(
            "length",
            "must be a positive number",
        ));
    }
    if !turn_deg.is_finite() {
        return Err(EditError::invalid_input("angle", "must be a number"));
    }
    let n = line.points.len();
    if n < 2 {
        return Err(EditError::not_applicable(
            "appending a segment requires an existing segment to turn from",
        ));
    }

    let (prev, anchor) = match end {
        LineEnd::Start => (line.points[1], line.points[0]),
        LineEnd::End => (line.points[n - 2], line.points[n - 1]),
    };
    let next = next_position_by_angle_length(prev, anchor, length, turn_deg);
    let mut updated = line.clone();
    match end {
        LineEnd::Start => updated.points.insert(0, next),
        LineEnd::End => updated.points.push(next),
    }
    Ok(updated)
}
