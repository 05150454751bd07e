//! Fold synthesis.
//!
//! A fold is a short sub-chain appended to one endpoint of a line. The
//! chain is rebuilt from the *stored* per-segment edits whenever the
//! anchor moves, so user customizations survive later geometry edits.
//! Both endpoints go through the same single routine,
//! [`next_position_by_angle_length`]; the only difference between a
//! start fold and an end fold is which two anchor points feed the first
//! segment.

use crate::catalog::FoldTemplate;
use crate::model::{FoldDirection, FoldSegmentEdit, FoldState, Line, LineEnd};
use flashkit_core::error::EditError;
use flashkit_core::geometry::{point_from_angle_distance, Point};

/// Far end of the horizontal reference ray used to measure the incoming
/// chain direction.
const HORIZONTAL_REF_X: f64 = 100_000.0;

/// Turn angle of the chain `first -> second -> third` at `second`, in
/// degrees, offset by 180 so a straight continuation reads as 180. The
/// offset and the horizontal reference ray are part of the fold angle
/// convention; synthesized positions depend on this exact form.
fn chain_angle(first: Point, second: Point, third: Point) -> f64 {
    let dx0 = second.x - first.x;
    let dy0 = second.y - first.y;
    let dx1 = third.x - second.x;
    let dy1 = third.y - second.y;
    let angle = (dx0 * dy1 - dx1 * dy0).atan2(dx0 * dx1 + dy0 * dy1);
    180.0 + angle.to_degrees()
}

/// Computes the next fold point from the previous two chain points:
/// turn by the signed `new_angle` (degrees) relative to the incoming
/// direction `first → second`, then extend by `new_length`.
pub fn next_position_by_angle_length(
    first: Point,
    second: Point,
    new_length: f64,
    new_angle: f64,
) -> Point {
    let reference = Point::new(HORIZONTAL_REF_X, second.y);
    let mut absolute = 360.0 - (chain_angle(first, second, reference) + new_angle);
    if absolute < 0.0 {
        absolute += 360.0;
    }
    point_from_angle_distance(second, absolute, new_length)
}

/// Builds the fold point chain for one endpoint of `points`.
///
/// Returns `edits.len() + 1` points beginning at the anchor point. For
/// segment 0 the incoming direction is taken from the anchor line
/// (second point → first point for a start fold); every later segment
/// uses the previous two already-computed fold points. A line with
/// fewer than 2 points has no direction to fold against and is rejected
/// as not applicable.
pub fn synthesize(
    points: &[Point],
    end: LineEnd,
    edits: &[FoldSegmentEdit],
    direction: FoldDirection,
) -> Result<Vec<Point>, EditError> {
    if points.len() < 2 {
        return Err(EditError::not_applicable(
            "fold anchor requires at least 2 points",
        ));
    }

    let (anchor, direction_point) = match end {
        LineEnd::Start => (points[0], points[1]),
        LineEnd::End => (points[points.len() - 1], points[points.len() - 2]),
    };

    let mut chain = Vec::with_capacity(edits.len() + 1);
    chain.push(anchor);
    let mut prev = direction_point;
    let mut current = anchor;
    for edit in edits {
        let angle = match direction {
            FoldDirection::Normal => edit.angle,
            FoldDirection::Opposite => -edit.angle,
        };
        let next = next_position_by_angle_length(prev, current, edit.length, angle);
        chain.push(next);
        prev = current;
        current = next;
    }
    Ok(chain)
}

/// Builds the fold point chain from a line's stored fold state.
///
/// This is the recompute entry point: callers invoke it whenever the
/// anchor line's first two (or last two) points move.
pub fn synthesize_from_state(
    line: &Line,
    end: LineEnd,
) -> Result<Vec<Point>, EditError> {
    let state = fold_state(line, end).ok_or_else(|| {
        EditError::not_applicable(match end {
            LineEnd::Start => "line has no start fold",
            LineEnd::End => "line has no end fold",
        })
    })?;
    synthesize(&line.points, end, &state.segment_edits, state.direction)
}

/// Validates segment edits against a template and attaches the fold to
/// the chosen endpoint, returning the new line. The input line is left
/// untouched on rejection.
pub fn apply(
    line: &Line,
    end: LineEnd,
    template: &FoldTemplate,
    segment_edits: Vec<FoldSegmentEdit>,
    direction: FoldDirection,
) -> Result<Line, EditError> {
    if line.points.len() < 2 {
        return Err(EditError::not_applicable(
            "fold anchor requires at least 2 points",
        ));
    }

    let mut template_segments: Vec<_> = template.segments.iter().collect();
    template_segments.sort_by_key(|s| s.sort_order);

    for (i, edit) in segment_edits.iter().enumerate() {
        if !edit.length.is_finite() || edit.length <= 0.0 {
            return Err(EditError::invalid_input(
                format!("segment {i} length"),
                "must be a positive number",
            ));
        }
        if !edit.angle.is_finite() {
            return Err(EditError::invalid_input(
                format!("segment {i} angle"),
                "must be a number",
            ));
        }
        // Edits beyond the template are user-appended extras with no
        // declared bounds.
        let Some(seg_template) = template_segments.get(i) else {
            continue;
        };
        if edit.length < seg_template.min_length || edit.length > seg_template.max_length {
            tracing::debug!(
                segment = i,
                length = edit.length,
                min = seg_template.min_length,
                max = seg_template.max_length,
                "fold segment length outside template bounds"
            );
            return Err(EditError::invalid_input(
                format!("segment {i} length"),
                format!("must be within {}..{}", seg_template.min_length, seg_template.max_length),
            ));
        }
        if !seg_template.is_length_editable && edit.length != seg_template.length {
            return Err(EditError::invalid_input(
                format!("segment {i} length"),
                "not editable for this template",
            ));
        }
        if !seg_template.is_angle_editable && edit.angle != seg_template.angle {
            return Err(EditError::invalid_input(
                format!("segment {i} angle"),
                "not editable for this template",
            ));
        }
    }

    let state = FoldState {
        template_id: template.id.clone(),
        segment_edits,
        direction,
    };
    let mut updated = line.clone();
    match end {
        LineEnd::Start => updated.start_fold = Some(state),
        LineEnd::End => updated.end_fold = Some(state),
    }
    Ok(updated)
}

/// Clears the fold on the chosen endpoint ("no fold"), collapsing the
/// displayed chain to the single anchor point. Returns the new line.
pub fn remove(line: &Line, end: LineEnd) -> Line {
    let mut updated = line.clone();
    match end {
        LineEnd::Start => updated.start_fold = None,
        LineEnd::End => updated.end_fold = None,
    }
    updated
}

fn fold_state(line: &Line, end: LineEnd) -> Option<&FoldState> {
    match end {
        LineEnd::Start => line.start_fold.as_ref(),
        LineEnd::End => line.end_fold.as_ref(),
    }
}
