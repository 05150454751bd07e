//! Tapered diagram generation.
//!
//! A tapered diagram is derived once from a source line and then lives
//! on its own: each segment's length is independently editable, but the
//! turn angle at every vertex is frozen at creation time. Rebuilding
//! always walks the chain from point 0 with the stored angles, so no
//! number of length edits can ever perturb an angle.

use crate::model::Line;
use chrono::{DateTime, Utc};
use flashkit_core::error::EditError;
use flashkit_core::geometry::Point;
use uuid::Uuid;

use std::f64::consts::TAU;

/// One segment of a tapered diagram. `angle` is in radians: the
/// absolute direction for segment 0, the turn from the previous segment
/// (normalized into `[0, 2π)`) for every later segment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TaperedSegment {
    pub original_length: f64,
    pub tapered_length: f64,
    pub angle: f64,
    pub start_point: Point,
    pub end_point: Point,
}

/// A polyline derived from a source line with frozen angles and
/// editable per-segment lengths.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TaperedDiagram {
    pub id: Uuid,
    /// Line this diagram was generated from. Provenance only: edits to
    /// the source never propagate here.
    pub original_line_id: Uuid,
    pub segments: Vec<TaperedSegment>,
    pub points: Vec<Point>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl TaperedDiagram {
    /// Captures a tapered diagram from a source line's current points.
    pub fn from_line(line: &Line) -> Result<Self, EditError> {
        if line.points.len() < 2 {
            return Err(EditError::not_applicable(
                "a tapered diagram needs at least one segment",
            ));
        }

        let mut segments = Vec::with_capacity(line.points.len() - 1);
        let mut previous_direction = 0.0;
        for i in 0..line.points.len() - 1 {
            let start = line.points[i];
            let end = line.points[i + 1];
            let direction = (end.y - start.y).atan2(end.x - start.x);
            let angle = if i == 0 {
                direction
            } else {
                (direction - previous_direction).rem_euclid(TAU)
            };
            previous_direction = direction;
            let length = start.distance_to(&end);
            segments.push(TaperedSegment {
                original_length: length,
                tapered_length: length,
                angle,
                start_point: start,
                end_point: end,
            });
        }

        let now = Utc::now();
        let mut diagram = Self {
            id: Uuid::new_v4(),
            original_line_id: line.id,
            segments,
            points: Vec::new(),
            created_at: now,
            modified_at: now,
        };
        diagram.rebuild(line.points[0]);
        tracing::debug!(
            id = %diagram.id,
            source = %line.id,
            segments = diagram.segments.len(),
            "created tapered diagram"
        );
        Ok(diagram)
    }

    /// Sets the tapered length of segment `index` and rebuilds every
    /// point downstream of point 0 from the frozen angles. Returns the
    /// new diagram; the input is untouched on rejection.
    pub fn update_segment_length(
        &self,
        index: usize,
        new_length: f64,
    ) -> Result<Self, EditError> {
        if !new_length.is_finite() || new_length <= 0.0 {
            return Err(EditError::invalid_input(
                "length",
                "must be a positive number",
            ));
        }
        if index >= self.segments.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.segments.len(),
            });
        }

        let mut updated = self.clone();
        updated.segments[index].tapered_length = new_length;
        let origin = self.points[0];
        updated.rebuild(origin);
        updated.modified_at = Utc::now();
        Ok(updated)
    }

    /// Current turn angles, for display next to each vertex.
    pub fn angles(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.angle).collect()
    }

    /// Walks the chain from `origin`, accumulating the stored turn
    /// angles and extending by each segment's tapered length.
    fn rebuild(&mut self, origin: Point) {
        self.points.clear();
        self.points.push(origin);
        let mut current = origin;
        let mut current_angle = 0.0;
        for (i, segment) in self.segments.iter_mut().enumerate() {
            if i == 0 {
                current_angle = segment.angle;
            } else {
                current_angle += segment.angle;
            }
            let next = Point::new(
                current.x + segment.tapered_length * current_angle.cos(),
                current.y + segment.tapered_length * current_angle.sin(),
            );
            segment.start_point = current;
            segment.end_point = next;
            self.points.push(next);
            current = next;
        }
    }
}
