//! 2D geometry primitives for polyline diagrams.
//!
//! Coordinates follow the drawing surface convention: x grows right,
//! y grows down, angles in degrees unless a function says radians.
//! All functions here are pure; the only mutation anywhere is building
//! the returned values.

use serde::{Deserialize, Serialize};

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance_to(&p2)
}

/// Midpoint of the segment between two points.
pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0)
}

/// Degrees to radians.
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Radians to degrees.
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Normalizes an angle in degrees into `(-180, 180]`.
pub fn normalize_signed_degrees(mut deg: f64) -> f64 {
    while deg <= -180.0 {
        deg += 360.0;
    }
    while deg > 180.0 {
        deg -= 360.0;
    }
    deg
}

/// Signed angle in degrees at vertex `b` formed by `a-b-c`, in
/// `(-180, 180]`, computed as `atan2(cross, dot)` of the vectors `b→a`
/// and `b→c`.
///
/// Degenerate-input policy: returns 0 when `a == b` or `c == b` (a
/// zero-length adjacent segment leaves the angle undefined). Downstream
/// rotation logic depends on this exact sign convention.
pub fn angle_at_vertex(a: Point, b: Point, c: Point) -> f64 {
    let v1x = a.x - b.x;
    let v1y = a.y - b.y;
    let v2x = c.x - b.x;
    let v2y = c.y - b.y;
    if (v1x == 0.0 && v1y == 0.0) || (v2x == 0.0 && v2y == 0.0) {
        return 0.0;
    }
    let cross = v1x * v2y - v1y * v2x;
    let dot = v1x * v2x + v1y * v2y;
    normalize_signed_degrees(cross.atan2(dot).to_degrees())
}

/// Unsigned interior angle in degrees at `vertex` formed by
/// `p1-vertex-p3`, in `[0, 180]`. Returns 0 for a zero-length adjacent
/// segment. This is the value shown to the user; the signed variant
/// [`angle_at_vertex`] drives the rotation engine.
pub fn interior_angle(p1: Point, vertex: Point, p3: Point) -> f64 {
    let v1x = p1.x - vertex.x;
    let v1y = p1.y - vertex.y;
    let v2x = p3.x - vertex.x;
    let v2y = p3.y - vertex.y;

    let mag1 = (v1x * v1x + v1y * v1y).sqrt();
    let mag2 = (v2x * v2x + v2y * v2y).sqrt();
    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    let cos_angle = ((v1x * v2x + v1y * v2y) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Point at `distance` from `origin` in the direction `angle_deg`.
pub fn point_from_angle_distance(origin: Point, angle_deg: f64, distance: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(rad.cos() * distance + origin.x, rad.sin() * distance + origin.y)
}

/// Rigid rotation of every point in `points` about `pivot` by
/// `delta_rad` radians. Each point is rotated with a single matrix
/// multiply, so lengths and internal angles are preserved exactly with
/// no iterative drift.
pub fn rotate_around(pivot: Point, points: &[Point], delta_rad: f64) -> Vec<Point> {
    let cos = delta_rad.cos();
    let sin = delta_rad.sin();
    points
        .iter()
        .map(|p| {
            let dx = p.x - pivot.x;
            let dy = p.y - pivot.y;
            Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
        })
        .collect()
}

/// Direction angle of the segment `p1→p2` in degrees, from `atan2`.
pub fn segment_angle(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x).to_degrees()
}

/// Offset vector perpendicular to the segment `p1→p2`, scaled to
/// `distance`. Returns the zero vector for a zero-length segment.
pub fn perpendicular_offset(p1: Point, p2: Point, distance: f64) -> Point {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return Point::new(0.0, 0.0);
    }
    // Unit direction rotated 90 degrees.
    Point::new(-dy / length * distance, dx / length * distance)
}

/// Position for an angle label, offset from `vertex` along the bisector
/// of the two adjacent segments. Falls back to the perpendicular of the
/// first segment when the segments are exactly opposite. Coordinates are
/// rounded to whole pixels to avoid fractional-pixel rendering artifacts.
pub fn angle_label_position(p1: Point, vertex: Point, p3: Point, offset: f64) -> Point {
    let v1x = p1.x - vertex.x;
    let v1y = p1.y - vertex.y;
    let v2x = p3.x - vertex.x;
    let v2y = p3.y - vertex.y;

    let mag1 = (v1x * v1x + v1y * v1y).sqrt();
    let mag2 = (v2x * v2x + v2y * v2y).sqrt();
    if mag1 == 0.0 || mag2 == 0.0 {
        return Point::new(vertex.x.round(), vertex.y.round());
    }

    let n1x = v1x / mag1;
    let n1y = v1y / mag1;
    let bisector_x = n1x + v2x / mag2;
    let bisector_y = n1y + v2y / mag2;
    let bisector_mag = (bisector_x * bisector_x + bisector_y * bisector_y).sqrt();

    if bisector_mag == 0.0 {
        // Segments are opposite; use the perpendicular instead.
        return Point::new(
            (vertex.x + n1y * offset).round(),
            (vertex.y - n1x * offset).round(),
        );
    }

    Point::new(
        (vertex.x + bisector_x / bisector_mag * offset).round(),
        (vertex.y + bisector_y / bisector_mag * offset).round(),
    )
}

/// Normalizes a label rotation so the text reads right-side up,
/// flipping anything outside `[-90, 90]` by 180 degrees.
pub fn readable_rotation(angle_deg: f64) -> f64 {
    if angle_deg > 90.0 {
        angle_deg - 180.0
    } else if angle_deg < -90.0 {
        angle_deg + 180.0
    } else {
        angle_deg
    }
}

/// Formats a length with a fixed number of decimals.
pub fn format_length(length: f64, decimals: usize) -> String {
    format!("{length:.decimals$}")
}

/// Formats an angle with a fixed number of decimals and a degree sign.
pub fn format_angle(angle: f64, decimals: usize) -> String {
    format!("{angle:.decimals$}\u{b0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(Point::new(0.0, 0.0), Point::new(10.0, 4.0));
        assert_eq!(m, Point::new(5.0, 2.0));
    }

    #[test]
    fn test_angle_at_vertex_right_turn() {
        // Screen coordinates: [(0,0),(100,0),(100,100)] turns -90 at the elbow.
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let c = Point::new(100.0, 100.0);
        assert!((angle_at_vertex(a, b, c) - (-90.0)).abs() < EPS);
        assert!((angle_at_vertex(c, b, a) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_angle_at_vertex_straight() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(50.0, 0.0);
        let c = Point::new(100.0, 0.0);
        assert!((angle_at_vertex(a, b, c).abs() - 180.0).abs() < EPS);
    }

    #[test]
    fn test_angle_at_vertex_degenerate_returns_zero() {
        let p = Point::new(10.0, 10.0);
        assert_eq!(angle_at_vertex(p, p, Point::new(20.0, 20.0)), 0.0);
        assert_eq!(angle_at_vertex(Point::new(0.0, 0.0), p, p), 0.0);
    }

    #[test]
    fn test_interior_angle_unsigned() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let c = Point::new(100.0, 100.0);
        assert!((interior_angle(a, b, c) - 90.0).abs() < EPS);
        assert!((interior_angle(c, b, a) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_point_from_angle_distance() {
        let p = point_from_angle_distance(Point::new(1.0, 2.0), 0.0, 5.0);
        assert!((p.x - 6.0).abs() < EPS);
        assert!((p.y - 2.0).abs() < EPS);

        let p = point_from_angle_distance(Point::new(0.0, 0.0), 90.0, 2.0);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_around_quarter_turn() {
        let rotated = rotate_around(
            Point::new(1.0, 1.0),
            &[Point::new(2.0, 1.0)],
            std::f64::consts::FRAC_PI_2,
        );
        assert!((rotated[0].x - 1.0).abs() < EPS);
        assert!((rotated[0].y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_around_preserves_pairwise_distances() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(-2.0, 5.0),
        ];
        let rotated = rotate_around(Point::new(1.0, -1.0), &pts, 0.7);
        for i in 0..pts.len() {
            for j in 0..pts.len() {
                let before = distance(pts[i], pts[j]);
                let after = distance(rotated[i], rotated[j]);
                assert!((before - after).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_perpendicular_offset() {
        let off = perpendicular_offset(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 4.0);
        assert!((off.x - 0.0).abs() < EPS);
        assert!((off.y - 4.0).abs() < EPS);

        let zero = perpendicular_offset(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 4.0);
        assert_eq!(zero, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_angle_label_position_bisector() {
        let pos = angle_label_position(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            30.0,
        );
        // Bisector of (-1,0) and (0,1) points up-left at 45 degrees.
        assert_eq!(pos, Point::new(79.0, 21.0));
    }

    #[test]
    fn test_readable_rotation_flips_upside_down_text() {
        assert_eq!(readable_rotation(120.0), -60.0);
        assert_eq!(readable_rotation(-135.0), 45.0);
        assert_eq!(readable_rotation(45.0), 45.0);
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_length(12.3456, 2), "12.35");
        assert_eq!(format_angle(90.04, 1), "90.0\u{b0}");
    }
}
