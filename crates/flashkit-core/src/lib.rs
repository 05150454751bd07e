//! # FlashKit Core
//!
//! Core types and utilities for FlashKit: 2D geometry primitives for
//! polyline diagrams, measurement units, and the shared error taxonomy.
//!
//! Everything in this crate is pure and synchronous. The geometry
//! functions are total except where a degenerate-input policy is
//! documented on the function itself.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{CatalogError, EditError, Result};
pub use geometry::{
    angle_at_vertex, angle_label_position, deg_to_rad, distance, interior_angle, midpoint,
    normalize_signed_degrees, perpendicular_offset, point_from_angle_distance, rad_to_deg,
    rotate_around, segment_angle, Point,
};
pub use units::MeasurementSystem;
