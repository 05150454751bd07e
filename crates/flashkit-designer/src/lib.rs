//! # FlashKit Designer
//!
//! Geometric computation and label-layout engine for dimensioned
//! polyline diagrams (sheet-metal flashing profiles). Everything here
//! is pure and UI-independent: functions take immutable geometry in and
//! hand new geometry back, so the host can render, persist, and
//! undo/redo however it likes.
//!
//! ## Core Components
//!
//! - **Model**: lines, drawings, fold state, pinned label positions,
//!   derived segment/angle summaries
//! - **Catalog**: read-only fold template store loaded from JSON
//! - **Fold**: synthesize fold sub-chains on either endpoint from a
//!   template plus per-segment user edits
//! - **Edit**: interior angle edits (rigid subchain rotation), segment
//!   length edits, segment append
//! - **Tapered**: derived diagrams with frozen angles and editable
//!   segment lengths
//! - **Labels**: deterministic collision-avoiding label placement
//! - **History**: bounded per-drawing undo/redo stacks
//! - **Report**: plain-text dimension summaries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flashkit_designer::{edit, Line};
//! use flashkit_core::geometry::Point;
//!
//! let line = Line::with_points("#1a1a1a", vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 0.0),
//!     Point::new(100.0, 100.0),
//! ]);
//!
//! // Close the elbow to 45 degrees; lengths are preserved.
//! let edited = edit::edit_interior_angle(&line, 0, 45.0)?;
//! ```

pub mod catalog;
pub mod edit;
pub mod fold;
pub mod history;
pub mod labels;
pub mod model;
pub mod report;
pub mod tapered;

pub use catalog::{FoldCatalog, FoldSegmentTemplate, FoldTemplate};
pub use edit::{append_segment, edit_interior_angle, edit_segment_length, rotate_subchain, Side};
pub use fold::next_position_by_angle_length;
pub use history::{HistoryManager, DEFAULT_HISTORY_DEPTH};
pub use labels::{
    line_labels, CharCountMeasure, LabelDescriptor, LabelKind, Offset, TextMeasure, TextSize,
    ANGLE_FONT_SIZE, SEGMENT_FONT_SIZE,
};
pub use model::{
    AngleData, Drawing, DrawingId, DrawingKind, DrawingRegistry, FoldDirection, FoldSegmentEdit,
    FoldState, GeometryInfo, Line, LineEnd, SegmentData, DEFAULT_DRAWING_ID,
};
pub use report::dimension_report;
pub use tapered::{TaperedDiagram, TaperedSegment};
