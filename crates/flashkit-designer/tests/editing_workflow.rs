//! Integration tests for the editing workflow: drawing a line, editing
//! angles and lengths, and stepping through history.

use flashkit_core::geometry::Point;
use flashkit_designer::{edit, HistoryManager, Line, LineEnd};

fn elbow() -> Line {
    Line::with_points(
        "#1a1a1a",
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ],
    )
}

#[test]
fn test_angle_edit_scenario() {
    // 90 degrees at vertex 1, edited down to 45.
    let line = elbow();
    let edited = edit::edit_interior_angle(&line, 0, 45.0).unwrap();

    assert!((edited.points[2].x - 29.289_321_881_345_254).abs() < 1e-6);
    assert!((edited.points[2].y - 70.710_678_118_654_76).abs() < 1e-6);
    assert!((edited.segment_length(1).unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn test_length_edit_scenario() {
    let line = Line::with_points(
        "#1a1a1a",
        vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 50.0),
        ],
    );
    let edited = edit::edit_segment_length(&line, 0, 80.0).unwrap();

    assert!((edited.points[1].x - 80.0).abs() < 1e-9);
    assert!((edited.points[1].y - 0.0).abs() < 1e-9);
    assert!((edited.points[2].x - 80.0).abs() < 1e-9);
    assert!((edited.points[2].y - 50.0).abs() < 1e-9);
    assert!((edited.angles()[0].angle - 90.0).abs() < 1e-9);
    assert!((edited.segment_length(1).unwrap() - 50.0).abs() < 1e-9);
}

#[test]
fn test_edit_undo_redo_cycle() {
    let mut history: HistoryManager<Line> = HistoryManager::new();
    let drawing = "original";

    let v0 = elbow();
    history.commit(drawing, v0.clone());
    let v1 = edit::edit_interior_angle(&v0, 0, 45.0).unwrap();
    history.commit(drawing, v1.clone());
    let v2 = edit::edit_segment_length(&v1, 0, 120.0).unwrap();

    // Undo back to the very first state.
    let back = history.undo(drawing, v2.clone()).unwrap();
    assert_eq!(back, v1);
    let back = history.undo(drawing, back).unwrap();
    assert_eq!(back, v0);

    // Redo all the way forward again.
    let fwd = history.redo(drawing, back).unwrap();
    assert_eq!(fwd, v1);
    let fwd = history.redo(drawing, fwd).unwrap();
    assert_eq!(fwd, v2);
}

#[test]
fn test_rejected_edit_leaves_state_for_history_untouched() {
    let line = elbow();
    let snapshot = line.clone();
    assert!(edit::edit_interior_angle(&line, 0, 200.0).is_err());
    assert!(edit::edit_segment_length(&line, 7, 10.0).is_err());
    assert_eq!(line, snapshot);
}

#[test]
fn test_grow_line_then_edit_new_angle() {
    let line = Line::with_points(
        "#1a1a1a",
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
    );
    let line = edit::append_segment(&line, LineEnd::End, 60.0, 90.0).unwrap();
    assert_eq!(line.segment_count(), 2);
    assert!((line.angles()[0].angle - 90.0).abs() < 1e-6);

    let edited = edit::edit_interior_angle(&line, 0, 135.0).unwrap();
    assert!((edited.angles()[0].angle - 135.0).abs() < 1e-6);
    assert!((edited.segment_length(1).unwrap() - 60.0).abs() < 1e-6);
}
