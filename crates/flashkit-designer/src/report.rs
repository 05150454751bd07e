//! Plain-text dimension report.
//!
//! Produces the fabrication summary the CLI prints: per-line segment
//! lengths, interior angles, synthesized fold chains, and totals.

use crate::fold;
use crate::model::{Drawing, Line, LineEnd};
use flashkit_core::geometry::format_angle;
use flashkit_core::units::{format_length, MeasurementSystem};
use std::fmt::Write;

/// Renders a dimension report for every visible line of the drawing.
pub fn dimension_report(
    drawing: &Drawing,
    system: MeasurementSystem,
    decimals: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Drawing: {} ({:?})", drawing.name, drawing.kind);

    for (n, line) in drawing.lines.iter().enumerate() {
        let info = line.geometry_info();
        let _ = writeln!(
            out,
            "\nLine {} — {} segments, total {}",
            n + 1,
            info.segment_count,
            format_length(info.total_length, system, decimals)
        );
        for segment in &info.segments {
            let _ = writeln!(
                out,
                "  segment {}: {}",
                segment.index + 1,
                format_length(segment.length, system, decimals)
            );
        }
        for angle in &info.angles {
            let _ = writeln!(
                out,
                "  angle at vertex {}: {}",
                angle.index + 2,
                format_angle(angle.angle, decimals)
            );
        }
        write_fold(&mut out, line, LineEnd::Start, system, decimals);
        write_fold(&mut out, line, LineEnd::End, system, decimals);
    }
    out
}

fn write_fold(
    out: &mut String,
    line: &Line,
    end: LineEnd,
    system: MeasurementSystem,
    decimals: usize,
) {
    let Ok(chain) = fold::synthesize_from_state(line, end) else {
        return;
    };
    let label = match end {
        LineEnd::Start => "start fold",
        LineEnd::End => "end fold",
    };
    let total: f64 = chain.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    let _ = writeln!(
        out,
        "  {label}: {} segments, {}",
        chain.len() - 1,
        format_length(total, system, decimals)
    );
}
