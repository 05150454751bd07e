//! End-to-end check of the CLI's loading path: drawing JSON from disk,
//! shipped fold catalog, dimension report.

use flashkit::{dimension_report, Drawing, FoldCatalog, MeasurementSystem};
use std::io::Write;

const DRAWING_JSON: &str = r##"{
    "id": "original",
    "name": "Step flashing",
    "kind": "original",
    "visible": true,
    "locked": false,
    "lines": [
        {
            "id": "a3a2f3a0-8a45-4cf6-b09e-3c8f4c21a501",
            "color": "#1a1a1a",
            "points": [
                { "x": 0.0, "y": 0.0 },
                { "x": 150.0, "y": 0.0 },
                { "x": 150.0, "y": 100.0 }
            ],
            "end_fold": {
                "template_id": "open-hem",
                "segment_edits": [ { "length": 15.0, "angle": 170.0 } ],
                "direction": "normal"
            }
        }
    ]
}"##;

#[test]
fn test_drawing_file_to_report() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DRAWING_JSON.as_bytes()).unwrap();

    let json = std::fs::read_to_string(file.path()).unwrap();
    let drawing: Drawing = serde_json::from_str(&json).unwrap();

    let report = dimension_report(&drawing, MeasurementSystem::Metric, 1);
    assert!(report.contains("Drawing: Step flashing"));
    assert!(report.contains("total 250.0 mm"));
    assert!(report.contains("end fold: 1 segments, 15.0 mm"));
}

#[test]
fn test_shipped_catalog_loads_and_resolves_references() {
    let catalog = FoldCatalog::from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/data/folds.json"
    ))
    .unwrap();
    assert!(catalog.templates().len() >= 5);

    let drawing: Drawing = serde_json::from_str(DRAWING_JSON).unwrap();
    for line in &drawing.lines {
        for fold in [&line.start_fold, &line.end_fold].into_iter().flatten() {
            catalog.get(&fold.template_id).unwrap();
        }
    }

    // Inactive templates stay out of the picker list.
    assert!(catalog.active().all(|t| t.id != "double-break"));
    assert!(catalog.get("double-break").is_ok());
}
