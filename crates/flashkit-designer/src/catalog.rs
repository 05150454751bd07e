//! Fold template catalog.
//!
//! Templates describe reusable end-fold profiles (hems, drip edges,
//! kick-outs) as an ordered list of (angle, length) segments with
//! per-segment editability flags and length bounds. The catalog is
//! loaded once from structured JSON and never written by this engine.
//! The JSON keys are PascalCase to stay compatible with the catalog
//! files the fabrication tooling already ships.

use crate::model::FoldSegmentEdit;
use flashkit_core::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

/// One segment of a fold template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FoldSegmentTemplate {
    /// Signed turn angle in degrees relative to the incoming direction.
    pub angle: f64,
    /// Default segment length.
    pub length: f64,
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_supported: bool,
    #[serde(default = "default_true")]
    pub is_length_editable: bool,
    #[serde(default = "default_true")]
    pub is_angle_editable: bool,
    pub min_length: f64,
    pub max_length: f64,
}

/// A reusable fold profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FoldTemplate {
    pub id: String,
    pub name: String,
    /// Display label; falls back to `name` when empty.
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub folds_count: usize,
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub segments: Vec<FoldSegmentTemplate>,
}

impl FoldTemplate {
    /// Label to show in pickers.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Default per-segment edits for a freshly selected template, in
    /// segment sort order.
    pub fn default_edits(&self) -> Vec<FoldSegmentEdit> {
        let mut segments: Vec<&FoldSegmentTemplate> = self.segments.iter().collect();
        segments.sort_by_key(|s| s.sort_order);
        segments
            .iter()
            .map(|s| FoldSegmentEdit {
                length: s.length,
                angle: s.angle,
            })
            .collect()
    }
}

/// Read-only store of fold templates, ordered by `sort_order`.
#[derive(Debug, Clone, Default)]
pub struct FoldCatalog {
    templates: Vec<FoldTemplate>,
}

impl FoldCatalog {
    /// Builds a catalog from already-deserialized templates.
    pub fn new(mut templates: Vec<FoldTemplate>) -> Result<Self, CatalogError> {
        for template in &templates {
            if template.segments.is_empty() {
                return Err(CatalogError::InvalidTemplate {
                    id: template.id.clone(),
                    reason: "template has no segments".to_string(),
                });
            }
            for segment in &template.segments {
                if segment.min_length > segment.max_length {
                    return Err(CatalogError::InvalidTemplate {
                        id: template.id.clone(),
                        reason: format!(
                            "segment bounds inverted ({} > {})",
                            segment.min_length, segment.max_length
                        ),
                    });
                }
            }
            if template.folds_count != 0 && template.folds_count != template.segments.len() {
                tracing::warn!(
                    id = %template.id,
                    declared = template.folds_count,
                    actual = template.segments.len(),
                    "fold template segment count mismatch"
                );
            }
        }
        templates.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
        Ok(Self { templates })
    }

    /// Parses a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let templates: Vec<FoldTemplate> = serde_json::from_str(json)?;
        tracing::debug!(count = templates.len(), "loaded fold templates");
        Self::new(templates)
    }

    /// Loads a catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// All templates in display order.
    pub fn templates(&self) -> &[FoldTemplate] {
        &self.templates
    }

    /// Active templates only, in display order.
    pub fn active(&self) -> impl Iterator<Item = &FoldTemplate> {
        self.templates.iter().filter(|t| t.is_active)
    }

    /// Looks a template up by id.
    pub fn get(&self, id: &str) -> Result<&FoldTemplate, CatalogError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::UnknownTemplate { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {
            "Id": "drip-edge",
            "Name": "Drip Edge",
            "Label": "Drip edge",
            "FoldsCount": 2,
            "SortOrder": 2,
            "IsActive": true,
            "Segments": [
                { "Angle": -90.0, "Length": 25.0, "SortOrder": 0, "MinLength": 10.0, "MaxLength": 60.0 },
                { "Angle": -45.0, "Length": 10.0, "SortOrder": 1, "MinLength": 5.0, "MaxLength": 20.0, "IsAngleEditable": false }
            ]
        },
        {
            "Id": "hem-15",
            "Name": "Safety Hem",
            "SortOrder": 1,
            "Segments": [
                { "Angle": 170.0, "Length": 15.0, "SortOrder": 0, "MinLength": 8.0, "MaxLength": 25.0 }
            ]
        }
    ]"#;

    #[test]
    fn test_catalog_parses_and_sorts() {
        let catalog = FoldCatalog::from_json(CATALOG_JSON).unwrap();
        let ids: Vec<&str> = catalog.templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["hem-15", "drip-edge"]);
    }

    #[test]
    fn test_defaults_and_display_label() {
        let catalog = FoldCatalog::from_json(CATALOG_JSON).unwrap();
        let hem = catalog.get("hem-15").unwrap();
        assert!(hem.is_active);
        assert_eq!(hem.display_label(), "Safety Hem");
        assert!(hem.segments[0].is_length_editable);

        let drip = catalog.get("drip-edge").unwrap();
        assert_eq!(drip.display_label(), "Drip edge");
        assert!(!drip.segments[1].is_angle_editable);
    }

    #[test]
    fn test_default_edits_follow_segment_order() {
        let catalog = FoldCatalog::from_json(CATALOG_JSON).unwrap();
        let edits = catalog.get("drip-edge").unwrap().default_edits();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].length, 25.0);
        assert_eq!(edits[1].angle, -45.0);
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let catalog = FoldCatalog::from_json(CATALOG_JSON).unwrap();
        assert!(matches!(
            catalog.get("no-such"),
            Err(CatalogError::UnknownTemplate { .. })
        ));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let json = r#"[{
            "Id": "bad", "Name": "Bad", "SortOrder": 0,
            "Segments": [
                { "Angle": 0.0, "Length": 5.0, "SortOrder": 0, "MinLength": 9.0, "MaxLength": 1.0 }
            ]
        }]"#;
        assert!(matches!(
            FoldCatalog::from_json(json),
            Err(CatalogError::InvalidTemplate { .. })
        ));
    }
}
