//! Error handling for FlashKit
//!
//! Provides the error types shared by the geometry editors and the fold
//! template catalog. Every editor failure is a local, recoverable
//! rejection: the caller keeps its current state and the operation is a
//! no-op. There is no fatal error class in this engine.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Editor error type
///
/// Returned by the fold synthesizer, the subchain rotation engine, the
/// segment length editor, and the tapered diagram generator when an edit
/// cannot be applied. A rejected edit never mutates state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// Structural precondition not met; the operation does not apply to
    /// this geometry (e.g. fewer than 2 points for a fold, fewer than 3
    /// for an angle edit, nothing to rotate past the pivot).
    #[error("Not applicable: {reason}")]
    NotApplicable {
        /// Why the operation does not apply.
        reason: String,
    },

    /// A numeric input was rejected (non-finite, out of range, wrong
    /// sign). The caller should redisplay the last valid value.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A vertex or segment index fell outside the polyline.
    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of points or segments available.
        len: usize,
    },
}

impl EditError {
    /// Shorthand for a `NotApplicable` rejection.
    pub fn not_applicable(reason: impl Into<String>) -> Self {
        Self::NotApplicable {
            reason: reason.into(),
        }
    }

    /// Shorthand for an `InvalidInput` rejection.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Fold template catalog error type
///
/// Represents failures while loading or querying the read-only fold
/// template catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog JSON could not be parsed.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// No template with the requested id exists.
    #[error("Unknown fold template '{id}'")]
    UnknownTemplate {
        /// The requested template id.
        id: String,
    },

    /// A template record is internally inconsistent.
    #[error("Invalid template '{id}': {reason}")]
    InvalidTemplate {
        /// The offending template id.
        id: String,
        /// Why the template is invalid.
        reason: String,
    },
}

/// Result alias for editor operations.
pub type Result<T, E = EditError> = std::result::Result<T, E>;
