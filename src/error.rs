//! Error types for chord validation, layout and rendering.
//!
//! Every variant carries the offending value(s) so a UI can show the user
//! exactly what was rejected.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChordError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChordError {
    /// A fret, string or mute value lies outside its valid bound.
    #[error("{field} is {value}, out of bounds [{min}-{max}]")]
    Range {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A barre whose string range is empty, reversed or off the instrument.
    #[error("Barre [{fret}, {start}, {end}] is invalid: {reason}")]
    InvalidBarre {
        fret: i32,
        start: i32,
        end: i32,
        reason: String,
    },

    /// Fret span across notes and barres exceeds a hand's reach.
    #[error("Your hands aren't that big: fret span of {span} exceeds {max}")]
    HandSpan { span: u32, max: u32 },

    /// A layout option that is zero, negative or not finite.
    #[error("Layout option '{option}' must be a positive number, got {value}")]
    InvalidLayout { option: &'static str, value: f64 },

    /// A form cell holding something other than the allowed markers.
    #[error("Cell at row {row}, column {column} contains '{value}'; only {allowed} allowed")]
    InvalidCell {
        row: usize,
        column: usize,
        value: String,
        allowed: &'static str,
    },

    /// A form grid whose dimensions disagree with its declared size.
    #[error("Grid shape mismatch: {0}")]
    GridShape(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ChordError {
    fn from(e: serde_json::Error) -> Self {
        ChordError::Json(e.to_string())
    }
}

impl From<std::io::Error> for ChordError {
    fn from(e: std::io::Error) -> Self {
        ChordError::Io(e.to_string())
    }
}

impl ChordError {
    pub(crate) fn range(field: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        ChordError::Range {
            field: field.into(),
            value,
            min,
            max,
        }
    }
}
