use std::fmt;
use thiserror::Error;

/// Which part of a chart spec referenced a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    X,
    Y,
    Color,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldRole::X => "x",
            FieldRole::Y => "y",
            FieldRole::Color => "color",
        })
    }
}

/// Configuration and data errors raised by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("metadata declares {names} names but {types} types")]
    MetadataMismatch { names: usize, types: usize },
    #[error("{role} field '{name}' is not present in metadata")]
    UnknownField { role: FieldRole, name: String },
    #[error("row {row} has {found} cells, metadata declares {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}: value of '{field}' is not numeric")]
    NonNumeric { row: usize, field: String },
    #[error("invalid time format pattern '{pattern}'")]
    InvalidTimeFormat { pattern: String },
}

/// Result type alias using the engine's `ConfigError`.
pub type Result<T> = std::result::Result<T, ConfigError>;
