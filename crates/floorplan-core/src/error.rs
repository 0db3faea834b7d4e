//! Errors shared by the textual inputs of the editing API.

use thiserror::Error;

/// Failure to parse one of the core's keyword enums from host input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown shape type: {0}")]
    ShapeType(String),
    #[error("Unknown direction: {0}")]
    Direction(String),
    #[error("Unknown anchor: {0}")]
    Anchor(String),
}
