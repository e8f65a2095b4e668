//! Geometry errors

use thiserror::Error;

/// Errors raised while building overlay geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A geometry input was non-finite or outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl GeometryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;
