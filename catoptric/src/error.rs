use thiserror::Error;

use crate::Float;

/// Rejected simulation configuration.
///
/// Geometric degeneracies (parallel lines, missed mirrors, collinear curvature points)
/// are never reported through this type, they are ordinary `None` outcomes.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("epsilon must be finite and strictly positive, got {0}")]
    InvalidEpsilon(Float),

    #[error("scene bounds must be finite with min <= max, got ({min_x}, {min_y}) .. ({max_x}, {max_y})")]
    InvalidBounds {
        min_x: Float,
        min_y: Float,
        max_x: Float,
        max_y: Float,
    },

    #[error("minimum travel distance must be finite and non-negative, got {0}")]
    InvalidMinTravel(Float),
}
