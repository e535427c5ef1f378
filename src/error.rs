//! Error types for building and driving rigs.

use thiserror::Error;

use crate::world::{BodyHandle, ShapeHandle};

/// Errors that can occur while building, updating or configuring rigs.
#[derive(Debug, Error)]
pub enum SwingsetError {
    /// Mass must be strictly positive.
    #[error("invalid mass {0}: must be positive")]
    InvalidMass(f32),

    /// Length or radius must be strictly positive.
    #[error("invalid extent {0}: length or radius must be positive")]
    InvalidExtent(f32),

    /// Angle limits are out of order.
    #[error("invalid angle constraints: min {min} is greater than max {max}")]
    InvalidAngleConstraints {
        /// Lower limit in degrees.
        min: f32,
        /// Upper limit in degrees.
        max: f32,
    },

    /// A swing needs at least its anchor link.
    #[error("a swing needs at least one link, got {0}")]
    NoLinks(u32),

    /// A value that must be finite was NaN or infinite.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    /// The body is not (or no longer) registered in the world.
    #[error("body {0:?} is not present in the world")]
    MissingBody(BodyHandle),

    /// The shape is not (or no longer) registered in the world.
    #[error("shape {0:?} is not present in the world")]
    MissingShape(ShapeHandle),

    /// Reading a configuration file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SwingsetError {
    /// Whether this error comes from bad configuration values rather than
    /// from the world or from I/O.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidMass(_)
                | Self::InvalidExtent(_)
                | Self::InvalidAngleConstraints { .. }
                | Self::NoLinks(_)
                | Self::NonFinite(_)
                | Self::Json(_)
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SwingsetError>;
