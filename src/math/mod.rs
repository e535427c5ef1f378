//! Math utilities module
//!
//! Provides convenient re-exports from glam plus the 2D helpers every placement
//! computation goes through.

mod geometry;
mod transform;

pub use geometry::{direction, rotate, REFERENCE_AXIS};
pub use transform::Transform;

// Re-export commonly used glam types
pub use glam::Vec2;
