use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::error::{Result, SwingsetError};
use crate::math::direction;

/// Thickness radius of capsule limbs.
pub const CAPSULE_RADIUS: f32 = 3.0;

/// Inclusive limits on a joint's relative angle, in degrees.
///
/// Serialized as a two-element `[min, max]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct AngleLimits {
    pub min: f32,
    pub max: f32,
}

impl AngleLimits {
    /// No restriction.
    pub const FREE: Self = Self {
        min: -180.0,
        max: 180.0,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SwingsetError::NonFinite("angle_constraints"));
        }
        if self.min > self.max {
            return Err(SwingsetError::InvalidAngleConstraints {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, angle_degrees: f32) -> bool {
        (self.min..=self.max).contains(&angle_degrees)
    }

    pub fn to_radians(&self) -> (f32, f32) {
        (self.min.to_radians(), self.max.to_radians())
    }
}

impl Default for AngleLimits {
    fn default() -> Self {
        Self::FREE
    }
}

impl From<(f32, f32)> for AngleLimits {
    fn from((min, max): (f32, f32)) -> Self {
        Self { min, max }
    }
}

impl From<AngleLimits> for (f32, f32) {
    fn from(limits: AngleLimits) -> Self {
        (limits.min, limits.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentShape {
    /// Rod from the body origin along the start angle, `extent` long.
    Capsule,
    /// Disc of radius `extent` centred on the body origin.
    Disc,
    /// Disc of radius `extent` whose centre sits one radius along the start
    /// angle, so the body origin lies on its rim.
    OffsetDisc,
}

/// Physical description of one segment. Fixed once the segment is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub shape: SegmentShape,
    /// Length for capsules, radius for discs.
    pub extent: f32,
    pub mass: f32,
    /// Degrees from straight down.
    pub start_angle: f32,
    pub angle_constraints: AngleLimits,
    pub collision_group: u32,
}

impl SegmentConfig {
    pub fn new(shape: SegmentShape, extent: f32, mass: f32) -> Self {
        Self {
            shape,
            extent,
            mass,
            start_angle: 0.0,
            angle_constraints: AngleLimits::FREE,
            collision_group: 0,
        }
    }

    pub fn capsule(length: f32, mass: f32) -> Self {
        Self::new(SegmentShape::Capsule, length, mass)
    }

    pub fn disc(radius: f32, mass: f32) -> Self {
        Self::new(SegmentShape::Disc, radius, mass)
    }

    pub fn offset_disc(radius: f32, mass: f32) -> Self {
        Self::new(SegmentShape::OffsetDisc, radius, mass)
    }

    #[must_use]
    pub fn with_start_angle(mut self, start_angle: f32) -> Self {
        self.start_angle = start_angle;
        self
    }

    #[must_use]
    pub fn with_angle_constraints(mut self, angle_constraints: AngleLimits) -> Self {
        self.angle_constraints = angle_constraints;
        self
    }

    #[must_use]
    pub fn with_collision_group(mut self, collision_group: u32) -> Self {
        self.collision_group = collision_group;
        self
    }

    pub fn length_or_radius(&self) -> f32 {
        self.extent
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SwingsetError::InvalidMass(self.mass));
        }
        if !self.extent.is_finite() || self.extent <= 0.0 {
            return Err(SwingsetError::InvalidExtent(self.extent));
        }
        if !self.start_angle.is_finite() {
            return Err(SwingsetError::NonFinite("start_angle"));
        }
        self.angle_constraints.validate()
    }

    /// Moment of inertia about the body origin.
    pub fn moment(&self) -> f32 {
        match self.shape {
            SegmentShape::Capsule => self.extent / 12.0,
            SegmentShape::Disc | SegmentShape::OffsetDisc => PI / 4.0 * self.extent.powi(4),
        }
    }

    /// Body-local vector from the origin to the far end, before any rotation
    /// the body picks up in simulation.
    pub fn reach(&self) -> Vec2 {
        direction(self.start_angle) * self.extent
    }
}
