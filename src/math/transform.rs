use glam::Vec2;

use super::geometry::rotate;

/// Rigid 2D placement of a body: where its origin sits and how far it has turned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Rotation in radians, same sense as [`rotate`](super::rotate).
    pub angle: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        angle: 0.0,
    };

    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn new(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }

    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        rotate(point, self.angle) + self.position
    }

    pub fn transform_direction(&self, direction: Vec2) -> Vec2 {
        rotate(direction, self.angle)
    }

    pub fn inverse_transform_point(&self, point: Vec2) -> Vec2 {
        rotate(point - self.position, -self.angle)
    }
}
