use glam::Vec2;

use super::arena::Index;
use super::body::BodyHandle;

/// Handle to a constraint registered in a [`SimulationWorld`](super::SimulationWorld).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintHandle(pub(crate) Index);

/// A constraint between two bodies.
///
/// Anchors are body-local so the constraint follows the bodies as they move
/// and turn. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Keeps the two anchors `distance` apart; rotation is free.
    Pin {
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Vec2,
        anchor_b: Vec2,
        distance: f32,
    },
    /// Clamps `angle_b - angle_a` to `[min, max]`.
    RotaryLimit {
        body_a: BodyHandle,
        body_b: BodyHandle,
        min: f32,
        max: f32,
    },
    /// Drives `angular_velocity_b - angular_velocity_a` towards `rate`.
    Motor {
        body_a: BodyHandle,
        body_b: BodyHandle,
        rate: f32,
        max_torque: f32,
    },
}

impl Constraint {
    pub fn bodies(&self) -> (BodyHandle, BodyHandle) {
        match *self {
            Constraint::Pin { body_a, body_b, .. }
            | Constraint::RotaryLimit { body_a, body_b, .. }
            | Constraint::Motor { body_a, body_b, .. } => (body_a, body_b),
        }
    }

    pub fn involves(&self, body: BodyHandle) -> bool {
        let (a, b) = self.bodies();
        a == body || b == body
    }
}
