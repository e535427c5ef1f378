use glam::Vec2;

use super::arena::Index;
use crate::math::Transform;

/// Handle to a body registered in a [`SimulationWorld`](super::SimulationWorld).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) Index);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    /// Infinite mass; never integrated and ignores forces.
    Static,
}

/// A rigid body in the plane.
///
/// Forces accumulate between steps and are consumed by the world's
/// integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    pub mass: f32,
    pub moment: f32,
    pub position: Vec2,
    /// Rotation in radians.
    pub angle: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub(crate) force: Vec2,
    pub(crate) torque: f32,
}

impl Body {
    /// Dynamic body with the given mass and moment of inertia. Both are
    /// expected to be positive; callers validate before building.
    pub fn new(mass: f32, moment: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            mass,
            moment,
            position: Vec2::ZERO,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
        }
    }

    pub fn new_static() -> Self {
        Self {
            kind: BodyKind::Static,
            mass: f32::INFINITY,
            moment: f32::INFINITY,
            ..Self::new(1.0, 1.0)
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    pub fn inv_mass(&self) -> f32 {
        if self.is_static() || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    pub fn inv_moment(&self) -> f32 {
        if self.is_static() || self.moment <= 0.0 {
            0.0
        } else {
            1.0 / self.moment
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.angle)
    }

    pub fn local_to_world(&self, point: Vec2) -> Vec2 {
        self.transform().transform_point(point)
    }

    pub fn world_to_local(&self, point: Vec2) -> Vec2 {
        self.transform().inverse_transform_point(point)
    }

    /// Velocity of the material point currently at `point`.
    pub fn velocity_at_world_point(&self, point: Vec2) -> Vec2 {
        let r = point - self.position;
        self.velocity + r.perp() * self.angular_velocity
    }

    /// Force accumulated since the last integration step.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn torque(&self) -> f32 {
        self.torque
    }

    /// Accumulates `force` applied at world `point`; off-centre points also
    /// add torque. Static bodies ignore it.
    pub fn apply_force_at_point(&mut self, force: Vec2, point: Vec2) {
        if self.is_static() {
            return;
        }
        self.force += force;
        self.torque += (point - self.position).perp_dot(force);
    }

    pub fn kinetic_energy(&self) -> f32 {
        if self.is_static() {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.length_squared()
            + 0.5 * self.moment * self.angular_velocity * self.angular_velocity
    }

    pub(crate) fn integrate_velocity(&mut self, gravity: Vec2, dt: f32) {
        if self.is_static() {
            return;
        }
        self.velocity += (gravity + self.force * self.inv_mass()) * dt;
        self.angular_velocity += self.torque * self.inv_moment() * dt;
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    pub(crate) fn integrate_position(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
    }
}
