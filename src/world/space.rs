use glam::Vec2;

use super::arena::{Arena, Index};
use super::body::{Body, BodyHandle};
use super::constraint::{Constraint, ConstraintHandle};
use super::shape::{Shape, ShapeHandle};
use super::SimulationWorld;

const EPSILON: f32 = 1e-6;

/// Minimal 2D rigid-body world.
///
/// Semi-implicit Euler integration followed by a position-based pass over
/// pin and rotary-limit constraints, then a velocity pass for motors. There is
/// no contact handling; shapes are only stored for their area and filter.
#[derive(Clone)]
pub struct Space {
    bodies: Arena<Body>,
    shapes: Arena<Shape>,
    constraints: Arena<Constraint>,
    gravity: Vec2,
    /// Constraint relaxation passes per step.
    pub iterations: u32,
    pending_forces: usize,
    steps: u64,
}

impl Default for Space {
    fn default() -> Self {
        Self::new()
    }
}

impl Space {
    pub fn new() -> Self {
        Self {
            bodies: Arena::new(),
            shapes: Arena::new(),
            constraints: Arena::new(),
            gravity: Vec2::ZERO,
            iterations: 10,
            pending_forces: 0,
            steps: 0,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Force applications queued since the last step.
    pub fn pending_forces(&self) -> usize {
        self.pending_forces
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter().map(|(i, b)| (BodyHandle(i), b))
    }

    pub fn shapes(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.shapes.iter().map(|(i, s)| (ShapeHandle(i), s))
    }

    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintHandle, &Constraint)> {
        self.constraints.iter().map(|(i, c)| (ConstraintHandle(i), c))
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.0)
    }

    /// Whether two registered shapes pass each other's collision filter.
    /// Unknown handles never collide.
    pub fn shapes_collide(&self, a: ShapeHandle, b: ShapeHandle) -> bool {
        match (self.shapes.get(a.0), self.shapes.get(b.0)) {
            (Some(a), Some(b)) => a.body != b.body && a.filter.collides_with(&b.filter),
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.shapes.is_empty() && self.constraints.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.shapes.clear();
        self.constraints.clear();
        self.pending_forces = 0;
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(|(_, b)| b.kinetic_energy()).sum()
    }

    fn solve_positions(&mut self) {
        let handles = self.constraints.indices();
        for _ in 0..self.iterations {
            for &index in &handles {
                let Some(constraint) = self.constraints.get(index).copied() else {
                    continue;
                };
                match constraint {
                    Constraint::Pin {
                        body_a,
                        body_b,
                        anchor_a,
                        anchor_b,
                        distance,
                    } => self.solve_pin(body_a, body_b, anchor_a, anchor_b, distance),
                    Constraint::RotaryLimit {
                        body_a,
                        body_b,
                        min,
                        max,
                    } => self.solve_rotary_limit(body_a, body_b, min, max),
                    Constraint::Motor { .. } => {}
                }
            }
        }
    }

    fn solve_pin(
        &mut self,
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Vec2,
        anchor_b: Vec2,
        distance: f32,
    ) {
        let (Some(mut a), Some(mut b)) = (
            self.bodies.get(body_a.0).copied(),
            self.bodies.get(body_b.0).copied(),
        ) else {
            return;
        };

        let world_a = a.local_to_world(anchor_a);
        let world_b = b.local_to_world(anchor_b);
        let delta = world_b - world_a;
        let len = delta.length();
        let error = len - distance;
        if error.abs() < EPSILON || len < EPSILON {
            return;
        }

        let n = delta / len;
        let ra = world_a - a.position;
        let rb = world_b - b.position;
        let wa = a.inv_mass() + a.inv_moment() * ra.perp_dot(n).powi(2);
        let wb = b.inv_mass() + b.inv_moment() * rb.perp_dot(n).powi(2);
        let w = wa + wb;
        if w <= 0.0 {
            return;
        }

        let p = n * (error / w);
        a.position += p * a.inv_mass();
        a.angle += a.inv_moment() * ra.perp_dot(p);
        b.position -= p * b.inv_mass();
        b.angle -= b.inv_moment() * rb.perp_dot(p);

        self.write_back(body_a, a);
        self.write_back(body_b, b);
    }

    fn solve_rotary_limit(&mut self, body_a: BodyHandle, body_b: BodyHandle, min: f32, max: f32) {
        let (Some(mut a), Some(mut b)) = (
            self.bodies.get(body_a.0).copied(),
            self.bodies.get(body_b.0).copied(),
        ) else {
            return;
        };

        let relative = b.angle - a.angle;
        let error = if relative < min {
            relative - min
        } else if relative > max {
            relative - max
        } else {
            return;
        };

        let w = a.inv_moment() + b.inv_moment();
        if w <= 0.0 {
            return;
        }
        a.angle += error * a.inv_moment() / w;
        b.angle -= error * b.inv_moment() / w;

        self.write_back(body_a, a);
        self.write_back(body_b, b);
    }

    fn solve_motors(&mut self, dt: f32) {
        let motors: Vec<Constraint> = self
            .constraints
            .iter()
            .filter(|(_, c)| matches!(c, Constraint::Motor { .. }))
            .map(|(_, c)| *c)
            .collect();

        for motor in motors {
            let Constraint::Motor {
                body_a,
                body_b,
                rate,
                max_torque,
            } = motor
            else {
                continue;
            };
            let (Some(mut a), Some(mut b)) = (
                self.bodies.get(body_a.0).copied(),
                self.bodies.get(body_b.0).copied(),
            ) else {
                continue;
            };

            let w = a.inv_moment() + b.inv_moment();
            if w <= 0.0 {
                continue;
            }
            let error = (b.angular_velocity - a.angular_velocity) - rate;
            let max_impulse = max_torque * dt;
            let impulse = (-error / w).clamp(-max_impulse, max_impulse);
            a.angular_velocity -= impulse * a.inv_moment();
            b.angular_velocity += impulse * b.inv_moment();

            self.write_back(body_a, a);
            self.write_back(body_b, b);
        }
    }

    fn write_back(&mut self, handle: BodyHandle, body: Body) {
        if body.is_static() {
            return;
        }
        if let Some(slot) = self.bodies.get_mut(handle.0) {
            *slot = body;
        }
    }
}

impl SimulationWorld for Space {
    fn add_body(&mut self, body: Body) -> BodyHandle {
        BodyHandle(self.bodies.insert(body))
    }

    fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.bodies.remove(handle.0)
    }

    fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn add_shape(&mut self, shape: Shape) -> ShapeHandle {
        ShapeHandle(self.shapes.insert(shape))
    }

    fn remove_shape(&mut self, handle: ShapeHandle) -> Option<Shape> {
        self.shapes.remove(handle.0)
    }

    fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.shapes.get(handle.0)
    }

    fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn add_constraint(&mut self, constraint: Constraint) -> ConstraintHandle {
        ConstraintHandle(self.constraints.insert(constraint))
    }

    fn remove_constraint(&mut self, handle: ConstraintHandle) -> Option<Constraint> {
        self.constraints.remove(handle.0)
    }

    fn constraint(&self, handle: ConstraintHandle) -> Option<&Constraint> {
        self.constraints.get(handle.0)
    }

    fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    fn apply_force_at_point(&mut self, body: BodyHandle, force: Vec2, point: Vec2) -> bool {
        match self.bodies.get_mut(body.0) {
            Some(b) => {
                b.apply_force_at_point(force, point);
                self.pending_forces += 1;
                true
            }
            None => false,
        }
    }

    fn integrate(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let gravity = self.gravity;
        let mut previous: Vec<(Index, Vec2, f32)> = Vec::with_capacity(self.bodies.len());
        for index in self.bodies.indices() {
            if let Some(body) = self.bodies.get_mut(index) {
                if body.is_static() {
                    continue;
                }
                previous.push((index, body.position, body.angle));
                body.integrate_velocity(gravity, dt);
                body.integrate_position(dt);
            }
        }

        self.solve_positions();

        for (index, position, angle) in previous {
            if let Some(body) = self.bodies.get_mut(index) {
                body.velocity = (body.position - position) / dt;
                body.angular_velocity = (body.angle - angle) / dt;
            }
        }

        self.solve_motors(dt);

        self.pending_forces = 0;
        self.steps += 1;
    }
}

impl std::fmt::Debug for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Space")
            .field("body_count", &self.bodies.len())
            .field("shape_count", &self.shapes.len())
            .field("constraint_count", &self.constraints.len())
            .field("gravity", &self.gravity)
            .field("steps", &self.steps)
            .finish()
    }
}
