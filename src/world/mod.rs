//! The simulation world the rigs are built into.
//!
//! [`SimulationWorld`] is the seam to the physics solver: rigs only ever talk
//! to the world through it and keep handles, never the objects themselves.
//! [`Space`] is the small reference solver shipped with the crate.

mod arena;
mod body;
mod constraint;
mod shape;
mod space;

use glam::Vec2;

pub use arena::Index;
pub use body::{Body, BodyHandle, BodyKind};
pub use constraint::{Constraint, ConstraintHandle};
pub use shape::{Shape, ShapeFilter, ShapeHandle, ShapeKind};
pub use space::Space;

pub trait SimulationWorld {
    fn add_body(&mut self, body: Body) -> BodyHandle;
    fn remove_body(&mut self, handle: BodyHandle) -> Option<Body>;
    fn body(&self, handle: BodyHandle) -> Option<&Body>;
    fn body_count(&self) -> usize;

    fn add_shape(&mut self, shape: Shape) -> ShapeHandle;
    fn remove_shape(&mut self, handle: ShapeHandle) -> Option<Shape>;
    fn shape(&self, handle: ShapeHandle) -> Option<&Shape>;
    fn shape_count(&self) -> usize;

    fn add_constraint(&mut self, constraint: Constraint) -> ConstraintHandle;
    fn remove_constraint(&mut self, handle: ConstraintHandle) -> Option<Constraint>;
    fn constraint(&self, handle: ConstraintHandle) -> Option<&Constraint>;
    fn constraint_count(&self) -> usize;

    /// Queues a world-space force at a world point for the next
    /// [`integrate`](Self::integrate). Returns `false` if the body is unknown.
    fn apply_force_at_point(&mut self, body: BodyHandle, force: Vec2, point: Vec2) -> bool;

    /// Advances the world by `dt` seconds, consuming queued forces.
    fn integrate(&mut self, dt: f32);

    fn contains_body(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some()
    }

    fn contains_shape(&self, handle: ShapeHandle) -> bool {
        self.shape(handle).is_some()
    }

    fn contains_constraint(&self, handle: ConstraintHandle) -> bool {
        self.constraint(handle).is_some()
    }
}
