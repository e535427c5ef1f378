//! One rigid body plus its collision shape: a limb bone or a chain link.

mod config;
mod drag;

use glam::Vec2;

pub use config::{AngleLimits, SegmentConfig, SegmentShape, CAPSULE_RADIUS};
pub use drag::DragModel;

use crate::error::{Result, SwingsetError};
use crate::world::{Body, BodyHandle, Shape, ShapeFilter, ShapeHandle, SimulationWorld};

/// A body and shape registered in a world, tracked by handle.
///
/// The segment is responsible for removing both from the world; the world is
/// passed in explicitly to every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    config: SegmentConfig,
    anchor_position: Vec2,
    body: BodyHandle,
    shape: ShapeHandle,
    drag: DragModel,
}

impl Segment {
    /// Builds a dynamic segment with its origin at `anchor_position`.
    pub fn create<W: SimulationWorld + ?Sized>(
        world: &mut W,
        anchor_position: Vec2,
        config: SegmentConfig,
        drag: DragModel,
    ) -> Result<Self> {
        Self::build(world, anchor_position, config, drag, Body::new(config.mass, config.moment()))
    }

    /// Builds a segment pinned to the world: it never moves and ignores forces.
    pub fn create_static<W: SimulationWorld + ?Sized>(
        world: &mut W,
        anchor_position: Vec2,
        config: SegmentConfig,
        drag: DragModel,
    ) -> Result<Self> {
        Self::build(world, anchor_position, config, drag, Body::new_static())
    }

    fn build<W: SimulationWorld + ?Sized>(
        world: &mut W,
        anchor_position: Vec2,
        config: SegmentConfig,
        drag: DragModel,
        body: Body,
    ) -> Result<Self> {
        config.validate()?;
        if !anchor_position.is_finite() {
            return Err(SwingsetError::NonFinite("anchor_position"));
        }

        let body = world.add_body(body.with_position(anchor_position));
        let shape = world.add_shape(Self::shape_for(&config, body));

        Ok(Self {
            config,
            anchor_position,
            body,
            shape,
            drag,
        })
    }

    fn shape_for(config: &SegmentConfig, body: BodyHandle) -> Shape {
        let shape = match config.shape {
            SegmentShape::Capsule => Shape::segment(body, Vec2::ZERO, config.reach(), CAPSULE_RADIUS),
            SegmentShape::Disc => Shape::circle(body, config.extent, Vec2::ZERO),
            SegmentShape::OffsetDisc => Shape::circle(body, config.extent, config.reach()),
        };
        shape.with_filter(ShapeFilter::group(config.collision_group))
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// World position of the body when the segment was built.
    pub fn anchor_position(&self) -> Vec2 {
        self.anchor_position
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn shape(&self) -> ShapeHandle {
        self.shape
    }

    pub fn drag_model(&self) -> DragModel {
        self.drag
    }

    fn body_in<'w, W: SimulationWorld + ?Sized>(&self, world: &'w W) -> Result<&'w Body> {
        world.body(self.body).ok_or(SwingsetError::MissingBody(self.body))
    }

    pub fn position<W: SimulationWorld + ?Sized>(&self, world: &W) -> Result<Vec2> {
        Ok(self.body_in(world)?.position)
    }

    pub fn velocity<W: SimulationWorld + ?Sized>(&self, world: &W) -> Result<Vec2> {
        Ok(self.body_in(world)?.velocity)
    }

    /// Current body rotation in radians.
    pub fn angle<W: SimulationWorld + ?Sized>(&self, world: &W) -> Result<f32> {
        Ok(self.body_in(world)?.angle)
    }

    /// World position of the end opposite the origin, following the body's
    /// current position and rotation.
    pub fn far_endpoint<W: SimulationWorld + ?Sized>(&self, world: &W) -> Result<Vec2> {
        Ok(self.body_in(world)?.local_to_world(self.config.reach()))
    }

    /// Drag cross-section.
    pub fn area<W: SimulationWorld + ?Sized>(&self, world: &W) -> Result<f32> {
        world
            .shape(self.shape)
            .map(Shape::area)
            .ok_or(SwingsetError::MissingShape(self.shape))
    }

    pub fn drag_force<W: SimulationWorld + ?Sized>(&self, world: &W) -> Result<Vec2> {
        let area = self.area(world)?;
        let velocity = self.velocity(world)?;
        Ok(self.drag.force(area, velocity))
    }

    /// Queues this tick's drag force at the body's position.
    ///
    /// Call exactly once per segment per tick, before the world integrates;
    /// a second call in the same tick applies drag twice.
    pub fn update<W: SimulationWorld + ?Sized>(&self, world: &mut W) -> Result<()> {
        let force = self.drag_force(&*world)?;
        let position = self.position(&*world)?;
        if world.apply_force_at_point(self.body, force, position) {
            Ok(())
        } else {
            Err(SwingsetError::MissingBody(self.body))
        }
    }

    /// Removes shape and body from the world. Safe to repeat.
    pub fn remove<W: SimulationWorld + ?Sized>(&self, world: &mut W) {
        world.remove_shape(self.shape);
        world.remove_body(self.body);
    }

    pub fn is_registered<W: SimulationWorld + ?Sized>(&self, world: &W) -> bool {
        world.contains_body(self.body) && world.contains_shape(self.shape)
    }
}
