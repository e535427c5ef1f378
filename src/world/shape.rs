use glam::Vec2;
use std::f32::consts::PI;

use super::arena::Index;
use super::body::BodyHandle;

/// Handle to a shape registered in a [`SimulationWorld`](super::SimulationWorld).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle(pub(crate) Index);

/// Collision filter. Shapes sharing a non-zero group never collide with each
/// other; group 0 means "no group".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeFilter {
    pub group: u32,
}

impl ShapeFilter {
    pub const NONE: Self = Self { group: 0 };

    pub fn group(group: u32) -> Self {
        Self { group }
    }

    pub fn collides_with(&self, other: &ShapeFilter) -> bool {
        self.group == 0 || self.group != other.group
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Disc of `radius` centred at `offset` in body space.
    Circle { radius: f32, offset: Vec2 },
    /// Capsule from `a` to `b` in body space, `radius` thick.
    Segment { a: Vec2, b: Vec2, radius: f32 },
}

impl ShapeKind {
    pub fn area(&self) -> f32 {
        match *self {
            ShapeKind::Circle { radius, .. } => PI * radius * radius,
            ShapeKind::Segment { a, b, radius } => radius * (PI * radius + 2.0 * (b - a).length()),
        }
    }
}

/// Collision geometry attached to one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub body: BodyHandle,
    pub kind: ShapeKind,
    pub filter: ShapeFilter,
}

impl Shape {
    pub fn circle(body: BodyHandle, radius: f32, offset: Vec2) -> Self {
        Self {
            body,
            kind: ShapeKind::Circle { radius, offset },
            filter: ShapeFilter::NONE,
        }
    }

    pub fn segment(body: BodyHandle, a: Vec2, b: Vec2, radius: f32) -> Self {
        Self {
            body,
            kind: ShapeKind::Segment { a, b, radius },
            filter: ShapeFilter::NONE,
        }
    }

    pub fn with_filter(mut self, filter: ShapeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Planar area, used as the drag cross-section.
    pub fn area(&self) -> f32 {
        self.kind.area()
    }
}
