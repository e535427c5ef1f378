//! Joints between segments and the set that owns them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SwingsetError};
use crate::segment::AngleLimits;
use crate::world::{BodyHandle, Constraint, ConstraintHandle, SimulationWorld};

/// Torque cap for joint motors.
pub const MOTOR_MAX_TORQUE: f32 = 1.0e6;

/// Which connector the chain builder puts between two segments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JointKind {
    /// Position only, free rotation. Angle limits stay on the segment config
    /// unenforced.
    #[default]
    Pin,
    /// Pin plus a clamp on the relative angle, optionally motor-driven.
    /// `motor_rate` is in radians per second.
    LimitedRotary {
        #[serde(default)]
        motor_rate: Option<f32>,
    },
}

/// One logical joint. May be backed by several world constraints (pin,
/// limit, motor); they are created and removed together.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    kind: JointKind,
    body_a: BodyHandle,
    body_b: BodyHandle,
    constraints: Vec<ConstraintHandle>,
}

impl Joint {
    /// Pins `local_offset` on `body_a` to the origin of `body_b`, at the
    /// distance the two points are apart right now.
    pub fn pin<W: SimulationWorld + ?Sized>(
        world: &mut W,
        body_a: BodyHandle,
        body_b: BodyHandle,
        local_offset: Vec2,
    ) -> Result<Self> {
        let a = world.body(body_a).ok_or(SwingsetError::MissingBody(body_a))?;
        let b = world.body(body_b).ok_or(SwingsetError::MissingBody(body_b))?;
        let distance = a.local_to_world(local_offset).distance(b.position);

        let pin = world.add_constraint(Constraint::Pin {
            body_a,
            body_b,
            anchor_a: local_offset,
            anchor_b: Vec2::ZERO,
            distance,
        });

        Ok(Self {
            kind: JointKind::Pin,
            body_a,
            body_b,
            constraints: vec![pin],
        })
    }

    /// A pin whose relative angle is held inside `limits`, plus a motor when
    /// `motor_rate` is set.
    pub fn limited_rotary<W: SimulationWorld + ?Sized>(
        world: &mut W,
        body_a: BodyHandle,
        body_b: BodyHandle,
        local_offset: Vec2,
        limits: AngleLimits,
        motor_rate: Option<f32>,
    ) -> Result<Self> {
        limits.validate()?;
        if motor_rate.is_some_and(|rate| !rate.is_finite()) {
            return Err(SwingsetError::NonFinite("motor_rate"));
        }

        let mut joint = Self::pin(world, body_a, body_b, local_offset)?;
        joint.kind = JointKind::LimitedRotary { motor_rate };

        let (min, max) = limits.to_radians();
        joint.constraints.push(world.add_constraint(Constraint::RotaryLimit {
            body_a,
            body_b,
            min,
            max,
        }));

        if let Some(rate) = motor_rate {
            joint.constraints.push(world.add_constraint(Constraint::Motor {
                body_a,
                body_b,
                rate,
                max_torque: MOTOR_MAX_TORQUE,
            }));
        }

        Ok(joint)
    }

    /// Builds whichever joint `kind` asks for.
    pub fn connect<W: SimulationWorld + ?Sized>(
        world: &mut W,
        kind: JointKind,
        body_a: BodyHandle,
        body_b: BodyHandle,
        local_offset: Vec2,
        limits: AngleLimits,
    ) -> Result<Self> {
        match kind {
            JointKind::Pin => Self::pin(world, body_a, body_b, local_offset),
            JointKind::LimitedRotary { motor_rate } => {
                Self::limited_rotary(world, body_a, body_b, local_offset, limits, motor_rate)
            }
        }
    }

    pub fn kind(&self) -> JointKind {
        self.kind
    }

    pub fn bodies(&self) -> (BodyHandle, BodyHandle) {
        (self.body_a, self.body_b)
    }

    pub fn connects(&self, a: BodyHandle, b: BodyHandle) -> bool {
        (self.body_a == a && self.body_b == b) || (self.body_a == b && self.body_b == a)
    }

    pub fn constraints(&self) -> &[ConstraintHandle] {
        &self.constraints
    }

    pub fn is_registered<W: SimulationWorld + ?Sized>(&self, world: &W) -> bool {
        self.constraints.iter().all(|&c| world.contains_constraint(c))
    }

    /// Unregisters every backing constraint. Already-removed ones are skipped.
    pub fn remove<W: SimulationWorld + ?Sized>(&self, world: &mut W) {
        for &constraint in &self.constraints {
            world.remove_constraint(constraint);
        }
    }
}

/// The joints an assembly created, kept for bulk removal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointSet {
    joints: Vec<Joint>,
}

impl JointSet {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    pub fn push(&mut self, joint: Joint) {
        self.joints.push(joint);
    }

    pub fn pin<W: SimulationWorld + ?Sized>(
        &mut self,
        world: &mut W,
        body_a: BodyHandle,
        body_b: BodyHandle,
        local_offset: Vec2,
    ) -> Result<&Joint> {
        let joint = Joint::pin(world, body_a, body_b, local_offset)?;
        self.joints.push(joint);
        Ok(&self.joints[self.joints.len() - 1])
    }

    pub fn limited_rotary<W: SimulationWorld + ?Sized>(
        &mut self,
        world: &mut W,
        body_a: BodyHandle,
        body_b: BodyHandle,
        local_offset: Vec2,
        limits: AngleLimits,
        motor_rate: Option<f32>,
    ) -> Result<&Joint> {
        let joint = Joint::limited_rotary(world, body_a, body_b, local_offset, limits, motor_rate)?;
        self.joints.push(joint);
        Ok(&self.joints[self.joints.len() - 1])
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Joint> {
        self.joints.iter()
    }

    /// Removes every joint from the world. Calling it again is a no-op.
    pub fn remove_all<W: SimulationWorld + ?Sized>(&self, world: &mut W) {
        remove_all(world, &self.joints);
    }
}

/// Unregisters every joint in `joints`; joints already gone are skipped.
pub fn remove_all<W: SimulationWorld + ?Sized>(world: &mut W, joints: &[Joint]) {
    for joint in joints {
        joint.remove(world);
    }
}
