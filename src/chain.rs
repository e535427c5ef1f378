//! Placement and joining: grows an assembly one segment at a time.

use glam::Vec2;
use log::{trace, warn};

use crate::error::Result;
use crate::joint::{Joint, JointKind, JointSet};
use crate::math::direction;
use crate::segment::{DragModel, Segment, SegmentConfig};
use crate::world::SimulationWorld;

/// Where a new segment hangs from.
#[derive(Debug, Clone, Copy)]
pub enum Anchor<'a> {
    /// A fixed world point. Nothing to join to.
    Point(Vec2),
    /// The body origin of an existing segment.
    Origin(&'a Segment),
    /// The far endpoint of an existing segment.
    FarEnd(&'a Segment),
}

/// How the new segment's origin is stepped away from its anchor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Right on the anchor point.
    Coincident,
    /// `length` along `direction(angle)`, the segment's own angle.
    Along { angle: f32, length: f32 },
    /// A fixed world-space offset, independent of any segment angle.
    WorldOffset(Vec2),
}

impl Placement {
    pub fn offset(&self) -> Vec2 {
        match *self {
            Placement::Coincident => Vec2::ZERO,
            Placement::Along { angle, length } => direction(angle) * length,
            Placement::WorldOffset(offset) => offset,
        }
    }

    pub fn apply(&self, anchor: Vec2) -> Vec2 {
        anchor + self.offset()
    }
}

/// A freshly built segment and the joint tying it to its anchor, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub segment: Segment,
    pub joint: Option<Joint>,
}

/// Builds one segment at `placement` from `anchor` and joins it to the anchor
/// segment with a `joint_kind` joint. The new segment's own angle
/// constraints are the ones a limited joint enforces.
///
/// On failure nothing built by this call is left in the world.
pub fn extend<W: SimulationWorld + ?Sized>(
    world: &mut W,
    anchor: Anchor<'_>,
    placement: Placement,
    config: SegmentConfig,
    joint_kind: JointKind,
    drag: DragModel,
) -> Result<Link> {
    let (start, parent) = match anchor {
        Anchor::Point(point) => (point, None),
        Anchor::Origin(segment) => (segment.position(&*world)?, Some((segment, Vec2::ZERO))),
        Anchor::FarEnd(segment) => (
            segment.far_endpoint(&*world)?,
            Some((segment, segment.config().reach())),
        ),
    };
    let position = placement.apply(start);

    let segment = Segment::create(world, position, config, drag)?;
    trace!(
        "placed {:?} segment at {:?} ({:?} from {:?})",
        config.shape,
        position,
        placement,
        start
    );

    let Some((parent, local_offset)) = parent else {
        return Ok(Link {
            segment,
            joint: None,
        });
    };

    match Joint::connect(
        world,
        joint_kind,
        parent.body(),
        segment.body(),
        local_offset,
        config.angle_constraints,
    ) {
        Ok(joint) => Ok(Link {
            segment,
            joint: Some(joint),
        }),
        Err(err) => {
            segment.remove(world);
            Err(err)
        }
    }
}

/// Which already-built segment of the chain to extend from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    Origin(usize),
    FarEnd(usize),
}

/// Accumulates the segments and joints of one assembly so a failed build can
/// be torn down as a unit.
pub struct ChainBuilder<'w, W: SimulationWorld + ?Sized> {
    world: &'w mut W,
    segments: Vec<Segment>,
    joints: JointSet,
    drag: DragModel,
    joint_kind: JointKind,
}

impl<'w, W: SimulationWorld + ?Sized> ChainBuilder<'w, W> {
    pub fn new(world: &'w mut W, drag: DragModel) -> Self {
        Self {
            world,
            segments: Vec::new(),
            joints: JointSet::new(),
            drag,
            joint_kind: JointKind::Pin,
        }
    }

    pub fn joint_kind(mut self, joint_kind: JointKind) -> Self {
        self.joint_kind = joint_kind;
        self
    }

    /// Adds a free-standing dynamic segment at `position`.
    pub fn root(&mut self, position: Vec2, config: SegmentConfig) -> Result<usize> {
        let segment = Segment::create(&mut *self.world, position, config, self.drag)?;
        Ok(self.push(segment))
    }

    /// Adds a segment fixed to the world at `position`.
    pub fn static_root(&mut self, position: Vec2, config: SegmentConfig) -> Result<usize> {
        let segment = Segment::create_static(&mut *self.world, position, config, self.drag)?;
        Ok(self.push(segment))
    }

    /// Extends from segment `attach` and returns the new segment's index.
    pub fn extend(
        &mut self,
        attach: Attach,
        placement: Placement,
        config: SegmentConfig,
    ) -> Result<usize> {
        let link = match attach {
            Attach::Origin(index) => {
                let parent = self.segments[index].clone();
                extend(
                    &mut *self.world,
                    Anchor::Origin(&parent),
                    placement,
                    config,
                    self.joint_kind,
                    self.drag,
                )?
            }
            Attach::FarEnd(index) => {
                let parent = self.segments[index].clone();
                extend(
                    &mut *self.world,
                    Anchor::FarEnd(&parent),
                    placement,
                    config,
                    self.joint_kind,
                    self.drag,
                )?
            }
        };

        if let Some(joint) = link.joint {
            self.joints.push(joint);
        }
        Ok(self.push(link.segment))
    }

    fn push(&mut self, segment: Segment) -> usize {
        self.segments.push(segment);
        self.segments.len() - 1
    }

    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn world(&self) -> &W {
        &*self.world
    }

    pub fn finish(self) -> (Vec<Segment>, JointSet) {
        (self.segments, self.joints)
    }

    /// Removes everything built so far.
    pub fn abort(self) {
        self.joints.remove_all(&mut *self.world);
        for segment in &self.segments {
            segment.remove(&mut *self.world);
        }
    }
}

/// Runs `steps` against a fresh builder; if they fail, every segment and
/// joint created so far is removed again before the error is returned.
pub fn build<W, F>(
    world: &mut W,
    drag: DragModel,
    joint_kind: JointKind,
    steps: F,
) -> Result<(Vec<Segment>, JointSet)>
where
    W: SimulationWorld + ?Sized,
    F: FnOnce(&mut ChainBuilder<'_, W>) -> Result<()>,
{
    let mut builder = ChainBuilder::new(world, drag).joint_kind(joint_kind);
    match steps(&mut builder) {
        Ok(()) => Ok(builder.finish()),
        Err(err) => {
            warn!(
                "rolling back {} segments after failed build: {}",
                builder.segments().len(),
                err
            );
            builder.abort();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwingsetError;
    use crate::world::{Constraint, Space};
    use approx::assert_relative_eq;

    fn link_config() -> SegmentConfig {
        SegmentConfig::disc(2.0, 1.0).with_collision_group(1)
    }

    #[test]
    fn placement_offsets() {
        assert_eq!(Placement::Coincident.apply(Vec2::new(1.0, 2.0)), Vec2::new(1.0, 2.0));
        assert_eq!(
            Placement::WorldOffset(Vec2::new(0.0, -5.0)).apply(Vec2::new(1.0, 2.0)),
            Vec2::new(1.0, -3.0)
        );
        let along = Placement::Along {
            angle: 0.0,
            length: 4.0,
        };
        assert_eq!(along.apply(Vec2::ZERO), Vec2::new(0.0, -4.0));
    }

    #[test]
    fn extend_from_point_makes_no_joint() {
        let mut world = Space::new();
        let link = extend(
            &mut world,
            Anchor::Point(Vec2::new(3.0, 4.0)),
            Placement::Coincident,
            link_config(),
            JointKind::Pin,
            DragModel::AIR,
        )
        .unwrap();

        assert!(link.joint.is_none());
        assert_eq!(link.segment.position(&world).unwrap(), Vec2::new(3.0, 4.0));
        assert_eq!(world.constraint_count(), 0);
    }

    #[test]
    fn extend_from_origin_pins_at_link_length() {
        let mut world = Space::new();
        let root = Segment::create_static(&mut world, Vec2::ZERO, link_config(), DragModel::AIR)
            .unwrap();
        let link = extend(
            &mut world,
            Anchor::Origin(&root),
            Placement::Along {
                angle: 0.0,
                length: 10.0,
            },
            link_config(),
            JointKind::Pin,
            DragModel::AIR,
        )
        .unwrap();

        let joint = link.joint.unwrap();
        assert!(joint.connects(root.body(), link.segment.body()));
        match world.constraint(joint.constraints()[0]) {
            Some(Constraint::Pin { distance, .. }) => assert_relative_eq!(*distance, 10.0),
            other => panic!("expected a pin, got {other:?}"),
        }
    }

    #[test]
    fn extend_from_far_end_pins_coincident_points() {
        let mut world = Space::new();
        let arm = SegmentConfig::capsule(30.0, 1.0).with_start_angle(90.0);
        let upper = Segment::create(&mut world, Vec2::ZERO, arm, DragModel::AIR).unwrap();
        let lower = extend(
            &mut world,
            Anchor::FarEnd(&upper),
            Placement::Coincident,
            arm,
            JointKind::Pin,
            DragModel::AIR,
        )
        .unwrap();

        let start = lower.segment.position(&world).unwrap();
        assert_relative_eq!(start.x, 30.0, epsilon = 1e-4);
        assert_relative_eq!(start.y, 0.0, epsilon = 1e-4);
        match world.constraint(lower.joint.unwrap().constraints()[0]) {
            Some(Constraint::Pin { distance, .. }) => assert_relative_eq!(*distance, 0.0, epsilon = 1e-4),
            other => panic!("expected a pin, got {other:?}"),
        }
    }

    #[test]
    fn failed_joint_removes_new_segment() {
        let mut world = Space::new();
        let root =
            Segment::create(&mut world, Vec2::ZERO, link_config(), DragModel::AIR).unwrap();
        let broken_motor = JointKind::LimitedRotary {
            motor_rate: Some(f32::NAN),
        };

        let result = extend(
            &mut world,
            Anchor::Origin(&root),
            Placement::Coincident,
            SegmentConfig::capsule(10.0, 1.0),
            broken_motor,
            DragModel::AIR,
        );

        assert!(matches!(result, Err(SwingsetError::NonFinite("motor_rate"))));
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.shape_count(), 1);
        assert_eq!(world.constraint_count(), 0);
    }

    #[test]
    fn extend_from_removed_segment_fails_cleanly() {
        let mut world = Space::new();
        let root =
            Segment::create(&mut world, Vec2::ZERO, link_config(), DragModel::AIR).unwrap();
        root.remove(&mut world);

        let result = extend(
            &mut world,
            Anchor::FarEnd(&root),
            Placement::Coincident,
            link_config(),
            JointKind::Pin,
            DragModel::AIR,
        );
        assert!(matches!(result, Err(SwingsetError::MissingBody(_))));
        assert!(world.is_empty());
    }

    #[test]
    fn build_rolls_back_on_error() {
        let mut world = Space::new();
        let result = build(&mut world, DragModel::AIR, JointKind::Pin, |chain| {
            let root = chain.static_root(Vec2::ZERO, link_config())?;
            let next = chain.extend(
                Attach::Origin(root),
                Placement::Along {
                    angle: 0.0,
                    length: 5.0,
                },
                link_config(),
            )?;
            chain.extend(
                Attach::Origin(next),
                Placement::Coincident,
                SegmentConfig::disc(0.0, 1.0),
            )?;
            Ok(())
        });

        assert!(matches!(result, Err(SwingsetError::InvalidExtent(_))));
        assert!(world.is_empty());
    }

    #[test]
    fn build_returns_segments_and_joints() {
        let mut world = Space::new();
        let (segments, joints) = build(&mut world, DragModel::AIR, JointKind::Pin, |chain| {
            let root = chain.static_root(Vec2::ZERO, link_config())?;
            chain.extend(
                Attach::Origin(root),
                Placement::Along {
                    angle: 0.0,
                    length: 5.0,
                },
                link_config(),
            )?;
            Ok(())
        })
        .unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(joints.len(), 1);
        assert_eq!(world.body_count(), 2);
    }
}
