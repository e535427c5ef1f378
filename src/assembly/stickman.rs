use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Assembly;
use crate::chain::{self, Attach, Placement};
use crate::config::StickmanConfig;
use crate::error::Result;
use crate::joint::JointSet;
use crate::segment::Segment;
use crate::world::SimulationWorld;

/// The eight parts of a stickman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Head,
    Neck,
    UpperArm,
    LowerArm,
    Torso,
    UpperLeg,
    LowerLeg,
    Foot,
}

impl BodyPart {
    /// Head-to-foot order.
    pub const ALL: [BodyPart; 8] = [
        BodyPart::Head,
        BodyPart::Neck,
        BodyPart::UpperArm,
        BodyPart::LowerArm,
        BodyPart::Torso,
        BodyPart::UpperLeg,
        BodyPart::LowerLeg,
        BodyPart::Foot,
    ];

    /// Position in construction order (foot first).
    fn build_index(self) -> usize {
        match self {
            BodyPart::Foot => 0,
            BodyPart::LowerLeg => 1,
            BodyPart::UpperLeg => 2,
            BodyPart::Torso => 3,
            BodyPart::UpperArm => 4,
            BodyPart::LowerArm => 5,
            BodyPart::Neck => 6,
            BodyPart::Head => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Neck => "neck",
            BodyPart::UpperArm => "upper_arm",
            BodyPart::LowerArm => "lower_arm",
            BodyPart::Torso => "torso",
            BodyPart::UpperLeg => "upper_leg",
            BodyPart::LowerLeg => "lower_leg",
            BodyPart::Foot => "foot",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How far each lower-body part is stepped from the one below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbStacking {
    /// Each part starts one length of the part below it away: lower leg one
    /// foot-length up, upper leg one lower-leg-length across, torso one
    /// upper-leg-length up.
    #[default]
    Stepped,
    /// Each part is offset by its own length and hangs back towards the part
    /// below.
    Hanging,
}

impl LimbStacking {
    /// World offsets for lower leg, upper leg and torso, in that order.
    pub fn offsets(self, config: &StickmanConfig) -> [Vec2; 3] {
        let (up_1, across, up_2) = match self {
            LimbStacking::Stepped => (
                config.foot.length,
                config.lower_leg.length,
                config.upper_leg.length,
            ),
            LimbStacking::Hanging => (
                config.lower_leg.length,
                config.upper_leg.length,
                config.torso.length,
            ),
        };
        [
            Vec2::new(0.0, -up_1),
            Vec2::new(-across, 0.0),
            Vec2::new(0.0, -up_2),
        ]
    }
}

/// A humanoid built up from the foot. The torso's origin is shared by both
/// branches: arm (upper then lower) and neck then head.
#[derive(Debug, Clone, PartialEq)]
pub struct Stickman {
    start_position: Vec2,
    /// Construction order, see [`BodyPart::build_index`].
    parts: Vec<Segment>,
    joints: JointSet,
}

impl Stickman {
    /// Builds a stickman whose foot sits at `start_position`. All parts share
    /// `collision_group`, so the skeleton never collides with itself.
    pub fn create<W: SimulationWorld + ?Sized>(
        config: &StickmanConfig,
        world: &mut W,
        start_position: Vec2,
        collision_group: u32,
    ) -> Result<Self> {
        let head = config.head.segment(collision_group);
        let neck = config.neck.segment(collision_group);
        let upper_arm = config.upper_arm.segment(collision_group);
        let lower_arm = config.lower_arm.segment(collision_group);
        let torso = config.torso.segment(collision_group);
        let upper_leg = config.upper_leg.segment(collision_group);
        let lower_leg = config.lower_leg.segment(collision_group);
        let foot = config.foot.segment(collision_group);
        for part in [head, neck, upper_arm, lower_arm, torso, upper_leg, lower_leg, foot] {
            part.validate()?;
        }

        let [knee, hip, waist] = config.stacking.offsets(config);

        let (parts, joints) = chain::build(world, config.drag, config.joint_kind, |chain| {
            let foot_i = chain.root(start_position, foot)?;
            let lower_leg_i =
                chain.extend(Attach::Origin(foot_i), Placement::WorldOffset(knee), lower_leg)?;
            let upper_leg_i =
                chain.extend(Attach::Origin(lower_leg_i), Placement::WorldOffset(hip), upper_leg)?;
            let torso_i =
                chain.extend(Attach::Origin(upper_leg_i), Placement::WorldOffset(waist), torso)?;
            let upper_arm_i = chain.extend(Attach::Origin(torso_i), Placement::Coincident, upper_arm)?;
            chain.extend(Attach::FarEnd(upper_arm_i), Placement::Coincident, lower_arm)?;
            let neck_i = chain.extend(Attach::Origin(torso_i), Placement::Coincident, neck)?;
            chain.extend(Attach::FarEnd(neck_i), Placement::Coincident, head)?;
            Ok(())
        })?;

        debug!(
            "built stickman at {:?}: {} parts, {} joints ({:?}, {:?}), group {}",
            start_position,
            parts.len(),
            joints.len(),
            config.joint_kind,
            config.stacking,
            collision_group
        );

        Ok(Self {
            start_position,
            parts,
            joints,
        })
    }

    pub fn part(&self, part: BodyPart) -> &Segment {
        &self.parts[part.build_index()]
    }

    /// Every part, head first.
    pub fn body_parts(&self) -> [(BodyPart, &Segment); 8] {
        BodyPart::ALL.map(|p| (p, self.part(p)))
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn head(&self) -> &Segment {
        self.part(BodyPart::Head)
    }

    pub fn neck(&self) -> &Segment {
        self.part(BodyPart::Neck)
    }

    pub fn upper_arm(&self) -> &Segment {
        self.part(BodyPart::UpperArm)
    }

    pub fn lower_arm(&self) -> &Segment {
        self.part(BodyPart::LowerArm)
    }

    pub fn torso(&self) -> &Segment {
        self.part(BodyPart::Torso)
    }

    pub fn upper_leg(&self) -> &Segment {
        self.part(BodyPart::UpperLeg)
    }

    pub fn lower_leg(&self) -> &Segment {
        self.part(BodyPart::LowerLeg)
    }

    pub fn foot(&self) -> &Segment {
        self.part(BodyPart::Foot)
    }
}

impl Assembly for Stickman {
    fn segments(&self) -> &[Segment] {
        &self.parts
    }

    fn joints(&self) -> &JointSet {
        &self.joints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LimbConfig;
    use crate::error::SwingsetError;
    use crate::joint::JointKind;
    use crate::segment::{AngleLimits, SegmentShape};
    use crate::world::{Constraint, Space};
    use approx::assert_relative_eq;

    fn config() -> StickmanConfig {
        let mut config = StickmanConfig::default();
        config.foot.length = 20.0;
        config.lower_leg.length = 80.0;
        config.upper_leg.length = 80.0;
        config.torso.length = 100.0;
        config
    }

    #[test]
    fn stepped_lower_body_placement() {
        let mut world = Space::new();
        let stickman = Stickman::create(&config(), &mut world, Vec2::new(100.0, 500.0), 2).unwrap();

        assert_eq!(stickman.foot().position(&world).unwrap(), Vec2::new(100.0, 500.0));
        assert_eq!(stickman.lower_leg().position(&world).unwrap(), Vec2::new(100.0, 480.0));
        assert_eq!(stickman.upper_leg().position(&world).unwrap(), Vec2::new(20.0, 480.0));
        assert_eq!(stickman.torso().position(&world).unwrap(), Vec2::new(20.0, 400.0));
    }

    #[test]
    fn hanging_lower_body_placement() {
        let mut world = Space::new();
        let mut config = config();
        config.stacking = LimbStacking::Hanging;
        let stickman = Stickman::create(&config, &mut world, Vec2::new(100.0, 500.0), 2).unwrap();

        assert_eq!(stickman.lower_leg().position(&world).unwrap(), Vec2::new(100.0, 420.0));
        assert_eq!(stickman.upper_leg().position(&world).unwrap(), Vec2::new(20.0, 420.0));
        assert_eq!(stickman.torso().position(&world).unwrap(), Vec2::new(20.0, 320.0));
    }

    #[test]
    fn placement_ignores_lower_body_start_angles() {
        let mut world = Space::new();
        let mut config = config();
        config.lower_leg.start_angle = 37.0;
        config.upper_leg.start_angle = -120.0;
        let stickman = Stickman::create(&config, &mut world, Vec2::new(100.0, 500.0), 2).unwrap();

        assert_eq!(stickman.upper_leg().position(&world).unwrap(), Vec2::new(20.0, 480.0));
        assert_eq!(stickman.torso().position(&world).unwrap(), Vec2::new(20.0, 400.0));
    }

    #[test]
    fn branches_share_the_torso_origin() {
        let mut world = Space::new();
        let stickman = Stickman::create(&config(), &mut world, Vec2::new(100.0, 500.0), 2).unwrap();

        let torso = stickman.torso().position(&world).unwrap();
        assert_eq!(stickman.upper_arm().position(&world).unwrap(), torso);
        assert_eq!(stickman.neck().position(&world).unwrap(), torso);

        let elbow = stickman.upper_arm().far_endpoint(&world).unwrap();
        let lower_arm = stickman.lower_arm().position(&world).unwrap();
        assert_relative_eq!(lower_arm.x, elbow.x, epsilon = 1e-4);
        assert_relative_eq!(lower_arm.y, elbow.y, epsilon = 1e-4);

        let chin = stickman.neck().far_endpoint(&world).unwrap();
        let head = stickman.head().position(&world).unwrap();
        assert_relative_eq!(head.x, chin.x, epsilon = 1e-4);
        assert_relative_eq!(head.y, chin.y, epsilon = 1e-4);
    }

    #[test]
    fn one_of_each_part_in_one_group() {
        let mut world = Space::new();
        let stickman = Stickman::create(&config(), &mut world, Vec2::ZERO, 9).unwrap();

        let parts = stickman.body_parts();
        assert_eq!(parts.len(), 8);
        assert_eq!(world.body_count(), 8);
        assert_eq!(world.shape_count(), 8);
        for (part, segment) in parts {
            assert_eq!(segment.config().collision_group, 9, "{part}");
            let expected = if part == BodyPart::Head {
                SegmentShape::OffsetDisc
            } else {
                SegmentShape::Capsule
            };
            assert_eq!(segment.config().shape, expected, "{part}");
        }
        assert!(!world.shapes_collide(stickman.head().shape(), stickman.foot().shape()));
    }

    #[test]
    fn pins_follow_the_skeleton() {
        let mut world = Space::new();
        let s = Stickman::create(&config(), &mut world, Vec2::ZERO, 1).unwrap();

        let expected = [
            (BodyPart::Foot, BodyPart::LowerLeg),
            (BodyPart::LowerLeg, BodyPart::UpperLeg),
            (BodyPart::UpperLeg, BodyPart::Torso),
            (BodyPart::Torso, BodyPart::UpperArm),
            (BodyPart::UpperArm, BodyPart::LowerArm),
            (BodyPart::Torso, BodyPart::Neck),
            (BodyPart::Neck, BodyPart::Head),
        ];
        assert_eq!(s.joints().len(), expected.len());
        for (a, b) in expected {
            assert!(
                s.joints()
                    .iter()
                    .any(|j| j.connects(s.part(a).body(), s.part(b).body())),
                "missing joint {a} -> {b}"
            );
        }
        assert!(s.joints().iter().all(|j| j.kind() == JointKind::Pin));
    }

    #[test]
    fn limited_rotary_joints_use_child_limits() {
        let mut world = Space::new();
        let mut config = config();
        config.joint_kind = JointKind::LimitedRotary { motor_rate: None };
        config.head.angle_constraints = AngleLimits::new(-10.0, 10.0);
        let s = Stickman::create(&config, &mut world, Vec2::ZERO, 1).unwrap();

        assert_eq!(world.constraint_count(), 14);
        let neck_joint = s
            .joints()
            .iter()
            .find(|j| j.connects(s.neck().body(), s.head().body()))
            .unwrap();
        match world.constraint(neck_joint.constraints()[1]) {
            Some(Constraint::RotaryLimit { min, max, .. }) => {
                assert_relative_eq!(*min, (-10f32).to_radians());
                assert_relative_eq!(*max, 10f32.to_radians());
            }
            other => panic!("expected a rotary limit, got {other:?}"),
        }
    }

    #[test]
    fn invalid_part_fails_before_building() {
        let mut world = Space::new();
        let mut config = config();
        config.lower_arm = LimbConfig::new(0.0, 1.0, 0.0, AngleLimits::FREE);

        let result = Stickman::create(&config, &mut world, Vec2::ZERO, 1);
        assert!(matches!(result, Err(SwingsetError::InvalidExtent(_))));
        assert!(world.is_empty());
    }

    #[test]
    fn build_then_remove_restores_world() {
        let mut world = Space::new();
        let stickman = Stickman::create(&config(), &mut world, Vec2::ZERO, 1).unwrap();
        assert!(stickman.is_registered(&world));

        stickman.remove(&mut world);

        assert_eq!(world.body_count(), 0);
        assert_eq!(world.shape_count(), 0);
        assert_eq!(world.constraint_count(), 0);
    }
}
