use glam::Vec2;
use log::debug;

use super::Assembly;
use crate::chain::{self, Attach, Placement};
use crate::config::SwingConfig;
use crate::error::Result;
use crate::joint::{JointKind, JointSet};
use crate::segment::Segment;
use crate::world::SimulationWorld;

/// A hanging chain of disc links. Link 0 is fixed to the world, every other
/// link is pinned to the one before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Swing {
    start_position: Vec2,
    start_angle: f32,
    link_length: f32,
    links: Vec<Segment>,
    joints: JointSet,
}

impl Swing {
    /// Builds the swing with its fixed top link at `start_position`. The other
    /// links are laid out in a straight line along `config.start_angle`.
    pub fn create<W: SimulationWorld + ?Sized>(
        config: &SwingConfig,
        world: &mut W,
        start_position: Vec2,
        collision_group: u32,
    ) -> Result<Self> {
        config.validate()?;

        let link = config.link(collision_group);
        let step = Placement::Along {
            angle: config.start_angle,
            length: config.link_length,
        };

        let (links, joints) = chain::build(world, config.drag, JointKind::Pin, |chain| {
            let mut previous = chain.static_root(start_position, link)?;
            for _ in 1..config.num_links {
                previous = chain.extend(Attach::Origin(previous), step, link)?;
            }
            Ok(())
        })?;

        debug!(
            "built swing at {:?}: {} links, {} joints, group {}",
            start_position,
            links.len(),
            joints.len(),
            collision_group
        );

        Ok(Self {
            start_position,
            start_angle: config.start_angle,
            link_length: config.link_length,
            links,
            joints,
        })
    }

    pub fn links(&self) -> &[Segment] {
        &self.links
    }

    pub fn link(&self, index: usize) -> Option<&Segment> {
        self.links.get(index)
    }

    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// The static link the swing hangs from.
    pub fn top_link(&self) -> &Segment {
        &self.links[0]
    }

    /// The last link, where a rider attaches.
    pub fn seat(&self) -> &Segment {
        &self.links[self.links.len() - 1]
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    pub fn link_length(&self) -> f32 {
        self.link_length
    }
}

impl Assembly for Swing {
    fn segments(&self) -> &[Segment] {
        &self.links
    }

    fn joints(&self) -> &JointSet {
        &self.joints
    }
}
