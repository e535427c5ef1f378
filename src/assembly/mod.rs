//! Fixed-topology groups of segments and joints.

mod stickman;
mod swing;

pub use stickman::{BodyPart, LimbStacking, Stickman};
pub use swing::Swing;

use crate::error::Result;
use crate::joint::JointSet;
use crate::segment::Segment;
use crate::world::SimulationWorld;

/// A built rig: some segments plus the joints tying them together.
pub trait Assembly {
    fn segments(&self) -> &[Segment];
    fn joints(&self) -> &JointSet;

    fn segment_count(&self) -> usize {
        self.segments().len()
    }

    /// Applies drag to every segment. Order does not matter; each body's
    /// force is independent.
    fn update<W: SimulationWorld + ?Sized>(&self, world: &mut W) -> Result<()> {
        for segment in self.segments() {
            segment.update(world)?;
        }
        Ok(())
    }

    fn is_registered<W: SimulationWorld + ?Sized>(&self, world: &W) -> bool {
        self.segments().iter().all(|s| s.is_registered(world))
            && self.joints().iter().all(|j| j.is_registered(world))
    }

    /// Unregisters every joint, then every segment. Consumes the assembly.
    fn remove<W: SimulationWorld + ?Sized>(self, world: &mut W)
    where
        Self: Sized,
    {
        self.joints().remove_all(world);
        for segment in self.segments() {
            segment.remove(world);
        }
    }
}
