//! Owns the world plus every live rig and advances them together.

use glam::Vec2;
use log::{debug, trace};

use crate::assembly::{Assembly, Stickman, Swing};
use crate::config::{SceneConfig, StickmanConfig, SwingConfig};
use crate::error::Result;
use crate::world::{SimulationWorld, Space};

/// Identifies a rig added to a [`Scene`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RigId(u32);

/// Each tick first lets every rig apply its drag, then integrates the world
/// once, so all forces of a frame act on the same state.
pub struct Scene<W: SimulationWorld = Space> {
    world: W,
    config: SceneConfig,
    swings: Vec<(RigId, Swing)>,
    stickmen: Vec<(RigId, Stickman)>,
    next_id: u32,
    ticks: u64,
}

impl Scene<Space> {
    pub fn new(config: SceneConfig) -> Self {
        Self::with_world(Space::new().with_gravity(config.gravity), config)
    }
}

impl Default for Scene<Space> {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl<W: SimulationWorld> Scene<W> {
    /// Wraps an existing world. The world keeps its own gravity.
    pub fn with_world(world: W, config: SceneConfig) -> Self {
        Self {
            world,
            config,
            swings: Vec::new(),
            stickmen: Vec::new(),
            next_id: 0,
            ticks: 0,
        }
    }

    /// Collision group of rig `id`. Group 0 means "no group", so rigs start
    /// at 1.
    fn group_for(id: RigId) -> u32 {
        id.0 + 1
    }

    fn allocate(&mut self) -> RigId {
        let id = RigId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_swing(&mut self, config: &SwingConfig, start_position: Vec2) -> Result<RigId> {
        let id = self.allocate();
        let swing = Swing::create(config, &mut self.world, start_position, Self::group_for(id))?;
        self.swings.push((id, swing));
        Ok(id)
    }

    pub fn add_stickman(&mut self, config: &StickmanConfig, start_position: Vec2) -> Result<RigId> {
        let id = self.allocate();
        let stickman =
            Stickman::create(config, &mut self.world, start_position, Self::group_for(id))?;
        self.stickmen.push((id, stickman));
        Ok(id)
    }

    pub fn swing(&self, id: RigId) -> Option<&Swing> {
        self.swings.iter().find(|(i, _)| *i == id).map(|(_, s)| s)
    }

    pub fn stickman(&self, id: RigId) -> Option<&Stickman> {
        self.stickmen.iter().find(|(i, _)| *i == id).map(|(_, s)| s)
    }

    pub fn swings(&self) -> impl Iterator<Item = &Swing> {
        self.swings.iter().map(|(_, s)| s)
    }

    pub fn stickmen(&self) -> impl Iterator<Item = &Stickman> {
        self.stickmen.iter().map(|(_, s)| s)
    }

    pub fn rig_count(&self) -> usize {
        self.swings.len() + self.stickmen.len()
    }

    /// Removes a rig of either kind. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: RigId) -> bool {
        if let Some(at) = self.swings.iter().position(|(i, _)| *i == id) {
            let (_, swing) = self.swings.swap_remove(at);
            debug!("removing swing {:?}", id);
            swing.remove(&mut self.world);
            return true;
        }
        if let Some(at) = self.stickmen.iter().position(|(i, _)| *i == id) {
            let (_, stickman) = self.stickmen.swap_remove(at);
            debug!("removing stickman {:?}", id);
            stickman.remove(&mut self.world);
            return true;
        }
        false
    }

    /// Applies drag on every segment of every rig without stepping.
    pub fn apply_drag(&mut self) -> Result<()> {
        for (_, swing) in &self.swings {
            swing.update(&mut self.world)?;
        }
        for (_, stickman) in &self.stickmen {
            stickman.update(&mut self.world)?;
        }
        Ok(())
    }

    /// One frame: drag on everything, then a single integration step.
    pub fn tick(&mut self) -> Result<()> {
        self.apply_drag()?;
        let dt = self.config.timestep();
        self.world.integrate(dt);
        self.ticks += 1;
        trace!("tick {} (dt {:.5})", self.ticks, dt);
        Ok(())
    }

    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Tears down every rig and hands the world back.
    pub fn into_world(mut self) -> W {
        for (_, swing) in self.swings.drain(..) {
            swing.remove(&mut self.world);
        }
        for (_, stickman) in self.stickmen.drain(..) {
            stickman.remove(&mut self.world);
        }
        self.world
    }
}
