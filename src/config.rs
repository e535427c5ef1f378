//! Configuration values for rigs and the scene, deserializable from JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::assembly::LimbStacking;
use crate::error::{Result, SwingsetError};
use crate::joint::JointKind;
use crate::segment::{AngleLimits, DragModel, SegmentConfig};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingConfig {
    /// Degrees; every link is laid out along this angle.
    pub start_angle: f32,
    pub num_links: u32,
    pub link_length: f32,
    pub link_mass: f32,
    pub link_radius: f32,
    #[serde(default)]
    pub drag: DragModel,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            start_angle: 150.0,
            num_links: 10,
            link_length: 15.0,
            link_mass: 1.0,
            link_radius: 2.0,
            drag: DragModel::AIR,
        }
    }
}

impl SwingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_links < 1 {
            return Err(SwingsetError::NoLinks(self.num_links));
        }
        if !self.link_length.is_finite() || self.link_length <= 0.0 {
            return Err(SwingsetError::InvalidExtent(self.link_length));
        }
        self.link(0).validate()
    }

    /// Segment description shared by every link.
    pub fn link(&self, collision_group: u32) -> SegmentConfig {
        SegmentConfig::disc(self.link_radius, self.link_mass)
            .with_start_angle(self.start_angle)
            .with_collision_group(collision_group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadConfig {
    pub radius: f32,
    pub mass: f32,
    pub start_angle: f32,
    pub angle_constraints: AngleLimits,
}

impl HeadConfig {
    pub fn segment(&self, collision_group: u32) -> SegmentConfig {
        SegmentConfig::offset_disc(self.radius, self.mass)
            .with_start_angle(self.start_angle)
            .with_angle_constraints(self.angle_constraints)
            .with_collision_group(collision_group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbConfig {
    pub length: f32,
    pub mass: f32,
    pub start_angle: f32,
    pub angle_constraints: AngleLimits,
}

impl LimbConfig {
    pub fn new(length: f32, mass: f32, start_angle: f32, angle_constraints: AngleLimits) -> Self {
        Self {
            length,
            mass,
            start_angle,
            angle_constraints,
        }
    }

    pub fn segment(&self, collision_group: u32) -> SegmentConfig {
        SegmentConfig::capsule(self.length, self.mass)
            .with_start_angle(self.start_angle)
            .with_angle_constraints(self.angle_constraints)
            .with_collision_group(collision_group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StickmanConfig {
    pub head: HeadConfig,
    pub neck: LimbConfig,
    pub upper_arm: LimbConfig,
    pub lower_arm: LimbConfig,
    pub torso: LimbConfig,
    pub upper_leg: LimbConfig,
    pub lower_leg: LimbConfig,
    pub foot: LimbConfig,
    #[serde(default)]
    pub drag: DragModel,
    #[serde(default)]
    pub joint_kind: JointKind,
    #[serde(default)]
    pub stacking: LimbStacking,
}

impl Default for StickmanConfig {
    fn default() -> Self {
        let limits = AngleLimits::new(-45.0, 45.0);
        Self {
            head: HeadConfig {
                radius: 10.0,
                mass: 5.0,
                start_angle: 0.0,
                angle_constraints: limits,
            },
            neck: LimbConfig::new(10.0, 1.0, 0.0, limits),
            upper_arm: LimbConfig::new(45.0, 2.0, 135.0, AngleLimits::new(-90.0, 180.0)),
            lower_arm: LimbConfig::new(40.0, 1.5, 90.0, AngleLimits::new(0.0, 150.0)),
            torso: LimbConfig::new(100.0, 20.0, 0.0, limits),
            upper_leg: LimbConfig::new(80.0, 8.0, 90.0, AngleLimits::new(-30.0, 120.0)),
            lower_leg: LimbConfig::new(80.0, 5.0, 0.0, AngleLimits::new(-150.0, 0.0)),
            foot: LimbConfig::new(20.0, 1.0, 90.0, AngleLimits::new(-20.0, 20.0)),
            drag: DragModel::AIR,
            joint_kind: JointKind::Pin,
            stacking: LimbStacking::Stepped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Ticks per simulated second.
    pub fps: u32,
    pub gravity: Vec2,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            gravity: Vec2::new(0.0, 900.0),
        }
    }
}

impl SceneConfig {
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    #[must_use]
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity.
    #[must_use]
    pub fn zero_gravity(mut self) -> Self {
        self.gravity = Vec2::ZERO;
        self
    }

    /// Seconds per tick. Zero fps is treated as one tick per second.
    pub fn timestep(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

/// Everything the demo needs: one swing layout, one stickman layout and the
/// scene settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    pub swing: SwingConfig,
    pub stickman: StickmanConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reads `swing.json`, `stickman.json` and, if present, `scene.json`
    /// from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let swing = serde_json::from_str(&fs::read_to_string(dir.join("swing.json"))?)?;
        let stickman = serde_json::from_str(&fs::read_to_string(dir.join("stickman.json"))?)?;
        let scene_path = dir.join("scene.json");
        let scene = if scene_path.exists() {
            serde_json::from_str(&fs::read_to_string(scene_path)?)?
        } else {
            SceneConfig::default()
        };
        Ok(Self {
            swing,
            stickman,
            scene,
        })
    }
}
