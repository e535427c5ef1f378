//! # swingset
//!
//! Procedural 2D rigs for a rigid-body world: a hanging chain of discs (the
//! swing) and an eight-part jointed humanoid (the stickman). Every segment
//! feels quadratic air drag each tick.
//!
//! ## Features
//! - Segments: capsule limbs, disc links and an offset-disc head
//! - Pin and limited-rotary joints, optionally motorised
//! - Quadratic drag, `F = -k * |v| * v`
//! - A small position-based reference world (`Space`) behind the
//!   `SimulationWorld` trait
//! - JSON configuration
//!
//! ## Example
//! ```rust,ignore
//! use swingset::{Scene, SceneConfig, StickmanConfig, SwingConfig};
//! use glam::Vec2;
//!
//! let mut scene = Scene::new(SceneConfig::default());
//! let swing = scene.add_swing(&SwingConfig::default(), Vec2::new(400.0, 0.0))?;
//! scene.add_stickman(&StickmanConfig::default(), Vec2::new(100.0, 500.0))?;
//!
//! scene.run(60)?;
//! let seat = scene.swing(swing).unwrap().seat().position(scene.world())?;
//! println!("seat after one second: {seat}");
//! ```

pub mod assembly;
pub mod chain;
pub mod config;
pub mod error;
pub mod joint;
pub mod math;
pub mod scene;
pub mod segment;
pub mod world;

pub use assembly::{Assembly, BodyPart, LimbStacking, Stickman, Swing};
pub use config::{Config, HeadConfig, LimbConfig, SceneConfig, StickmanConfig, SwingConfig};
pub use error::{Result, SwingsetError};
pub use joint::{Joint, JointKind, JointSet};
pub use math::{direction, Transform};
pub use scene::{RigId, Scene};
pub use segment::{AngleLimits, DragModel, Segment, SegmentConfig, SegmentShape};
pub use world::{SimulationWorld, Space};
