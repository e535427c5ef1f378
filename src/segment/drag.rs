use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Quadratic air-resistance model: `F = -v̂ · k · |v|²` with
/// `k = air_density · drag_coefficient · area / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragModel {
    pub air_density: f32,
    pub drag_coefficient: f32,
}

impl Default for DragModel {
    fn default() -> Self {
        Self::AIR
    }
}

impl DragModel {
    pub const AIR: Self = Self {
        air_density: 0.45,
        drag_coefficient: 0.025,
    };

    /// No drag at all.
    pub const NONE: Self = Self {
        air_density: 0.0,
        drag_coefficient: 0.0,
    };

    pub fn new(air_density: f32, drag_coefficient: f32) -> Self {
        Self {
            air_density,
            drag_coefficient,
        }
    }

    /// The `k` factor for a cross-section of `area`.
    pub fn coefficient(&self, area: f32) -> f32 {
        self.air_density * self.drag_coefficient * area / 2.0
    }

    /// Drag on a body of cross-section `area` moving at `velocity`.
    /// Zero velocity gives zero force.
    pub fn force(&self, area: f32, velocity: Vec2) -> Vec2 {
        let speed = velocity.length();
        if speed <= f32::EPSILON {
            return Vec2::ZERO;
        }
        let direction = velocity / speed;
        -direction * self.coefficient(area) * speed * speed
    }
}
