use glam::Vec2;

/// Direction that `direction(0.0)` points along: straight down the y axis.
pub const REFERENCE_AXIS: Vec2 = Vec2::NEG_Y;

/// Unit vector for an angle in degrees, measured from [`REFERENCE_AXIS`].
///
/// Positive angles turn counter-clockwise in a y-up frame, which is the same
/// convention [`rotate`] and body orientation use. Expanded this is
/// `(sin a, -cos a)`.
pub fn direction(angle_degrees: f32) -> Vec2 {
    rotate(REFERENCE_AXIS, angle_degrees.to_radians())
}

/// Rotates `v` by `angle` radians.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
