//! Math primitives
//!
//! Re-exports glam for vectors, quaternions and matrices, and adds the RGBA
//! [`Color`] value type the engine boundary expects.

pub use glam::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear RGBA color with `f32` channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Component-wise linear interpolation; `t` is clamped to `0..=1`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::from(Vec4::from(self).lerp(Vec4::from(other), t))
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({:?}, {:?}, {:?}, {:?})", self.r, self.g, self.b, self.a)
    }
}

/// `Vec3(x, y, z)` rendering used in diagnostics.
pub fn display_vec3(v: Vec3) -> String {
    format!("Vec3({:?}, {:?}, {:?})", v.x, v.y, v.z)
}

/// `Vec2(x, y)` rendering used in diagnostics.
pub fn display_vec2(v: Vec2) -> String {
    format!("Vec2({:?}, {:?})", v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_defaults_to_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::rgb(0.5, 0.5, 0.5).a, 1.0);
    }

    #[test]
    fn color_lerp_clamps() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(mid, Color::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 4.0), Color::WHITE);
    }

    #[test]
    fn color_converts_through_vec4() {
        let c = Color::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(Color::from(Vec4::from(c)), c);
        assert_eq!(Color::from_array(c.to_array()), c);
    }

    #[test]
    fn display_matches_sdk_repr() {
        assert_eq!(display_vec2(Vec2::new(1.0, 2.0)), "Vec2(1.0, 2.0)");
        assert_eq!(display_vec3(Vec3::new(1.0, 2.0, 3.0)), "Vec3(1.0, 2.0, 3.0)");
        assert_eq!(Color::RED.to_string(), "Color(1.0, 0.0, 0.0, 1.0)");
    }
}
