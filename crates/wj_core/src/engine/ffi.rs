//! Fixed-layout records passed by value across the native boundary
//!
//! Every record is `#[repr(C)]` plain old data: at most four `f32` lanes, no
//! padding, safe to reinterpret as bytes with `bytemuck`.

use crate::math::{Color, Quat, Vec2, Vec3, Vec4};
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct RawVec2 {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct RawVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct RawVec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RawQuat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RawColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Transform as pushed to the engine for a mirrored resource.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RawTransform {
    pub position: RawVec3,
    pub rotation: RawQuat,
    pub scale: RawVec3,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct RawVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl From<Vec2> for RawVec2 {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<RawVec2> for Vec2 {
    fn from(v: RawVec2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Vec3> for RawVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<RawVec3> for Vec3 {
    fn from(v: RawVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec4> for RawVec4 {
    fn from(v: Vec4) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: v.w,
        }
    }
}

impl From<RawVec4> for Vec4 {
    fn from(v: RawVec4) -> Self {
        Vec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Quat> for RawQuat {
    fn from(q: Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<RawQuat> for Quat {
    fn from(q: RawQuat) -> Self {
        Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<Color> for RawColor {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

impl From<RawColor> for Color {
    fn from(c: RawColor) -> Self {
        Color::new(c.r, c.g, c.b, c.a)
    }
}

impl From<&crate::ecs::Transform> for RawTransform {
    fn from(t: &crate::ecs::Transform) -> Self {
        Self {
            position: t.position.into(),
            rotation: t.rotation.into(),
            scale: t.scale.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Transform;

    #[test]
    fn records_have_c_layout_sizes() {
        assert_eq!(std::mem::size_of::<RawVec2>(), 8);
        assert_eq!(std::mem::size_of::<RawVec3>(), 12);
        assert_eq!(std::mem::size_of::<RawColor>(), 16);
        assert_eq!(std::mem::size_of::<RawTransform>(), 40);
        assert_eq!(std::mem::size_of::<RawVersion>(), 12);
    }

    #[test]
    fn transform_marshals_as_ten_floats() {
        let transform = Transform::at(Vec3::new(1.0, 2.0, 3.0));
        let raw = RawTransform::from(&transform);
        let lanes: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&raw));
        assert_eq!(lanes, &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn color_converts_losslessly() {
        let color = Color::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(Color::from(RawColor::from(color)), color);
    }
}
