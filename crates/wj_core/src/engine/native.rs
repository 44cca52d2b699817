// native.rs - Raw capability surface of a native engine
//
// Mirrors the C boundary: calls return a status code or a raw handle where 0
// means failure, and detail is left in a last-error slot that is read once
// and cleared. `EngineHandle` turns all of this into `EngineError`s.

use crate::engine::{RawColor, RawTransform, RawVec3, RawVersion, ResourceType};
use std::fmt;

/// Result code of a native call.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok = 0,
    NullPointer = 1,
    InvalidHandle = 2,
    OutOfMemory = 3,
    InvalidArgument = 4,
    OperationFailed = 5,
    Panic = 6,
}

impl Status {
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    /// Decode a raw code; unknown values map to `OperationFailed`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Status::Ok,
            1 => Status::NullPointer,
            2 => Status::InvalidHandle,
            3 => Status::OutOfMemory,
            4 => Status::InvalidArgument,
            6 => Status::Panic,
            _ => Status::OperationFailed,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "ok",
            Status::NullPointer => "null pointer",
            Status::InvalidHandle => "invalid handle",
            Status::OutOfMemory => "out of memory",
            Status::InvalidArgument => "invalid argument",
            Status::OperationFailed => "operation failed",
            Status::Panic => "panic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    Cube { size: f32 },
    Sphere { radius: f32, subdivisions: u32 },
    Plane { size: f32 },
}

/// Creation parameters, one variant per resource family.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceDesc {
    Window {
        title: String,
        width: u32,
        height: u32,
    },
    Mesh(MeshShape),
    /// PBR material.
    Material {
        albedo: RawColor,
        metallic: f32,
        roughness: f32,
        emissive: RawColor,
    },
    Camera {
        position: RawVec3,
        look_at: RawVec3,
        fov: f32,
        near: f32,
        far: f32,
    },
    Light {
        directional: bool,
        color: RawColor,
        intensity: f32,
        range: f32,
    },
    PhysicsBody {
        mass: f32,
        restitution: f32,
        friction: f32,
        fixed: bool,
    },
    AudioSource {
        path: String,
    },
    Connection {
        address: String,
    },
}

impl ResourceDesc {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceDesc::Window { .. } => ResourceType::Window,
            ResourceDesc::Mesh(_) => ResourceType::Mesh,
            ResourceDesc::Material { .. } => ResourceType::Material,
            ResourceDesc::Camera { .. } => ResourceType::Camera,
            ResourceDesc::Light { .. } => ResourceType::Light,
            ResourceDesc::PhysicsBody { .. } => ResourceType::PhysicsBody,
            ResourceDesc::AudioSource { .. } => ResourceType::AudioSource,
            ResourceDesc::Connection { .. } => ResourceType::Connection,
        }
    }

    /// Default PBR material with the given albedo.
    pub fn material(albedo: RawColor) -> Self {
        ResourceDesc::Material {
            albedo,
            metallic: 0.0,
            roughness: 0.5,
            emissive: RawColor {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
        }
    }
}

/// The native engine as the core sees it.
///
/// Any method that can fail leaves a message retrievable through
/// [`NativeEngine::take_last_error`] until the next call takes it.
pub trait NativeEngine {
    fn version(&self) -> RawVersion;

    fn name(&self) -> &str;

    fn initialize(&mut self) -> Status;

    fn begin_frame(&mut self, delta_seconds: f32) -> Status;

    fn end_frame(&mut self) -> Status;

    /// Whether the host wants the application to stop (window closed, etc.).
    fn close_requested(&self) -> bool;

    fn shutdown(&mut self) -> Status;

    /// Create a resource and return its raw id, or `0` on failure.
    fn create(&mut self, desc: &ResourceDesc) -> u64;

    fn destroy(&mut self, kind: ResourceType, raw: u64) -> Status;

    fn push_transform(&mut self, raw: u64, transform: RawTransform) -> Status;

    /// Return and clear the message left by the last failing call.
    fn take_last_error(&mut self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_are_operation_failures() {
        assert_eq!(Status::from_code(0), Status::Ok);
        assert_eq!(Status::from_code(2), Status::InvalidHandle);
        assert_eq!(Status::from_code(99), Status::OperationFailed);
        assert_eq!(Status::from_code(-1), Status::OperationFailed);
    }

    #[test]
    fn desc_reports_its_family() {
        let desc = ResourceDesc::Mesh(MeshShape::Cube { size: 1.0 });
        assert_eq!(desc.resource_type(), ResourceType::Mesh);
        assert_eq!(
            ResourceDesc::material(RawColor { r: 1.0, g: 0.0, b: 0.0, a: 1.0 }).resource_type(),
            ResourceType::Material
        );
    }
}
