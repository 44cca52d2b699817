// client.rs - Typed, error-translating front for a native engine

use crate::ecs::{Camera, Light, LightKind, RigidBody, BodyType, Transform};
use crate::engine::{
    AudioSourceHandle, CameraHandle, ConnectionHandle, EngineError, EngineVersion, Handle,
    LightHandle, MaterialHandle, MeshHandle, MeshShape, NativeEngine, NullEngine,
    PhysicsBodyHandle, RawTransform, ResourceDesc, ResourceKind, Status, WindowHandle,
};
use crate::math::Color;
use crate::time::Time;
use std::fmt;

type EngineResult<T> = Result<T, EngineError>;

/// The engine an [`App`](crate::App) talks to.
///
/// Every fallible native call is checked here: a non-`Ok` status or a zero
/// handle becomes an [`EngineError`] carrying the engine's last-error text.
pub struct EngineHandle {
    native: Box<dyn NativeEngine>,
}

impl EngineHandle {
    pub fn new(native: impl NativeEngine + 'static) -> Self {
        Self {
            native: Box::new(native),
        }
    }

    /// Handle over a [`NullEngine`].
    pub fn null() -> Self {
        Self::new(NullEngine::new())
    }

    pub fn name(&self) -> &str {
        self.native.name()
    }

    pub fn version(&self) -> EngineVersion {
        self.native.version().into()
    }

    pub fn close_requested(&self) -> bool {
        self.native.close_requested()
    }

    pub fn initialize(&mut self) -> EngineResult<()> {
        let status = self.native.initialize();
        self.check("initialize", status)
    }

    pub fn begin_frame(&mut self, time: &Time) -> EngineResult<()> {
        let status = self.native.begin_frame(time.delta_seconds());
        self.check("begin frame", status)
    }

    pub fn end_frame(&mut self) -> EngineResult<()> {
        let status = self.native.end_frame();
        self.check("end frame", status)
    }

    pub fn shutdown(&mut self) -> EngineResult<()> {
        let status = self.native.shutdown();
        self.check("shutdown", status)
    }

    /// Create a resource of kind `K` from `desc`.
    pub fn create<K: ResourceKind>(&mut self, desc: &ResourceDesc) -> EngineResult<Handle<K>> {
        let operation = format!("create {}", K::TYPE);
        if desc.resource_type() != K::TYPE {
            return Err(EngineError::new(
                operation,
                Status::InvalidArgument,
                format!("expected {} parameters, got {}", K::TYPE, desc.resource_type()),
            ));
        }

        let raw = self.native.create(desc);
        Handle::from_raw(raw).ok_or_else(|| {
            let message = self.last_error_or("engine returned a null handle");
            EngineError::new(operation, Status::OperationFailed, message)
        })
    }

    pub fn create_window(&mut self, title: &str, width: u32, height: u32) -> EngineResult<WindowHandle> {
        self.create(&ResourceDesc::Window {
            title: title.to_string(),
            width,
            height,
        })
    }

    pub fn create_mesh(&mut self, shape: MeshShape) -> EngineResult<MeshHandle> {
        self.create(&ResourceDesc::Mesh(shape))
    }

    /// PBR material.
    pub fn create_material(&mut self, albedo: Color, metallic: f32, roughness: f32) -> EngineResult<MaterialHandle> {
        self.create(&ResourceDesc::Material {
            albedo: albedo.into(),
            metallic,
            roughness,
            emissive: Color::BLACK.into(),
        })
    }

    pub fn create_camera(&mut self, camera: &Camera, transform: &Transform) -> EngineResult<CameraHandle> {
        self.create(&ResourceDesc::Camera {
            position: transform.position.into(),
            look_at: camera.look_at.into(),
            fov: camera.fov,
            near: camera.near,
            far: camera.far,
        })
    }

    pub fn create_light(&mut self, light: &Light) -> EngineResult<LightHandle> {
        self.create(&ResourceDesc::Light {
            directional: light.kind == LightKind::Directional,
            color: light.color.into(),
            intensity: light.intensity,
            range: light.range,
        })
    }

    pub fn create_physics_body(&mut self, body: &RigidBody) -> EngineResult<PhysicsBodyHandle> {
        self.create(&ResourceDesc::PhysicsBody {
            mass: body.mass,
            restitution: body.restitution,
            friction: body.friction,
            fixed: body.body_type == BodyType::Static,
        })
    }

    pub fn create_audio_source(&mut self, path: &str) -> EngineResult<AudioSourceHandle> {
        self.create(&ResourceDesc::AudioSource {
            path: path.to_string(),
        })
    }

    pub fn connect(&mut self, address: &str) -> EngineResult<ConnectionHandle> {
        self.create(&ResourceDesc::Connection {
            address: address.to_string(),
        })
    }

    pub fn destroy<K: ResourceKind>(&mut self, handle: Handle<K>) -> EngineResult<()> {
        let status = self.native.destroy(K::TYPE, handle.raw());
        self.check(&format!("destroy {}", K::TYPE), status)
    }

    /// Mirror `transform` onto the engine-side resource behind `handle`.
    pub fn push_transform<K: ResourceKind>(&mut self, handle: Handle<K>, transform: &Transform) -> EngineResult<()> {
        let status = self.native.push_transform(handle.raw(), RawTransform::from(transform));
        self.check("push transform", status)
    }

    fn check(&mut self, operation: &str, status: Status) -> EngineResult<()> {
        if status.is_ok() {
            // a stale message belongs to no one
            self.native.take_last_error();
            return Ok(());
        }
        let message = self.last_error_or("no detail reported");
        Err(EngineError::new(operation, status, message))
    }

    fn last_error_or(&mut self, fallback: &str) -> String {
        self.native
            .take_last_error()
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("name", &self.name())
            .field("version", &self.version())
            .finish()
    }
}
