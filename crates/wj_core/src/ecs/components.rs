//! Built-in component kinds
//!
//! Plain value types owned by the world's stores. Anything mirrored into the
//! native engine (a physics body, a mesh) is referenced by opaque handle and
//! synchronized explicitly, never through property side effects.

use crate::ecs::component::component_kinds;
use crate::ecs::Entity;
use crate::engine::{
    AudioSourceHandle, CameraHandle, LightHandle, MaterialHandle, MeshHandle, PhysicsBodyHandle,
};
use crate::math::{display_vec2, display_vec3, Color, Mat4, Quat, Vec2, Vec3};
use std::fmt;

component_kinds! {
    Transform => transforms,
    Transform2D => transforms_2d,
    Velocity => velocities,
    Sprite => sprites,
    RigidBody => rigid_bodies,
    Camera => cameras,
    Light => lights,
    MeshRenderer => mesh_renderers,
    AudioEmitter => audio_emitters,
    Name => names,
    Parent => parents,
    Children => children,
    GlobalTransform => global_transforms,
}

/// 3D position, rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity transform moved to `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Apply `rotation` on top of the current orientation.
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = (rotation * self.rotation).normalize();
    }

    /// Local -Z axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transform(position={}, scale={})",
            display_vec3(self.position),
            display_vec3(self.scale)
        )
    }
}

/// 2D position, rotation (radians) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform2D {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.rotation)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl fmt::Display for Transform2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transform2D(position={}, rotation={:?})",
            display_vec2(self.position),
            self.rotation
        )
    }
}

/// Linear and angular velocity, in units (radians) per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub linear: Vec3,
    pub angular: Vec3,
}

impl Velocity {
    pub fn linear(linear: Vec3) -> Self {
        Self {
            linear,
            angular: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub size: Vec2,
    pub color: Color,
    pub texture: Option<u32>,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Sprite {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            size: Vec2::ONE,
            color: Color::WHITE,
            texture: None,
            flip_x: false,
            flip_y: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyType {
    #[default]
    Dynamic,
    Static,
    Kinematic,
}

/// Physics body parameters. `body` is set once the engine has created the
/// native counterpart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub body_type: BodyType,
    pub mass: f32,
    /// Bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub body: Option<PhysicsBodyHandle>,
}

impl RigidBody {
    pub fn with_body_type(body_type: BodyType) -> Self {
        Self {
            body_type,
            ..Self::default()
        }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            mass: 1.0,
            restitution: 0.5,
            friction: 0.5,
            linear_damping: 0.0,
            angular_damping: 0.0,
            body: None,
        }
    }
}

/// Perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub look_at: Vec3,
    pub primary: bool,
    pub handle: Option<CameraHandle>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 1000.0,
            look_at: Vec3::ZERO,
            primary: true,
            handle: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightKind {
    #[default]
    Point,
    Directional,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    /// Falloff distance; ignored for directional lights
    pub range: f32,
    pub handle: Option<LightHandle>,
}

impl Light {
    pub fn point(color: Color, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            color,
            intensity,
            range,
            handle: None,
        }
    }

    pub fn directional(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            range: f32::INFINITY,
            ..Self::point(color, intensity, 0.0)
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::point(Color::WHITE, 1.0, 10.0)
    }
}

/// Mesh + material pair drawn at the entity's transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshRenderer {
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
    pub visible: bool,
}

impl MeshRenderer {
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            mesh,
            material,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioEmitter {
    pub source: AudioSourceHandle,
    pub volume: f32,
    pub looping: bool,
}

impl AudioEmitter {
    pub fn new(source: AudioSourceHandle) -> Self {
        Self {
            source,
            volume: 1.0,
            looping: false,
        }
    }
}

/// Human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Link from a child to its parent. Edited through
/// [`World::set_parent`](crate::ecs::World::set_parent) so both ends agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parent(pub Entity);

impl Parent {
    pub fn get(self) -> Entity {
        self.0
    }
}

/// Direct children in attach order. Never holds an entity twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Children(Vec<Entity>);

impl Children {
    pub fn as_slice(&self) -> &[Entity] {
        &self.0
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn add(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.0.push(entity);
        true
    }

    pub(crate) fn remove(&mut self, entity: Entity) -> bool {
        let before = self.0.len();
        self.0.retain(|&child| child != entity);
        self.0.len() != before
    }
}

/// World-space matrix of an entity, the product of every [`Transform`] on
/// its parent chain. Written by transform propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform {
    matrix: Mat4,
    /// Local transform the matrix was computed from.
    local: Transform,
    dirty: bool,
}

impl GlobalTransform {
    pub(crate) fn computed(matrix: Mat4, local: Transform) -> Self {
        Self {
            matrix,
            local,
            dirty: false,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// The world matrix split back into position, rotation and scale.
    pub fn to_transform(&self) -> Transform {
        let (scale, rotation, position) = self.matrix.to_scale_rotation_translation();
        Transform {
            position,
            rotation,
            scale,
        }
    }

    /// Needs recomputing on the next propagation pass.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Still valid for `local` under an unchanged parent.
    pub(crate) fn is_current(&self, local: &Transform) -> bool {
        !self.dirty && self.local == *local
    }
}

impl Default for GlobalTransform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
            local: Transform::IDENTITY,
            dirty: true,
        }
    }
}
