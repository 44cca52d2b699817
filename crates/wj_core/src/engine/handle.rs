//! Opaque handles to engine-side resources
//!
//! The core only ever stores the raw id the engine hands back; what the id
//! refers to (a GPU mesh, a physics body, a socket) is the engine's business.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU64;

/// Discriminant for every resource family the engine manages.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Window = 0,
    Mesh = 1,
    Material = 2,
    Camera = 3,
    Light = 4,
    PhysicsBody = 5,
    AudioSource = 6,
    Connection = 7,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Window => "window",
            Self::Mesh => "mesh",
            Self::Material => "material",
            Self::Camera => "camera",
            Self::Light => "light",
            Self::PhysicsBody => "physics body",
            Self::AudioSource => "audio source",
            Self::Connection => "connection",
        };
        f.write_str(name)
    }
}

/// Type-level tag tying a [`Handle`] to its [`ResourceType`].
pub trait ResourceKind: 'static {
    const TYPE: ResourceType;
}

/// Uninhabited marker types, one per resource family.
pub mod kind {
    use super::{ResourceKind, ResourceType};

    macro_rules! resource_kinds {
        ($($name:ident),+ $(,)?) => {
            $(
                #[derive(Debug)]
                pub enum $name {}

                impl ResourceKind for $name {
                    const TYPE: ResourceType = ResourceType::$name;
                }
            )+
        };
    }

    resource_kinds!(Window, Mesh, Material, Camera, Light, PhysicsBody, AudioSource, Connection);
}

/// Typed opaque handle. Raw id `0` is reserved by the engine for failure, so
/// a live handle is never zero.
pub struct Handle<K: ResourceKind> {
    raw: NonZeroU64,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Handle<K> {
    /// Wrap a raw id returned by the engine; `None` for the failure value `0`.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(|raw| Self {
            raw,
            _kind: PhantomData,
        })
    }

    #[inline]
    pub fn raw(&self) -> u64 {
        self.raw.get()
    }

    #[inline]
    pub fn resource_type(&self) -> ResourceType {
        K::TYPE
    }
}

impl<K: ResourceKind> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: ResourceKind> Copy for Handle<K> {}

impl<K: ResourceKind> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K: ResourceKind> Eq for Handle<K> {}

impl<K: ResourceKind> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: ResourceKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({})", K::TYPE, self.raw)
    }
}

pub type WindowHandle = Handle<kind::Window>;
pub type MeshHandle = Handle<kind::Mesh>;
pub type MaterialHandle = Handle<kind::Material>;
pub type CameraHandle = Handle<kind::Camera>;
pub type LightHandle = Handle<kind::Light>;
pub type PhysicsBodyHandle = Handle<kind::PhysicsBody>;
pub type AudioSourceHandle = Handle<kind::AudioSource>;
pub type ConnectionHandle = Handle<kind::Connection>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_never_a_handle() {
        assert!(MeshHandle::from_raw(0).is_none());
        let mesh = MeshHandle::from_raw(9).unwrap();
        assert_eq!(mesh.raw(), 9);
        assert_eq!(mesh.resource_type(), ResourceType::Mesh);
    }

    #[test]
    fn debug_names_the_resource_family() {
        let body = PhysicsBodyHandle::from_raw(3).unwrap();
        assert_eq!(format!("{body:?}"), "Handle<physics body>(3)");
    }
}
