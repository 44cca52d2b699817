//! Entity Component System core types.
//!
//! Entities are generational ids handed out by the [`EntityRegistry`].
//! Components belong to a closed set of kinds, each with its own typed
//! [`ComponentStore`]; the [`World`] owns the registry and every store.
//! Entities may form a parent/child tree whose world matrices are
//! propagated from the roots down.
//! Systems are ordered callables grouped into startup, update and shutdown
//! phases.

mod builder;
mod component;
mod components;
mod entity;
mod hierarchy;
mod query;
mod registry;
mod storage;
mod system;
mod system_descriptor;
mod system_registry;
mod world;

pub use builder::EntityBuilder;
pub use component::Component;
pub use components::{
    AudioEmitter, BodyType, Camera, Children, ComponentKind, Components, GlobalTransform, Light,
    LightKind, MeshRenderer, Name, Parent, RigidBody, Sprite, Transform, Transform2D, Velocity,
};
pub use entity::Entity;
pub use hierarchy::TransformPropagation;
pub use registry::EntityRegistry;
pub use storage::ComponentStore;
pub use system::{system_fn, FnSystem, Phase, QuitHandle, System, SystemContext};
pub use system_descriptor::{SystemDescriptor, SystemId};
pub use system_registry::SystemFailure;
pub(crate) use system_registry::{PhaseOutcome, SystemRegistry};
pub use world::World;
