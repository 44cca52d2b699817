//! Windjammer Core
//!
//! The entity-component-system world model and its per-frame execution
//! pipeline:
//! - Math primitives (glam plus [`math::Color`])
//! - Entity registry, component stores, world and queries
//! - System scheduler and the [`App`] loop
//! - Capability interface to the native engine

pub mod app;
pub mod config;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod math;
pub mod time;

pub use glam;

pub use app::{App, RunReport};
pub use config::{AppConfig, FailurePolicy, RunMode, TimeStep};
pub use error::{Error, Result};
pub use time::Time;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything a typical game module needs.
pub mod prelude {
    pub use crate::app::{App, RunReport};
    pub use crate::config::{AppConfig, FailurePolicy, RunMode, TimeStep};
    pub use crate::ecs::{
        system_fn, AudioEmitter, BodyType, Camera, Children, Component, ComponentKind, Entity,
        GlobalTransform, Light, LightKind, MeshRenderer, Name, Parent, Phase, QuitHandle,
        RigidBody, Sprite, System, SystemContext, Transform, Transform2D, TransformPropagation,
        Velocity, World,
    };
    pub use crate::engine::{EngineHandle, MeshShape, NullEngine, TransformSync};
    pub use crate::error::{Error, Result};
    pub use crate::math::{Color, Quat, Vec2, Vec3, Vec4};
    pub use crate::spawn;
    pub use crate::time::Time;
}
