//! Engine capability interface
//!
//! The core never renders, simulates physics, mixes audio or opens sockets.
//! It reaches a native engine through [`NativeEngine`], wrapped by
//! [`EngineHandle`] which translates status codes into [`EngineError`]s.
//! Resources live engine-side and are referenced only by [`Handle`].

mod client;
mod error;
mod ffi;
mod handle;
mod native;
mod null;
mod sync;

pub use client::EngineHandle;
pub use error::{EngineError, EngineVersion};
pub use ffi::{RawColor, RawQuat, RawTransform, RawVec2, RawVec3, RawVec4, RawVersion};
pub use handle::{
    kind, AudioSourceHandle, CameraHandle, ConnectionHandle, Handle, LightHandle, MaterialHandle,
    MeshHandle, PhysicsBodyHandle, ResourceKind, ResourceType, WindowHandle,
};
pub use native::{MeshShape, NativeEngine, ResourceDesc, Status};
pub use null::NullEngine;
pub use sync::{sync_transforms, TransformSync};
