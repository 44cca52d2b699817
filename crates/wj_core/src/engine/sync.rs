//! Explicit world → engine mirroring

use crate::ecs::{GlobalTransform, RigidBody, System, SystemContext, Transform, World};
use crate::engine::{EngineError, EngineHandle};
use crate::error::Result;

/// Push the transform of every entity whose `RigidBody` has an engine-side
/// body. Entities with a [`GlobalTransform`] push their world-space value,
/// the rest their local `Transform`. Returns how many transforms were pushed.
pub fn sync_transforms(world: &World, engine: &mut EngineHandle) -> Result<usize, EngineError> {
    let mut pushed = 0;
    for (entity, transform, body) in world.query2::<Transform, RigidBody>() {
        if let Some(handle) = body.body {
            let global = world.get::<GlobalTransform>(entity).ok().flatten();
            match global {
                Some(global) => engine.push_transform(handle, &global.to_transform())?,
                None => engine.push_transform(handle, transform)?,
            }
            pushed += 1;
        }
    }
    Ok(pushed)
}

/// [`sync_transforms`] as an update system; register it after whatever
/// moves the transforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformSync;

impl System for TransformSync {
    fn name(&self) -> &str {
        "transform_sync"
    }

    fn execute(&mut self, ctx: &mut SystemContext<'_>) -> Result<()> {
        let pushed = sync_transforms(ctx.world, ctx.engine)?;
        tracing::trace!(pushed, "synchronized transforms");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NativeEngine, NullEngine, RawTransform, RawVersion, ResourceDesc, ResourceType, Status};
    use crate::math::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Null engine that records every pushed transform.
    struct Recording {
        inner: NullEngine,
        pushed: Rc<RefCell<Vec<(u64, RawTransform)>>>,
    }

    impl NativeEngine for Recording {
        fn version(&self) -> RawVersion {
            self.inner.version()
        }
        fn name(&self) -> &str {
            "recording"
        }
        fn initialize(&mut self) -> Status {
            self.inner.initialize()
        }
        fn begin_frame(&mut self, delta_seconds: f32) -> Status {
            self.inner.begin_frame(delta_seconds)
        }
        fn end_frame(&mut self) -> Status {
            self.inner.end_frame()
        }
        fn close_requested(&self) -> bool {
            false
        }
        fn shutdown(&mut self) -> Status {
            self.inner.shutdown()
        }
        fn create(&mut self, desc: &ResourceDesc) -> u64 {
            self.inner.create(desc)
        }
        fn destroy(&mut self, kind: ResourceType, raw: u64) -> Status {
            self.inner.destroy(kind, raw)
        }
        fn push_transform(&mut self, raw: u64, transform: RawTransform) -> Status {
            self.pushed.borrow_mut().push((raw, transform));
            self.inner.push_transform(raw, transform)
        }
        fn take_last_error(&mut self) -> Option<String> {
            self.inner.take_last_error()
        }
    }

    #[test]
    fn pushes_only_bodies_with_engine_handles() {
        let pushed = Rc::new(RefCell::new(Vec::new()));
        let mut engine = EngineHandle::new(Recording {
            inner: NullEngine::new(),
            pushed: Rc::clone(&pushed),
        });
        let mut world = World::new();

        let mut body = RigidBody::default();
        body.body = Some(engine.create_physics_body(&body).unwrap());
        crate::spawn!(world, Transform::at(Vec3::Y), body).unwrap();
        crate::spawn!(world, Transform::default(), RigidBody::default()).unwrap();
        crate::spawn!(world, Transform::default()).unwrap();

        assert_eq!(sync_transforms(&world, &mut engine).unwrap(), 1);
        let pushed = pushed.borrow();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].0, 1);
        assert_eq!(Vec3::from(pushed[0].1.position), Vec3::Y);
    }

    #[test]
    fn parented_bodies_push_world_space() {
        let pushed = Rc::new(RefCell::new(Vec::new()));
        let mut engine = EngineHandle::new(Recording {
            inner: NullEngine::new(),
            pushed: Rc::clone(&pushed),
        });
        let mut world = World::new();

        let mut body = RigidBody::default();
        body.body = Some(engine.create_physics_body(&body).unwrap());
        let ship = crate::spawn!(world, Transform::at(Vec3::new(4.0, 0.0, 0.0))).unwrap();
        let turret = crate::spawn!(world, Transform::at(Vec3::Y), body).unwrap();
        world.set_parent(turret, ship).unwrap();
        world.update_transforms();

        sync_transforms(&world, &mut engine).unwrap();
        let pushed = pushed.borrow();
        assert_eq!(Vec3::from(pushed[0].1.position), Vec3::new(4.0, 1.0, 0.0));
    }

    #[test]
    fn destroyed_body_surfaces_engine_error() {
        let mut engine = EngineHandle::null();
        let mut world = World::new();
        let handle = engine.create_physics_body(&RigidBody::default()).unwrap();
        engine.destroy(handle).unwrap();

        let body = RigidBody {
            body: Some(handle),
            ..RigidBody::default()
        };
        crate::spawn!(world, Transform::default(), body).unwrap();

        let err = sync_transforms(&world, &mut engine).unwrap_err();
        assert_eq!(err.status, Status::InvalidHandle);
    }
}
