//! Demo scene: a handful of bouncing bodies above a ground plane.

use wj_core::ecs::{
    system_fn, AudioEmitter, BodyType, Camera, Entity, Light, MeshRenderer, Name, RigidBody,
    System, SystemContext, Transform, Velocity,
};
use wj_core::engine::MeshShape;
use wj_core::math::{Color, Quat, Vec3};
use wj_core::{spawn, Result};
use std::collections::HashSet;

const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
const BODIES: usize = 5;

/// Startup system building the scene. Emitters play at `master_volume`.
pub fn setup(master_volume: f32) -> impl System {
    system_fn("setup_scene", move |ctx| {
        let engine = &mut *ctx.engine;
        let world = &mut *ctx.world;

        let camera = Camera::default();
        let camera_transform = Transform::at(Vec3::new(0.0, 5.0, 10.0));
        let camera = Camera {
            handle: Some(engine.create_camera(&camera, &camera_transform)?),
            ..camera
        };
        spawn!(world, camera_transform, camera, Name::new("camera"))?;

        let sun = Light::directional(Color::WHITE, 1.0);
        let sun = Light {
            handle: Some(engine.create_light(&sun)?),
            ..sun
        };
        spawn!(world, Transform::at(Vec3::new(0.0, 10.0, -5.0)), sun, Name::new("sun"))?;

        let plane = engine.create_mesh(MeshShape::Plane { size: 10.0 })?;
        let ground_material = engine.create_material(Color::rgb(0.3, 0.3, 0.3), 0.0, 0.9)?;
        let ground = RigidBody::with_body_type(BodyType::Static);
        let ground = RigidBody {
            body: Some(engine.create_physics_body(&ground)?),
            ..ground
        };
        spawn!(
            world,
            Transform::default(),
            ground,
            MeshRenderer::new(plane, ground_material),
            Name::new("ground")
        )?;

        let sphere = engine.create_mesh(MeshShape::Sphere {
            radius: 0.5,
            subdivisions: 32,
        })?;
        for i in 0..BODIES {
            let t = i as f32 / BODIES as f32;
            let albedo = Color::RED.lerp(Color::BLUE, t);
            let material = engine.create_material(albedo, 0.5, 0.5 - 0.3 * t)?;
            let body = RigidBody {
                restitution: 0.4 + 0.1 * i as f32,
                ..RigidBody::default()
            };
            let body = RigidBody {
                body: Some(engine.create_physics_body(&body)?),
                ..body
            };
            spawn!(
                world,
                Transform::at(Vec3::new(-4.0 + 2.0 * i as f32, 3.0 + i as f32, 0.0)),
                Velocity {
                    linear: Vec3::ZERO,
                    angular: Vec3::new(0.0, 1.0 + t, 0.0),
                },
                body,
                MeshRenderer::new(sphere, material),
                Name::new(format!("ball{i}"))
            )?;
        }

        let ambience = engine.create_audio_source("assets/ambience.ogg")?;
        let emitter = AudioEmitter {
            volume: master_volume,
            looping: true,
            ..AudioEmitter::new(ambience)
        };
        spawn!(world, Transform::default(), emitter, Name::new("ambience"))?;

        tracing::info!(entities = world.len(), "scene ready");
        Ok(())
    })
}

pub fn apply_gravity(ctx: &mut SystemContext<'_>) -> Result<()> {
    let dt = ctx.time.delta_seconds();
    ctx.world
        .for_each2_mut::<Velocity, RigidBody>(|_, velocity, body| {
            if body.body_type == BodyType::Dynamic {
                velocity.linear += GRAVITY * dt;
            }
        });
    Ok(())
}

pub fn integrate_velocity(ctx: &mut SystemContext<'_>) -> Result<()> {
    let dt = ctx.time.delta_seconds();
    ctx.world
        .for_each2_mut::<Transform, Velocity>(|_, transform, velocity| {
            transform.translate(velocity.linear * dt);
            let spin = velocity.angular * dt;
            if spin != Vec3::ZERO {
                transform.rotate(Quat::from_scaled_axis(spin));
            }
        });
    Ok(())
}

/// Reflect bodies that fell through `y = 0`, losing energy by restitution.
pub fn bounce_on_ground(ctx: &mut SystemContext<'_>) -> Result<()> {
    let below: Vec<(Entity, f32)> = ctx
        .world
        .query3::<Transform, Velocity, RigidBody>()
        .filter(|(_, transform, velocity, body)| {
            body.body_type == BodyType::Dynamic && transform.position.y < 0.0 && velocity.linear.y < 0.0
        })
        .map(|(entity, _, _, body)| (entity, body.restitution))
        .collect();

    for (entity, restitution) in below {
        if let Some(transform) = ctx.world.get_mut::<Transform>(entity)? {
            transform.position.y = 0.0;
        }
        if let Some(velocity) = ctx.world.get_mut::<Velocity>(entity)? {
            velocity.linear.y = -velocity.linear.y * restitution;
        }
        tracing::trace!(%entity, "bounced");
    }
    Ok(())
}

/// Shutdown system destroying every engine resource the scene created:
/// bodies, meshes, materials, camera, lights and audio sources.
pub fn release_resources(ctx: &mut SystemContext<'_>) -> Result<()> {
    let world = &*ctx.world;
    let bodies: Vec<_> = world.query::<RigidBody>().filter_map(|(_, b)| b.body).collect();
    let cameras: Vec<_> = world.query::<Camera>().filter_map(|(_, c)| c.handle).collect();
    let lights: Vec<_> = world.query::<Light>().filter_map(|(_, l)| l.handle).collect();
    let sources: Vec<_> = world.query::<AudioEmitter>().map(|(_, a)| a.source).collect();
    // renderers share meshes and may share materials
    let mut meshes = HashSet::new();
    let mut materials = HashSet::new();
    for (_, renderer) in world.query::<MeshRenderer>() {
        meshes.insert(renderer.mesh);
        materials.insert(renderer.material);
    }

    let engine = &mut *ctx.engine;
    for body in bodies {
        engine.destroy(body)?;
    }
    for mesh in meshes {
        engine.destroy(mesh)?;
    }
    for material in materials {
        engine.destroy(material)?;
    }
    for camera in cameras {
        engine.destroy(camera)?;
    }
    for light in lights {
        engine.destroy(light)?;
    }
    for source in sources {
        engine.destroy(source)?;
    }

    let entities: Vec<Entity> = ctx.world.entities().collect();
    for entity in entities {
        ctx.world.despawn(entity)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wj_core::engine::{EngineHandle, Handle, ResourceKind};
    use wj_core::ecs::World;
    use wj_core::time::Time;

    fn assert_gone<K: ResourceKind>(engine: &mut EngineHandle, handles: &[Handle<K>]) {
        for handle in handles {
            assert!(engine.destroy(*handle).is_err(), "{handle:?} outlived the scene");
        }
    }

    #[test]
    fn release_destroys_everything_setup_created() {
        let mut world = World::new();
        let time = Time::default();
        let mut engine = EngineHandle::null();
        {
            let mut ctx = SystemContext::new(&mut world, &time, &mut engine);
            setup(0.5).execute(&mut ctx).unwrap();
        }

        let bodies: Vec<_> = world.query::<RigidBody>().filter_map(|(_, b)| b.body).collect();
        let meshes: Vec<_> = world.query::<MeshRenderer>().map(|(_, r)| r.mesh).collect();
        let materials: Vec<_> = world.query::<MeshRenderer>().map(|(_, r)| r.material).collect();
        let cameras: Vec<_> = world.query::<Camera>().filter_map(|(_, c)| c.handle).collect();
        let lights: Vec<_> = world.query::<Light>().filter_map(|(_, l)| l.handle).collect();
        let sources: Vec<_> = world.query::<AudioEmitter>().map(|(_, a)| a.source).collect();
        assert_eq!(bodies.len(), BODIES + 1);
        assert_eq!((cameras.len(), lights.len(), sources.len()), (1, 1, 1));

        {
            let mut ctx = SystemContext::new(&mut world, &time, &mut engine);
            release_resources(&mut ctx).unwrap();
        }
        assert!(world.is_empty());
        assert_gone(&mut engine, &bodies);
        assert_gone(&mut engine, &meshes);
        assert_gone(&mut engine, &materials);
        assert_gone(&mut engine, &cameras);
        assert_gone(&mut engine, &lights);
        assert_gone(&mut engine, &sources);
    }
}
