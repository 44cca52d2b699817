//! 3D scene demo
//!
//! Camera, three meshes with PBR materials and a warm/cool/rim light rig,
//! with an update system spinning the meshes. Runs on the null engine for
//! a fixed number of frames.
//!
//! Run with: cargo run --example 3d_scene

use wj_core::ecs::{system_fn, Camera, Light, MeshRenderer, Name, SystemContext, Transform};
use wj_core::engine::{kind, EngineHandle, MaterialHandle, MeshShape, NullEngine, RawColor, ResourceDesc};
use wj_core::math::{Color, Quat, Vec3};
use wj_core::{spawn, App, AppConfig, Result, RunMode};

fn main() -> Result<()> {
    wj_services::logging::init("info");

    let config = AppConfig::default()
        .with_title("3D scene")
        .with_run_mode(RunMode::Interactive { max_passes: None });
    let mut app = App::new()
        .with_engine(EngineHandle::new(NullEngine::new().with_frame_budget(120)))
        .with_config(config);

    app.add_startup_system(setup_3d_scene)
        .add_system(rotate_scene)
        .add_system(system_fn("report", |ctx| {
            if ctx.time.frame() % 60 == 0 {
                tracing::info!(frame = ctx.time.frame(), elapsed = ?ctx.time.elapsed(), "tick");
            }
            Ok(())
        }));

    let report = app.run()?;
    tracing::info!(passes = report.passes, clean = report.is_clean(), "3D scene finished");
    Ok(())
}

fn pbr(ctx: &mut SystemContext<'_>, albedo: Color, metallic: f32, roughness: f32, emissive: Color) -> Result<MaterialHandle> {
    let handle = ctx.engine.create::<kind::Material>(&ResourceDesc::Material {
        albedo: RawColor::from(albedo),
        metallic,
        roughness,
        emissive: RawColor::from(emissive),
    })?;
    Ok(handle)
}

fn setup_3d_scene(ctx: &mut SystemContext<'_>) -> Result<()> {
    let camera_transform = Transform::at(Vec3::new(0.0, 5.0, 10.0));
    let camera = Camera::default();
    let camera = Camera {
        handle: Some(ctx.engine.create_camera(&camera, &camera_transform)?),
        ..camera
    };
    spawn!(ctx.world, camera_transform, camera, Name::new("camera"))?;

    let cube = ctx.engine.create_mesh(MeshShape::Cube { size: 1.0 })?;
    let sphere = ctx.engine.create_mesh(MeshShape::Sphere { radius: 1.0, subdivisions: 32 })?;
    let plane = ctx.engine.create_mesh(MeshShape::Plane { size: 10.0 })?;

    let red = pbr(ctx, Color::rgb(0.8, 0.2, 0.2), 0.8, 0.2, Color::rgb(0.5, 0.1, 0.1))?;
    let blue = pbr(ctx, Color::rgb(0.2, 0.2, 0.8), 0.5, 0.5, Color::rgb(0.1, 0.1, 0.5))?;
    let ground = pbr(ctx, Color::rgb(0.3, 0.3, 0.3), 0.0, 0.9, Color::BLACK)?;

    spawn!(ctx.world, Transform::at(Vec3::new(-2.0, 1.0, 0.0)), MeshRenderer::new(cube, red), Name::new("cube"))?;
    spawn!(ctx.world, Transform::at(Vec3::new(2.0, 1.0, 0.0)), MeshRenderer::new(sphere, blue), Name::new("sphere"))?;
    spawn!(ctx.world, Transform::default(), MeshRenderer::new(plane, ground), Name::new("ground"))?;

    let rig = [
        ("warm", Vec3::new(5.0, 5.0, 5.0), Color::rgb(1.0, 0.8, 0.6), 2000.0),
        ("cool", Vec3::new(-5.0, 5.0, 5.0), Color::rgb(0.6, 0.8, 1.0), 1500.0),
        ("rim", Vec3::new(0.0, 10.0, -5.0), Color::WHITE, 1000.0),
    ];
    for (name, position, color, intensity) in rig {
        let light = Light::point(color, intensity, 50.0);
        let light = Light {
            handle: Some(ctx.engine.create_light(&light)?),
            ..light
        };
        spawn!(ctx.world, Transform::at(position), light, Name::new(name))?;
    }

    tracing::info!(entities = ctx.world.len(), "3D scene ready");
    Ok(())
}

fn rotate_scene(ctx: &mut SystemContext<'_>) -> Result<()> {
    let angle = ctx.time.delta_seconds();
    let spin = Quat::from_rotation_y(angle);
    let meshes: Vec<_> = ctx.world.query2::<Transform, MeshRenderer>().map(|(e, _, _)| e).collect();
    for entity in meshes {
        if let Some(transform) = ctx.world.get_mut::<Transform>(entity)? {
            transform.rotate(spin);
        }
    }
    Ok(())
}
