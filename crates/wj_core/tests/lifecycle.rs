use std::cell::RefCell;
use std::rc::Rc;

use wj_core::ecs::{system_fn, Phase, SystemContext, Transform, Velocity};
use wj_core::math::Vec3;
use wj_core::{App, AppConfig, Error, Result, RunMode};

type Log = Rc<RefCell<Vec<String>>>;

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// System appending `label` to `log` every time it runs.
fn record(label: &'static str, log: &Log) -> impl wj_core::ecs::System {
    let log = Rc::clone(log);
    system_fn(label, move |_ctx| {
        log.borrow_mut().push(label.to_string());
        Ok(())
    })
}

fn failing(label: &'static str, log: &Log) -> impl wj_core::ecs::System {
    let log = Rc::clone(log);
    system_fn(label, move |_ctx| {
        log.borrow_mut().push(label.to_string());
        Err(Error::msg(format!("{label} failed")))
    })
}

fn spawn_player(ctx: &mut SystemContext<'_>) -> Result<()> {
    let player = ctx.world.spawn()?;
    ctx.world.insert(player, Transform::default())?;
    Ok(())
}

#[test]
fn update_reads_transform_spawned_at_startup() {
    let recorded = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&recorded);

    let mut app = App::new();
    app.add_startup_system(spawn_player)
        .add_system(system_fn("read_position", move |ctx| {
            for (_, transform) in ctx.world.query::<Transform>() {
                *sink.borrow_mut() = Some(transform.position);
            }
            Ok(())
        }));

    let report = app.run().unwrap();
    assert_eq!(report.passes, 1);
    assert_eq!(*recorded.borrow(), Some(Vec3::ZERO));
}

#[test]
fn insert_on_despawned_entity_fails() {
    let mut app = App::new();
    let world = app.world_mut();
    let entity = world.spawn().unwrap();
    world.despawn(entity).unwrap();

    let err = world.insert(entity, Transform::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidHandle { entity: e } if e == entity));
}

#[test]
fn despawning_even_entities_leaves_odd_survivors() {
    let mut app = App::new();
    let world = app.world_mut();
    let entities: Vec<_> = (0..1000).map(|_| world.spawn().unwrap()).collect();

    for entity in entities.iter().step_by(2) {
        world.despawn(*entity).unwrap();
    }

    for (i, entity) in entities.iter().enumerate() {
        assert_eq!(world.is_alive(*entity), i % 2 == 1, "entity {i}");
    }
    assert_eq!(world.len(), 500);
}

#[test]
fn update_systems_run_in_registration_order() {
    let log = new_log();
    let mut app = App::new();
    app.add_system(record("A", &log))
        .add_system(record("B", &log))
        .add_system(record("C", &log));

    app.run().unwrap();
    assert_eq!(*log.borrow(), vec!["A", "B", "C"]);

    // and again on a second run
    log.borrow_mut().clear();
    app.run().unwrap();
    assert_eq!(*log.borrow(), vec!["A", "B", "C"]);
}

#[test]
fn shutdown_runs_despite_update_failure() {
    let log = new_log();
    let mut app = App::new();
    app.add_system(failing("explode", &log))
        .add_shutdown_system(record("cleanup", &log));

    let report = app.run().unwrap();
    assert!(log.borrow().contains(&"cleanup".to_string()));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].phase, Phase::Update);
    assert_eq!(report.failures[0].name, "explode");
}

#[test]
fn quit_during_first_interactive_pass_prevents_second() {
    let passes = Rc::new(RefCell::new(0u32));
    let counter = Rc::clone(&passes);

    let mut app = App::new()
        .with_config(AppConfig::default().with_run_mode(RunMode::Interactive { max_passes: Some(100) }));
    app.add_system(system_fn("quit_now", move |ctx| {
        *counter.borrow_mut() += 1;
        ctx.quit();
        Ok(())
    }));

    let report = app.run().unwrap();
    assert_eq!(*passes.borrow(), 1);
    assert_eq!(report.passes, 1);
    assert!(report.quit_requested);
    assert!(!app.is_running());
}

#[test]
fn despawn_removes_every_component() {
    let mut app = App::new();
    let world = app.world_mut();
    let entity = world
        .build_entity()
        .unwrap()
        .with(Transform::default())
        .with(Velocity::linear(Vec3::X))
        .id();

    world.despawn(entity).unwrap();
    assert!(world.get::<Transform>(entity).is_err());
    assert!(world.get::<Velocity>(entity).is_err());
    assert_eq!(world.query::<Transform>().count(), 0);
    assert_eq!(world.query::<Velocity>().count(), 0);
}

#[test]
fn phases_complete_in_order() {
    let log = new_log();
    let mut app = App::new().with_config(AppConfig::default().with_run_mode(RunMode::Headless { passes: 2 }));
    app.add_shutdown_system(record("shutdown", &log))
        .add_system(record("update", &log))
        .add_startup_system(record("startup", &log));

    app.run().unwrap();
    assert_eq!(*log.borrow(), vec!["startup", "update", "update", "shutdown"]);
}

#[test]
fn failures_are_isolated_across_phases() {
    let log = new_log();
    let mut app = App::new();
    app.add_startup_system(failing("s1", &log))
        .add_startup_system(record("s2", &log))
        .add_system(failing("u1", &log))
        .add_system(record("u2", &log))
        .add_system(record("u3", &log))
        .add_shutdown_system(failing("d1", &log))
        .add_shutdown_system(record("d2", &log));

    let report = app.run().unwrap();
    assert_eq!(*log.borrow(), vec!["s1", "s2", "u1", "u2", "u3", "d1", "d2"]);

    let failed: Vec<&str> = report.failures.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec!["s1", "u1", "d1"]);
    assert_eq!(report.failures_in(Phase::Shutdown).count(), 1);
}

#[test]
fn mutations_are_visible_to_later_systems_in_the_same_pass() {
    let seen = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&seen);

    let mut app = App::new();
    app.add_system(system_fn("spawner", |ctx| {
        ctx.world.spawn()?;
        Ok(())
    }))
    .add_system(system_fn("counter", move |ctx| {
        *sink.borrow_mut() = ctx.world.len();
        Ok(())
    }));

    app.run().unwrap();
    assert_eq!(*seen.borrow(), 1);
}
