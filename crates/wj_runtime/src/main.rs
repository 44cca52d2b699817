//! Windjammer Runtime - demo host
//!
//! Loads settings, installs logging and runs a small physics scene on the
//! null engine. Usage: `windjammer [settings.json]`. Without a settings file
//! the scene runs interactively until the null engine closes its window.

mod scene;

use anyhow::{Context, Result};
use std::path::Path;
use wj_core::engine::{EngineHandle, NullEngine, TransformSync};
use wj_core::{App, RunMode};
use wj_services::settings::Settings;

const DEFAULT_SETTINGS: &str = "windjammer.json";

/// Frames after which the null engine reports the window closed.
const DEMO_FRAMES: u64 = 180;

fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS.to_string());
    let found = Path::new(&path).exists();
    let mut settings = wj_services::settings::load_or_default(&path)
        .with_context(|| format!("loading settings from {path}"))?;
    if !found {
        settings.app = settings.app.with_run_mode(RunMode::Interactive { max_passes: None });
    }

    wj_services::logging::init(&settings.app.log_level);
    tracing::info!("Windjammer v{}", wj_core::VERSION);

    let mut app = demo_app(&settings);
    let report = app.run().context("running demo scene")?;

    let timer = app.frame_timer();
    tracing::info!(
        passes = report.passes,
        entities = app.world().len(),
        fps = timer.fps(),
        frame_ms = timer.frame_time_ms(),
        "demo finished"
    );
    for failure in &report.failures {
        tracing::warn!(phase = %failure.phase, system = %failure.name, error = %failure.error, "system failed during demo");
    }
    Ok(())
}

fn demo_app(settings: &Settings) -> App {
    let engine = EngineHandle::new(NullEngine::new().with_frame_budget(DEMO_FRAMES));
    let mut app = App::new()
        .with_engine(engine)
        .with_config(settings.app.clone());

    app.add_startup_system(scene::setup(settings.audio.master_volume))
        .add_system(scene::apply_gravity)
        .add_system(scene::integrate_velocity)
        .add_system(scene::bounce_on_ground)
        .add_system(TransformSync)
        .add_shutdown_system(scene::release_resources);
    app
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_demo_runs_until_the_window_closes() {
        let mut settings = Settings::default();
        settings.app = settings.app.with_run_mode(RunMode::Interactive { max_passes: None });

        let mut app = demo_app(&settings);
        let report = app.run().unwrap();
        assert_eq!(report.passes, DEMO_FRAMES);
        assert!(report.close_requested);
        assert!(report.is_clean());
        assert!(app.world().is_empty());
    }
}
