// app.rs - Application loop driving the startup / update / shutdown phases

use crate::config::{AppConfig, FailurePolicy, RunMode};
use crate::ecs::{
    Phase, PhaseOutcome, QuitHandle, System, SystemContext, SystemDescriptor, SystemFailure, SystemId,
    SystemRegistry, World,
};
use crate::engine::{EngineError, EngineHandle};
use crate::error::Result;
use crate::time::{FrameClock, Time};
use wj_metrics::{FrameTimer, SystemProfiler};

/// What happened during one `run()`.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Update passes that began.
    pub passes: u64,
    /// Every system failure, in the order they occurred.
    pub failures: Vec<SystemFailure>,
    /// Engine hook failures (initialize, frame boundaries, shutdown).
    pub engine_errors: Vec<EngineError>,
    /// A system or a [`QuitHandle`] requested quit.
    pub quit_requested: bool,
    /// The engine asked to close.
    pub close_requested: bool,
}

impl RunReport {
    /// No system and no engine hook failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.engine_errors.is_empty()
    }

    pub fn failures_in(&self, phase: Phase) -> impl Iterator<Item = &SystemFailure> {
        self.failures.iter().filter(move |failure| failure.phase == phase)
    }
}

/// Owns one [`World`], the registered systems and the engine they talk to.
///
/// ```ignore
/// let mut app = App::new();
/// app.add_startup_system(spawn_scene)
///     .add_system(movement)
///     .add_shutdown_system(save);
/// let report = app.run()?;
/// ```
pub struct App {
    config: AppConfig,
    world: World,
    engine: EngineHandle,
    systems: SystemRegistry,
    clock: FrameClock,
    profiler: SystemProfiler,
    frame_timer: FrameTimer,
    run_state: QuitHandle,
}

impl App {
    /// Empty app on the null engine with default configuration.
    pub fn new() -> Self {
        let config = AppConfig::default();
        Self {
            world: world_for(&config),
            clock: FrameClock::new(config.time_step),
            config,
            engine: EngineHandle::null(),
            systems: SystemRegistry::new(),
            profiler: SystemProfiler::new(),
            frame_timer: FrameTimer::default(),
            run_state: QuitHandle::default(),
        }
    }

    pub fn with_engine(mut self, engine: EngineHandle) -> Self {
        self.engine = engine;
        self
    }

    /// Apply `config`. An entity cap only takes effect while the world is
    /// still empty.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        if self.world.is_empty() {
            self.world = world_for(&config);
        } else if config.max_entities != self.config.max_entities {
            tracing::warn!("world already populated; entity cap not applied");
        }
        self.clock = FrameClock::new(config.time_step);
        self.config = config;
        self
    }

    /// Register an update system.
    pub fn add_system(&mut self, system: impl System) -> &mut Self {
        self.register(Phase::Update, system);
        self
    }

    pub fn add_startup_system(&mut self, system: impl System) -> &mut Self {
        self.register(Phase::Startup, system);
        self
    }

    pub fn add_shutdown_system(&mut self, system: impl System) -> &mut Self {
        self.register(Phase::Shutdown, system);
        self
    }

    /// Register `system` at the end of `phase` and return its id.
    pub fn register(&mut self, phase: Phase, system: impl System) -> SystemId {
        self.systems.register(phase, Box::new(system))
    }

    /// Registered systems of `phase`, in execution order.
    pub fn systems(&self, phase: Phase) -> impl Iterator<Item = &SystemDescriptor> {
        self.systems.descriptors(phase)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn time(&self) -> &Time {
        self.clock.time()
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineHandle {
        &mut self.engine
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }

    pub fn frame_timer(&self) -> &FrameTimer {
        &self.frame_timer
    }

    pub fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    /// Request termination after the current update pass. Ignored unless
    /// the app is running; systems use [`SystemContext::quit`].
    pub fn quit(&mut self) {
        self.run_state.request();
    }

    /// A handle that can request quit while `run()` holds the app, from an
    /// engine adapter, a host callback or a captured closure.
    pub fn quit_handle(&self) -> QuitHandle {
        self.run_state.clone()
    }

    /// Run startup once, update passes per the run mode, then shutdown once.
    ///
    /// Under [`FailurePolicy::Isolate`] system failures are collected in the
    /// report and `run()` returns `Ok`. Under [`FailurePolicy::FailFast`] the
    /// first failure ends startup or the update loop early, shutdown still
    /// runs, and that failure is returned as [`crate::Error::SystemCallback`].
    pub fn run(&mut self) -> Result<RunReport> {
        let policy = self.config.failure_policy;
        tracing::info!(
            title = %self.config.title,
            engine = self.engine.name(),
            version = %self.engine.version(),
            ?policy,
            "app run started"
        );

        self.run_state.begin();
        self.clock.reset();
        let mut report = RunReport::default();

        if let Err(error) = self.engine.initialize() {
            engine_failure(&mut report, error);
        }

        let startup = self.run_phase(Phase::Startup, &mut report);
        if startup == PhaseOutcome::Completed {
            self.update_loop(&mut report);
        } else {
            tracing::warn!("startup aborted; skipping update passes");
        }

        self.run_phase(Phase::Shutdown, &mut report);

        if let Err(error) = self.engine.shutdown() {
            engine_failure(&mut report, error);
        }
        report.quit_requested = self.run_state.is_requested();
        self.run_state.finish();

        tracing::info!(
            passes = report.passes,
            failures = report.failures.len(),
            engine_errors = report.engine_errors.len(),
            "app run finished"
        );

        if policy == FailurePolicy::FailFast && !report.failures.is_empty() {
            let first = report.failures.remove(0);
            return Err(first.into_error());
        }
        Ok(report)
    }

    fn update_loop(&mut self, report: &mut RunReport) {
        let (cap, interactive) = match self.config.run_mode {
            RunMode::Headless { passes } => (Some(passes), false),
            RunMode::Interactive { max_passes } => (max_passes, true),
        };

        loop {
            if cap.is_some_and(|cap| report.passes >= cap) {
                break;
            }
            if self.run_state.is_requested() {
                tracing::debug!(passes = report.passes, "quit observed");
                break;
            }
            if interactive && self.engine.close_requested() {
                tracing::info!(passes = report.passes, "engine requested close");
                report.close_requested = true;
                break;
            }

            self.clock.tick();
            self.frame_timer.begin();
            if let Err(error) = self.engine.begin_frame(self.clock.time()) {
                engine_failure(report, error);
                self.frame_timer.end();
                break;
            }
            report.passes += 1;

            let outcome = self.run_phase(Phase::Update, report);

            if let Err(error) = self.engine.end_frame() {
                engine_failure(report, error);
            }
            self.frame_timer.end();

            if outcome == PhaseOutcome::Aborted {
                tracing::warn!(passes = report.passes, "update aborted; skipping remaining passes");
                break;
            }
        }
    }

    fn run_phase(&mut self, phase: Phase, report: &mut RunReport) -> PhaseOutcome {
        // shutdown always runs to the end; fail-fast only decides run()'s result
        let policy = match phase {
            Phase::Shutdown => FailurePolicy::Isolate,
            Phase::Startup | Phase::Update => self.config.failure_policy,
        };
        let mut ctx = SystemContext::with_run_state(
            &mut self.world,
            self.clock.time(),
            &mut self.engine,
            self.run_state.clone(),
        );
        self.systems.run_phase(
            phase,
            &mut ctx,
            policy,
            &mut self.profiler,
            &mut report.failures,
        )
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("title", &self.config.title)
            .field("entities", &self.world.len())
            .field("engine", &self.engine)
            .field("running", &self.run_state.is_running())
            .finish()
    }
}

fn world_for(config: &AppConfig) -> World {
    match config.max_entities {
        Some(max) => World::with_capacity(max),
        None => World::new(),
    }
}

fn engine_failure(report: &mut RunReport, error: EngineError) {
    tracing::error!(%error, "engine hook failed");
    report.engine_errors.push(error);
}
