//! Systems and the context they run against

use crate::ecs::World;
use crate::engine::EngineHandle;
use crate::error::Result;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Scheduling class of a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Runs once before the first update pass.
    Startup,
    /// Runs once per pass.
    Update,
    /// Runs once after the last pass, even if an update failed.
    Shutdown,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Startup, Phase::Update, Phase::Shutdown];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Startup => "Startup",
            Phase::Update => "Update",
            Phase::Shutdown => "Shutdown",
        };
        f.write_str(name)
    }
}

/// Shared run state of one [`crate::App`].
///
/// Clones observe the same flags, so a host or an engine adapter holding a
/// handle can stop the update loop while `App::run` borrows the app.
#[derive(Debug, Clone, Default)]
pub struct QuitHandle {
    state: Rc<RunState>,
}

#[derive(Debug, Default)]
struct RunState {
    running: Cell<bool>,
    quit: Cell<bool>,
}

impl QuitHandle {
    /// A handle already in the running state, for contexts built outside an app.
    pub fn running() -> Self {
        let handle = Self::default();
        handle.begin();
        handle
    }

    /// Ask the loop to stop after the current pass. Ignored while not running.
    pub fn request(&self) {
        if self.state.running.get() {
            self.state.quit.set(true);
        } else {
            tracing::debug!("quit requested while not running; ignored");
        }
    }

    pub fn is_requested(&self) -> bool {
        self.state.quit.get()
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    pub(crate) fn begin(&self) {
        self.state.quit.set(false);
        self.state.running.set(true);
    }

    pub(crate) fn finish(&self) {
        self.state.running.set(false);
    }
}

/// Everything a running system may touch.
pub struct SystemContext<'a> {
    pub world: &'a mut World,
    pub time: &'a Time,
    pub engine: &'a mut EngineHandle,
    run: QuitHandle,
}

impl<'a> SystemContext<'a> {
    pub fn new(world: &'a mut World, time: &'a Time, engine: &'a mut EngineHandle) -> Self {
        Self::with_run_state(world, time, engine, QuitHandle::running())
    }

    pub fn with_run_state(
        world: &'a mut World,
        time: &'a Time,
        engine: &'a mut EngineHandle,
        run: QuitHandle,
    ) -> Self {
        Self {
            world,
            time,
            engine,
            run,
        }
    }

    /// Ask the application loop to stop after the current pass.
    pub fn quit(&mut self) {
        self.run.request();
    }

    pub fn quit_requested(&self) -> bool {
        self.run.is_requested()
    }

    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    /// A handle on the same run state, for work that outlives this call.
    pub fn quit_handle(&self) -> QuitHandle {
        self.run.clone()
    }
}

/// A unit of behavior registered into one phase.
pub trait System: 'static {
    fn name(&self) -> &str;

    fn execute(&mut self, ctx: &mut SystemContext<'_>) -> Result<()>;
}

/// Plain functions are systems named after their item path.
impl<F> System for F
where
    F: FnMut(&mut SystemContext<'_>) -> Result<()> + 'static,
{
    fn name(&self) -> &str {
        short_type_name::<F>()
    }

    fn execute(&mut self, ctx: &mut SystemContext<'_>) -> Result<()> {
        self(ctx)
    }
}

/// Closure system carrying an explicit name. Built by [`system_fn`].
pub struct FnSystem<F> {
    name: String,
    f: F,
}

impl<F> System for FnSystem<F>
where
    F: FnMut(&mut SystemContext<'_>) -> Result<()> + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, ctx: &mut SystemContext<'_>) -> Result<()> {
        (self.f)(ctx)
    }
}

/// Name a closure as a system.
///
/// ```ignore
/// app.add_system(system_fn("spin", |ctx| {
///     ctx.world.for_each_mut::<Transform>(|_, t| t.rotate(Quat::from_rotation_y(0.1)));
///     Ok(())
/// }));
/// ```
pub fn system_fn<F>(name: impl Into<String>, f: F) -> FnSystem<F>
where
    F: FnMut(&mut SystemContext<'_>) -> Result<()> + 'static,
{
    FnSystem {
        name: name.into(),
        f,
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
