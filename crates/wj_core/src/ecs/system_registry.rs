// system_registry.rs - Ordered system lists and phase execution

use crate::config::FailurePolicy;
use crate::ecs::{Phase, System, SystemContext, SystemDescriptor, SystemId};
use crate::error::Error;
use wj_metrics::SystemProfiler;

/// A system that returned an error while its phase ran.
#[derive(Debug)]
pub struct SystemFailure {
    pub id: SystemId,
    pub name: String,
    pub phase: Phase,
    pub error: Error,
}

impl SystemFailure {
    /// Fold into the error `run()` surfaces under fail-fast.
    pub fn into_error(self) -> Error {
        self.error.in_system(self.phase, &self.name)
    }
}

/// How a phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseOutcome {
    Completed,
    /// A failure under [`FailurePolicy::FailFast`] stopped the phase.
    Aborted,
}

struct RegisteredSystem {
    descriptor: SystemDescriptor,
    system: Box<dyn System>,
}

/// Three FIFO system lists, one per phase.
#[derive(Default)]
pub(crate) struct SystemRegistry {
    startup: Vec<RegisteredSystem>,
    update: Vec<RegisteredSystem>,
    shutdown: Vec<RegisteredSystem>,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `system` to the end of `phase`.
    pub fn register(&mut self, phase: Phase, system: Box<dyn System>) -> SystemId {
        let list = self.list_mut(phase);
        let id = SystemId::new(phase, list.len() as u32);
        let descriptor = SystemDescriptor::new(id, system.name());
        tracing::debug!(%phase, system = descriptor.name(), index = id.index(), "registered system");
        list.push(RegisteredSystem { descriptor, system });
        id
    }

    pub fn descriptors(&self, phase: Phase) -> impl Iterator<Item = &SystemDescriptor> {
        self.list(phase).iter().map(|entry| &entry.descriptor)
    }

    pub fn len(&self, phase: Phase) -> usize {
        self.list(phase).len()
    }

    /// Execute every system of `phase` in registration order.
    ///
    /// Failures are appended to `failures`. Under [`FailurePolicy::Isolate`]
    /// the remaining systems still run; under fail-fast the phase stops at
    /// the first failure.
    pub fn run_phase(
        &mut self,
        phase: Phase,
        ctx: &mut SystemContext<'_>,
        policy: FailurePolicy,
        profiler: &mut SystemProfiler,
        failures: &mut Vec<SystemFailure>,
    ) -> PhaseOutcome {
        tracing::debug!(%phase, systems = self.len(phase), "phase started");

        for entry in self.list_mut(phase) {
            let RegisteredSystem { descriptor, system } = entry;
            let result = profiler.time_system(descriptor.name(), || system.execute(ctx));

            if let Err(error) = result {
                tracing::error!(
                    %phase,
                    system = descriptor.name(),
                    index = descriptor.id().index(),
                    %error,
                    "system failed"
                );
                failures.push(SystemFailure {
                    id: descriptor.id(),
                    name: descriptor.name().to_owned(),
                    phase,
                    error,
                });
                if policy == FailurePolicy::FailFast {
                    tracing::warn!(%phase, "fail-fast policy: skipping remaining systems in phase");
                    return PhaseOutcome::Aborted;
                }
            }
        }

        tracing::debug!(%phase, "phase finished");
        PhaseOutcome::Completed
    }

    fn list(&self, phase: Phase) -> &Vec<RegisteredSystem> {
        match phase {
            Phase::Startup => &self.startup,
            Phase::Update => &self.update,
            Phase::Shutdown => &self.shutdown,
        }
    }

    fn list_mut(&mut self, phase: Phase) -> &mut Vec<RegisteredSystem> {
        match phase {
            Phase::Startup => &mut self.startup,
            Phase::Update => &mut self.update,
            Phase::Shutdown => &mut self.shutdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{system_fn, World};
    use crate::engine::EngineHandle;
    use crate::time::Time;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn logging_system(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>, fail: bool) -> Box<dyn System> {
        let log = Rc::clone(log);
        Box::new(system_fn(name, move |_ctx| {
            log.borrow_mut().push(name);
            if fail {
                Err(Error::msg("boom"))
            } else {
                Ok(())
            }
        }))
    }

    fn run(registry: &mut SystemRegistry, policy: FailurePolicy) -> (PhaseOutcome, Vec<SystemFailure>) {
        let mut world = World::new();
        let time = Time::default();
        let mut engine = EngineHandle::null();
        let mut ctx = SystemContext::new(&mut world, &time, &mut engine);
        let mut profiler = SystemProfiler::new();
        let mut failures = Vec::new();
        let outcome = registry.run_phase(Phase::Update, &mut ctx, policy, &mut profiler, &mut failures);
        (outcome, failures)
    }

    #[test]
    fn ids_follow_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = SystemRegistry::new();
        let a = registry.register(Phase::Update, logging_system("a", &log, false));
        let b = registry.register(Phase::Update, logging_system("b", &log, false));
        let s = registry.register(Phase::Startup, logging_system("s", &log, false));

        assert_eq!((a.index(), b.index(), s.index()), (0, 1, 0));
        let names: Vec<&str> = registry.descriptors(Phase::Update).map(|d| d.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn isolate_runs_past_failures() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = SystemRegistry::new();
        registry.register(Phase::Update, logging_system("a", &log, false));
        registry.register(Phase::Update, logging_system("b", &log, true));
        registry.register(Phase::Update, logging_system("c", &log, false));

        let (outcome, failures) = run(&mut registry, FailurePolicy::Isolate);
        assert_eq!(outcome, PhaseOutcome::Completed);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "b");
        assert_eq!(failures[0].id.index(), 1);
    }

    #[test]
    fn fail_fast_stops_the_phase() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = SystemRegistry::new();
        registry.register(Phase::Update, logging_system("a", &log, true));
        registry.register(Phase::Update, logging_system("b", &log, false));

        let (outcome, failures) = run(&mut registry, FailurePolicy::FailFast);
        assert_eq!(outcome, PhaseOutcome::Aborted);
        assert_eq!(*log.borrow(), vec!["a"]);

        let error = failures.into_iter().next().unwrap().into_error();
        assert!(matches!(error, Error::SystemCallback { phase: Phase::Update, ref system, .. } if system == "a"));
    }
}
