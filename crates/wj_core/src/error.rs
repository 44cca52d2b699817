//! Error taxonomy shared by the world, the scheduler and the engine boundary.

use crate::ecs::{Entity, Phase};
use crate::engine::EngineError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The entity id is dead or was never allocated.
    #[error("entity {entity} is not alive")]
    InvalidHandle { entity: Entity },

    #[error("{resource} exhausted (capacity {capacity})")]
    ResourceExhausted {
        resource: &'static str,
        capacity: u64,
    },

    /// Parenting would make an entity its own ancestor.
    #[error("cannot parent {child} under {parent}: would create a cycle")]
    HierarchyCycle { child: Entity, parent: Entity },

    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A registered system returned an error.
    #[error("{phase} system '{system}' failed: {source}")]
    SystemCallback {
        phase: Phase,
        system: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{0}")]
    Failed(String),
}

impl Error {
    /// Failure raised by user system code.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wrap this error as the failure of `system` during `phase`.
    pub(crate) fn in_system(self, phase: Phase, system: &str) -> Self {
        Self::SystemCallback {
            phase,
            system: system.to_owned(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_callback_names_phase_and_system() {
        let err = Error::msg("boom").in_system(Phase::Update, "physics");
        assert_eq!(err.to_string(), "Update system 'physics' failed: boom");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn exhaustion_reports_capacity() {
        let err = Error::ResourceExhausted {
            resource: "entity ids",
            capacity: 8,
        };
        assert_eq!(err.to_string(), "entity ids exhausted (capacity 8)");
    }
}
