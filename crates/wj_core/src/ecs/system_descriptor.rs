use crate::ecs::Phase;
use std::fmt;

/// Identity assigned to each registered system: its phase and the position
/// it was registered at within that phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId {
    phase: Phase,
    index: u32,
}

impl SystemId {
    pub(crate) fn new(phase: Phase, index: u32) -> Self {
        Self { phase, index }
    }

    #[inline]
    pub fn phase(self) -> Phase {
        self.phase
    }

    /// Registration order within the phase, starting at zero.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.phase, self.index)
    }
}

/// Diagnostic view of a registered system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemDescriptor {
    id: SystemId,
    name: String,
}

impl SystemDescriptor {
    pub(crate) fn new(id: SystemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> SystemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.id.phase
    }
}
