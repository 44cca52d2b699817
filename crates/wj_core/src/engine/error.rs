use crate::engine::Status;
use std::fmt;
use thiserror::Error;

/// A failure reported by the native engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("engine {operation} failed ({status}): {message}")]
pub struct EngineError {
    /// Boundary call that failed, e.g. `"create mesh"`.
    pub operation: String,
    pub status: Status,
    /// Detail retrieved from the engine's last-error slot.
    pub message: String,
}

impl EngineError {
    pub fn new(operation: impl Into<String>, status: Status, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }
}

/// Semantic version of the native engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EngineVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl From<crate::engine::RawVersion> for EngineVersion {
    fn from(raw: crate::engine::RawVersion) -> Self {
        Self {
            major: raw.major,
            minor: raw.minor,
            patch: raw.patch,
        }
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
