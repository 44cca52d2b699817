//! Application configuration

use serde::{Deserialize, Serialize};

/// How many update passes `run()` performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// A fixed number of passes with no host involvement.
    Headless { passes: u64 },
    /// Loop until a system calls `quit()`, the engine requests close, or the
    /// optional cap is reached.
    Interactive { max_passes: Option<u64> },
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::Headless { passes: 1 }
    }
}

/// How `Time::delta` advances between passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStep {
    /// Deterministic `1 / hz` seconds per pass.
    Fixed { hz: u32 },
    /// Wall-clock time since the previous pass.
    Realtime,
}

impl Default for TimeStep {
    fn default() -> Self {
        TimeStep::Fixed {
            hz: crate::time::TICK_RATE_HZ,
        }
    }
}

/// What happens when a system returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Report the failure and keep running the lifecycle.
    #[default]
    Isolate,
    /// Stop the failing phase and skip remaining update passes. Shutdown
    /// still runs, then `run()` returns the first failure.
    FailFast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub run_mode: RunMode,
    pub time_step: TimeStep,
    pub failure_policy: FailurePolicy,
    /// Live entity cap; `None` leaves only the id space as the bound.
    pub max_entities: Option<u32>,
    /// `tracing` filter directive used by binaries, e.g. `"info"`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Windjammer".to_string(),
            run_mode: RunMode::default(),
            time_step: TimeStep::default(),
            failure_policy: FailurePolicy::default(),
            max_entities: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    pub fn with_time_step(mut self, time_step: TimeStep) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_max_entities(mut self, max: u32) -> Self {
        self.max_entities = Some(max);
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_single_headless_pass_isolated() {
        let config = AppConfig::default();
        assert_eq!(config.run_mode, RunMode::Headless { passes: 1 });
        assert_eq!(config.time_step, TimeStep::Fixed { hz: 60 });
        assert_eq!(config.failure_policy, FailurePolicy::Isolate);
        assert_eq!(config.max_entities, None);
    }

    #[test]
    fn builder_chain() {
        let config = AppConfig::default()
            .with_title("demo")
            .with_run_mode(RunMode::Interactive { max_passes: Some(10) })
            .with_failure_policy(FailurePolicy::FailFast)
            .with_max_entities(64);
        assert_eq!(config.title, "demo");
        assert_eq!(config.run_mode, RunMode::Interactive { max_passes: Some(10) });
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.max_entities, Some(64));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"failure_policy":"fail_fast"}"#).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.title, "Windjammer");

        let json = serde_json::to_string(&RunMode::Headless { passes: 3 }).unwrap();
        assert_eq!(json, r#"{"headless":{"passes":3}}"#);
    }
}
