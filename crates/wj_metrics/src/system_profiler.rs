//! Accumulated timings for named systems

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Aggregate timing for one system name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemTiming {
    pub total: Duration,
    pub last: Duration,
    pub calls: u64,
}

impl SystemTiming {
    pub fn average(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        self.total / self.calls as u32
    }
}

#[derive(Debug, Default)]
pub struct SystemProfiler {
    timings: HashMap<String, SystemTiming>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
        }
    }

    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        let entry = self.timings.entry(name.to_string()).or_default();
        entry.total += elapsed;
        entry.last = elapsed;
        entry.calls += 1;
        result
    }

    pub fn timing(&self, name: &str) -> Option<SystemTiming> {
        self.timings.get(name).copied()
    }

    pub fn total(&self, name: &str) -> Duration {
        self.timings.get(name).map(|t| t.total).unwrap_or(Duration::ZERO)
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SystemTiming)> {
        self.timings.iter().map(|(name, timing)| (name.as_str(), timing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_calls_per_name() {
        let mut profiler = SystemProfiler::new();
        profiler.time_system("render", || ());
        profiler.time_system("render", || ());
        profiler.time_system("audio", || ());

        assert_eq!(profiler.len(), 2);
        let render = profiler.timing("render").unwrap();
        assert_eq!(render.calls, 2);
        assert!(render.total >= render.last);
        assert_eq!(profiler.total("missing"), Duration::ZERO);

        profiler.reset();
        assert!(profiler.is_empty());
    }
}
