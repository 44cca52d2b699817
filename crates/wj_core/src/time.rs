//! Frame time
//!
//! [`Time`] is the read-only snapshot systems see; [`FrameClock`] advances
//! it once per update pass, either by a fixed step or by the wall clock.

use crate::config::TimeStep;
use std::time::{Duration, Instant};

/// Default fixed tick rate (60 Hz = 16.666ms per tick)
pub const TICK_RATE_HZ: u32 = 60;

/// Per-pass time snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Time {
    elapsed: Duration,
    delta: Duration,
    frame: u64,
}

impl Time {
    /// Time since the first pass began.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time since the previous pass.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Number of the current pass, starting at 1. Zero during startup.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Produces successive [`Time`] snapshots.
#[derive(Debug)]
pub struct FrameClock {
    step: TimeStep,
    time: Time,
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new(step: TimeStep) -> Self {
        Self {
            step,
            time: Time::default(),
            last_tick: None,
        }
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Advance to the next pass.
    pub fn tick(&mut self) -> &Time {
        let delta = match self.step {
            TimeStep::Fixed { hz } => fixed_delta(hz),
            TimeStep::Realtime => {
                let now = Instant::now();
                let delta = self
                    .last_tick
                    .map(|last| now.duration_since(last))
                    .unwrap_or(Duration::ZERO);
                self.last_tick = Some(now);
                delta
            }
        };

        self.time.delta = delta;
        self.time.elapsed += delta;
        self.time.frame += 1;
        &self.time
    }

    pub fn reset(&mut self) {
        self.time = Time::default();
        self.last_tick = None;
    }
}

fn fixed_delta(hz: u32) -> Duration {
    Duration::from_secs(1) / hz.max(1)
}
