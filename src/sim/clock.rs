//! Timing source and fixed-step driver
//!
//! The tick itself only ever sees a millisecond reading. `FixedStep` turns
//! wall-clock frame deltas into whole 60 Hz ticks and reports the clock value
//! each tick should run at.

use std::time::Instant;

use crate::consts::{MAX_SUBSTEPS, TICK_MS};

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    origin: Instant,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f64,
    /// Simulated time in milliseconds (fractional)
    sim_time: f64,
    last_reading: Option<u64>,
}

impl FixedStep {
    /// Start simulated time at `start_ms`
    pub fn new(start_ms: u64) -> Self {
        Self {
            accumulator: 0.0,
            sim_time: start_ms as f64,
            last_reading: None,
        }
    }

    /// Feed a clock reading; returns the tick timestamps to run this frame
    ///
    /// Time beyond `MAX_SUBSTEPS` ticks is dropped rather than carried over.
    pub fn advance(&mut self, reading_ms: u64) -> Vec<u64> {
        let last = self.last_reading.replace(reading_ms).unwrap_or(reading_ms);
        self.accumulator += reading_ms.saturating_sub(last) as f64;

        let mut ticks = Vec::new();
        while self.accumulator >= TICK_MS && ticks.len() < MAX_SUBSTEPS as usize {
            self.accumulator -= TICK_MS;
            self.sim_time += TICK_MS;
            ticks.push(self.sim_time.round() as u64);
        }
        if ticks.len() == MAX_SUBSTEPS as usize && self.accumulator >= TICK_MS {
            log::debug!("Dropping {:.1} ms of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Simulated clock reading of the latest tick
    pub fn sim_ms(&self) -> u64 {
        self.sim_time.round() as u64
    }
}
