//! Fixed timestep accumulator
//!
//! Front ends measure wall-clock time between frames; this turns it into a
//! whole number of simulation ticks.

use crate::GameConfig;

/// Longest frame gap honoured (seconds); anything longer is clamped
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStep {
    /// Seconds per tick
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(tick_rate_hz: f32, max_substeps: u32) -> Self {
        Self {
            step: 1.0 / tick_rate_hz,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tick_rate_hz, config.max_substeps)
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed `dt` seconds of wall-clock time; returns how many ticks to run now.
    ///
    /// At most `max_substeps` ticks are returned. Time beyond that is dropped,
    /// so a long stall does not trigger a burst of catch-up ticks.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
