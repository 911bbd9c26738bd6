// core/time.rs
//
// Fixed timestep accumulator driving the stage.

use crate::api::config::EngineConfig;

/// Fixed timestep accumulator.
/// Converts wall-clock frame time into whole engine ticks at a fixed rate.
#[derive(Debug, Clone)]
pub struct TickClock {
    /// Seconds per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Most ticks a single `accumulate` call may return.
    max_catch_up: u32,
}

impl TickClock {
    pub fn new(frame_rate: u32, max_catch_up: u32) -> Self {
        Self {
            dt: 1.0 / frame_rate.max(1) as f32,
            accumulator: 0.0,
            max_catch_up: max_catch_up.max(1),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.frame_rate, config.max_catch_up_ticks)
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap so a long stall doesn't replay seconds of animation at once.
        self.accumulator = self.accumulator.min(self.dt * self.max_catch_up as f32);
        let ticks = (self.accumulator / self.dt) as u32;
        self.accumulator -= ticks as f32 * self.dt;
        ticks
    }

    /// Fraction of the next tick already accumulated (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Drop any accumulated partial tick.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
