// api/config.rs
//
// Engine-wide settings: defaults, validation, JSON loading.

use serde::{Deserialize, Serialize};

use crate::api::error::{EngineError, Result};

/// Engine-wide settings, fixed when characters are constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum nesting of event dispatch within one external call (default: 64).
    pub max_event_depth: usize,
    /// Target ticks per second for `TickClock` (default: 60).
    pub frame_rate: u32,
    /// Maximum ticks produced by a single `TickClock::accumulate` (default: 10).
    pub max_catch_up_ticks: u32,
    /// Samples used to approximate the arc length of curved segments (default: 16).
    pub curve_samples: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_event_depth: 64,
            frame_rate: 60,
            max_catch_up_ticks: 10,
            curve_samples: 16,
        }
    }
}

impl EngineConfig {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.max_event_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "max_event_depth must be at least 1".into(),
            ));
        }
        if self.frame_rate == 0 {
            return Err(EngineError::InvalidConfig(
                "frame_rate must be at least 1".into(),
            ));
        }
        if self.max_catch_up_ticks == 0 {
            return Err(EngineError::InvalidConfig(
                "max_catch_up_ticks must be at least 1".into(),
            ));
        }
        if self.curve_samples < 2 {
            return Err(EngineError::InvalidConfig(
                "curve_samples must be at least 2".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    #[cfg(feature = "manifest")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_event_depth(mut self, depth: usize) -> Self {
        self.max_event_depth = depth;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Seconds per tick.
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}
