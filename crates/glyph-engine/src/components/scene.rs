// components/scene.rs
//
// Scenes: ordered appearance frames for a character.

use serde::{Deserialize, Serialize};

use crate::api::error::{EngineError, Result};
use crate::api::types::{Color, SceneId, Visual};
use crate::math::Easing;

/// How a scene's frame pointer advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMetric {
    /// One tick at a time, holding each frame for its duration.
    #[default]
    None,
    /// Follows the active path's completed segment count.
    Step,
    /// Follows the distance travelled along the active path.
    Distance,
}

/// A single appearance held for `duration` ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub visual: Visual,
    pub duration: u32,
}

impl Frame {
    pub fn new(symbol: impl Into<String>, duration: u32, color: Option<Color>) -> Self {
        Self {
            visual: Visual::new(symbol, color),
            duration,
        }
    }
}

/// An ordered list of frames plus progression settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: SceneId,
    pub frames: Vec<Frame>,
    pub looping: bool,
    pub sync: SyncMetric,
    pub easing: Easing,
}

impl Scene {
    pub fn new(id: impl Into<SceneId>) -> Self {
        Self {
            id: id.into(),
            frames: Vec::new(),
            looping: false,
            sync: SyncMetric::None,
            easing: Easing::Linear,
        }
    }

    // -- Builder pattern --

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn with_sync(mut self, sync: SyncMetric) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_frame(mut self, symbol: impl Into<String>, duration: u32, color: Option<Color>) -> Self {
        self.add_frame(symbol, duration, color);
        self
    }

    pub fn add_frame(&mut self, symbol: impl Into<String>, duration: u32, color: Option<Color>) -> &mut Self {
        self.frames.push(Frame::new(symbol, duration, color));
        self
    }

    /// Add one frame per step of a precomputed gradient, spreading `symbols`
    /// evenly across it. With more symbols than colors the colors are spread
    /// across the symbols instead.
    pub fn apply_gradient_to_symbols<S: AsRef<str>>(
        &mut self,
        colors: &[Color],
        symbols: &[S],
        duration: u32,
    ) -> &mut Self {
        if symbols.is_empty() {
            return self;
        }
        let steps = colors.len().max(symbols.len());
        for i in 0..steps {
            let symbol = symbols[i * symbols.len() / steps].as_ref();
            let color = if colors.is_empty() {
                None
            } else {
                Some(colors[i * colors.len() / steps])
            };
            self.add_frame(symbol, duration, color);
        }
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sum of all frame durations, in ticks.
    pub fn total_duration(&self) -> u32 {
        self.frames.iter().map(|f| f.duration).sum()
    }

    /// Index of the frame covering tick position `position` (clamped).
    pub fn frame_at(&self, position: f32) -> usize {
        let mut end = 0.0;
        for (i, frame) in self.frames.iter().enumerate() {
            end += frame.duration as f32;
            if position < end {
                return i;
            }
        }
        self.frames.len().saturating_sub(1)
    }

    /// Reject zero-duration frames.
    pub fn validate(&self) -> Result<()> {
        if let Some(frame) = self.frames.iter().find(|f| f.duration == 0) {
            return Err(EngineError::InvalidDuration {
                scene: self.id.clone(),
                duration: frame.duration,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_duration_sums_frames() {
        let scene = Scene::new("s")
            .with_frame("a", 2, None)
            .with_frame("b", 3, None);
        assert_eq!(scene.total_duration(), 5);
        assert_eq!(scene.frame_count(), 2);
    }

    #[test]
    fn frame_at_uses_cumulative_durations() {
        let scene = Scene::new("s")
            .with_frame("a", 2, None)
            .with_frame("b", 1, None)
            .with_frame("c", 3, None);
        assert_eq!(scene.frame_at(0.0), 0);
        assert_eq!(scene.frame_at(1.9), 0);
        assert_eq!(scene.frame_at(2.0), 1);
        assert_eq!(scene.frame_at(3.0), 2);
        assert_eq!(scene.frame_at(99.0), 2);
    }

    #[test]
    fn zero_duration_is_invalid() {
        let scene = Scene::new("bad").with_frame("x", 0, None);
        assert!(matches!(scene.validate(), Err(EngineError::InvalidDuration { .. })));
        assert!(Scene::new("empty").validate().is_ok());
    }

    #[test]
    fn gradient_gets_one_frame_per_color() {
        let colors: Vec<Color> = (0..4).map(|i| Color::Xterm(i)).collect();
        let mut scene = Scene::new("g");
        scene.apply_gradient_to_symbols(&colors, &["#", "*"], 2);

        let symbols: Vec<&str> = scene.frames.iter().map(|f| f.visual.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["#", "#", "*", "*"]);
        assert_eq!(scene.frames[3].visual.color, Some(Color::Xterm(3)));
        assert!(scene.frames.iter().all(|f| f.duration == 2));
    }

    #[test]
    fn more_symbols_than_colors_spreads_colors() {
        let colors = [Color::Rgb(0, 0, 0), Color::Rgb(255, 255, 255)];
        let mut scene = Scene::new("g");
        scene.apply_gradient_to_symbols(&colors, &["█", "▓", "▒", "░"], 1);
        assert_eq!(scene.frame_count(), 4);
        assert_eq!(scene.frames[1].visual.color, Some(Color::Rgb(0, 0, 0)));
        assert_eq!(scene.frames[2].visual.color, Some(Color::Rgb(255, 255, 255)));
    }
}
