// components/animation.rs
//
// Animation component: the scenes a character can show and which frame is current.
//
// Independent scenes advance one tick per step. Synced scenes pick their frame
// from the path progress passed into `step`.

use std::collections::HashMap;

use crate::api::error::{EngineError, Result};
use crate::api::types::{Color, SceneId, Visual};
use crate::components::events::Event;
use crate::components::motion::PathProgress;
use crate::components::scene::{Scene, SyncMetric};
use crate::math::Easing;

/// Slack when comparing eased tick positions against frame boundaries.
const FRAME_EPSILON: f32 = 1e-4;

/// Playback state for the active scene.
#[derive(Debug, Clone)]
struct ActiveScene {
    id: SceneId,
    /// Ticks played since activation or the last loop.
    elapsed: u32,
    frame_index: usize,
    /// Path ratio seen on the previous synced step.
    last_ratio: f32,
    /// The synced lap already ended at ratio 1.0 and is waiting for the
    /// path to wrap.
    lap_closed: bool,
}

impl ActiveScene {
    fn new(id: SceneId) -> Self {
        Self {
            id,
            elapsed: 0,
            frame_index: 0,
            last_ratio: 0.0,
            lap_closed: false,
        }
    }
}

/// Per-character animation: registered scenes, the active one, and the
/// appearance currently shown.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    scenes: HashMap<SceneId, Scene>,
    active: Option<ActiveScene>,
    /// Last applied appearance. Survives scene completion.
    visual: Option<Visual>,
    events: Vec<Event>,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scene. Replaces any inactive scene with the same id.
    ///
    /// The active scene cannot be replaced; deactivate it first.
    pub fn register_scene(&mut self, scene: Scene) -> Result<()> {
        scene.validate()?;
        if self.active_scene() == Some(&scene.id) {
            return Err(EngineError::SceneActive(scene.id));
        }
        self.scenes.insert(scene.id.clone(), scene);
        Ok(())
    }

    pub fn query_scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// Start a registered scene from its first frame.
    ///
    /// The first frame is shown immediately. An empty scene completes at once.
    pub fn activate_scene(&mut self, id: &SceneId) -> Result<()> {
        let scene = self
            .scenes
            .get(id)
            .ok_or_else(|| EngineError::UnknownScene(id.clone()))?;

        self.events.push(Event::SceneActivated(scene.id.clone()));

        let Some(first) = scene.frames.first() else {
            self.active = None;
            self.events.push(Event::SceneComplete(scene.id.clone()));
            return Ok(());
        };

        self.visual = Some(first.visual.clone());
        self.active = Some(ActiveScene::new(scene.id.clone()));
        Ok(())
    }

    /// Cancel the active scene. The current appearance stays and no
    /// completion is raised.
    pub fn deactivate(&mut self) {
        if let Some(active) = self.active.take() {
            log::trace!("scene {} deactivated", active.id);
        }
    }

    /// Rewind the active scene if it is `id`.
    pub fn reset_scene(&mut self, id: &SceneId) {
        let Some(active) = self.active.as_mut().filter(|a| &a.id == id) else {
            return;
        };
        *active = ActiveScene::new(active.id.clone());
        if let Some(first) = self.scenes.get(id).and_then(|s| s.frames.first()) {
            self.visual = Some(first.visual.clone());
        }
    }

    /// Advance the active scene by one tick.
    ///
    /// `path` is the owning character's path progress, consulted only by
    /// synced scenes. A synced scene without path progress holds its frame.
    pub fn step(&mut self, path: Option<PathProgress>) {
        let Animation { scenes, active, visual, events } = self;

        let Some(state) = active.as_mut() else {
            return;
        };
        let Some(scene) = scenes.get(&state.id) else {
            *active = None;
            return;
        };
        if scene.frames.is_empty() {
            *active = None;
            return;
        }

        let finished = match scene.sync {
            SyncMetric::None => step_ticks(scene, state),
            SyncMetric::Step | SyncMetric::Distance => {
                let Some(progress) = path else {
                    return;
                };
                let ratio = match scene.sync {
                    SyncMetric::Step => progress.step_ratio,
                    _ => progress.distance_ratio,
                };
                step_synced(scene, state, ratio, events)
            }
        };

        if let Some(frame) = scene.frames.get(state.frame_index) {
            *visual = Some(frame.visual.clone());
        }

        if finished {
            if scene.looping {
                // Synced scenes keep their lap state and follow the path's wrap.
                if scene.sync == SyncMetric::None {
                    *state = ActiveScene::new(state.id.clone());
                }
                events.push(Event::SceneLooped(scene.id.clone()));
            } else {
                events.push(Event::SceneComplete(scene.id.clone()));
                *active = None;
            }
        }
    }

    /// The appearance to draw, if any has ever been applied.
    pub fn current_frame(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }

    /// Override the appearance directly, outside of any scene.
    pub fn set_appearance(&mut self, symbol: impl Into<String>, color: Option<Color>) {
        self.visual = Some(Visual::new(symbol, color));
    }

    pub fn active_scene(&self) -> Option<&SceneId> {
        self.active.as_ref().map(|a| &a.id)
    }

    pub fn frame_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.frame_index)
    }

    /// True when nothing is playing or the active scene loops forever.
    pub fn is_active_scene_complete(&self) -> bool {
        match &self.active {
            None => true,
            Some(active) => self.scenes.get(&active.id).map_or(true, |s| s.looping),
        }
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Tick-driven progression. Returns true when the last tick was played.
fn step_ticks(scene: &Scene, state: &mut ActiveScene) -> bool {
    let total = scene.total_duration();
    let position = if scene.easing == Easing::Linear {
        state.elapsed as f32
    } else {
        let eased = scene.easing.apply(state.elapsed as f32 / total as f32);
        (eased * total as f32 + FRAME_EPSILON).clamp(0.0, total as f32)
    };
    state.frame_index = scene.frame_at(position);
    state.elapsed += 1;
    state.elapsed >= total
}

/// Path-synced progression. Returns true the first time the path ratio
/// reaches 1 in a lap; the last frame then holds until the path wraps.
fn step_synced(scene: &Scene, state: &mut ActiveScene, ratio: f32, events: &mut Vec<Event>) -> bool {
    let count = scene.frames.len();
    let eased = scene.easing.apply(ratio);
    state.frame_index = ((eased * count as f32).max(0.0) as usize).min(count - 1);

    let wrapped = ratio < state.last_ratio;
    state.last_ratio = ratio;

    if wrapped {
        // A lap that already ended at 1.0 was reported then.
        let reported = std::mem::take(&mut state.lap_closed);
        if scene.looping && !reported {
            events.push(Event::SceneLooped(scene.id.clone()));
        }
    }

    if ratio >= 1.0 && !state.lap_closed {
        state.lap_closed = true;
        return true;
    }
    false
}
