// core/stage.rs
//
// Flat character store and the per-tick loop over it.

use crate::api::config::EngineConfig;
use crate::api::error::{EngineError, Result};
use crate::api::types::CharacterId;
use crate::components::character::Character;
use crate::core::time::TickClock;
use crate::renderer::cell::FrameSnapshot;

/// Outcome of one stage tick.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Characters whose tick was abandoned, with the reason.
    pub failures: Vec<(CharacterId, EngineError)>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Flat storage for the characters of one effect, plus the tick loop.
/// Designed for a screenful of glyphs (thousands, not millions).
pub struct Stage {
    characters: Vec<Character>,
    config: EngineConfig,
    clock: TickClock,
    ticks: u64,
}

impl Stage {
    /// Create an empty stage. Fails if the config does not validate.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: EngineConfig) -> Self {
        Self {
            characters: Vec::with_capacity(256),
            clock: TickClock::from_config(&config),
            config,
            ticks: 0,
        }
    }

    /// Build a character carrying this stage's config. Add it with `spawn`.
    pub fn character(&self, id: CharacterId, symbol: impl Into<String>, home: glam::Vec2) -> Character {
        Character::new(id, symbol, home).configured(&self.config)
    }

    /// Add a character. Characters tick in spawn order.
    pub fn spawn(&mut self, character: Character) {
        self.characters.push(character);
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once no character has an active path or scene.
    pub fn is_complete(&self) -> bool {
        self.characters.iter().all(|c| !c.is_active())
    }

    /// Step every character once.
    ///
    /// A failing character loses the rest of its tick; the others still run.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport {
            tick: self.ticks,
            failures: Vec::new(),
        };
        for character in &mut self.characters {
            if let Err(err) = character.tick() {
                log::warn!("tick {}: character {:?} abandoned: {}", self.ticks, character.id, err);
                report.failures.push((character.id, err));
            }
        }
        report
    }

    /// Feed wall-clock time and run however many ticks it covers.
    pub fn advance(&mut self, dt: f32) -> Vec<TickReport> {
        let ticks = self.clock.accumulate(dt);
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Render state of every character as of the last tick.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::new(self.ticks, self.characters.iter().map(Character::render_cell).collect())
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::with_valid_config(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::components::events::{Action, Event};
    use crate::components::path::Path;
    use crate::components::scene::Scene;

    fn mover(stage: &Stage, id: u32, distance: f32) -> Character {
        let mut c = stage.character(CharacterId(id), "m", Vec2::ZERO);
        c.motion
            .register_path(Path::new("go").to(Vec2::new(distance, 0.0)))
            .unwrap();
        c.activate_path(&"go".into()).unwrap();
        c
    }

    #[test]
    fn spawn_and_get() {
        let mut stage = Stage::default();
        let c = stage.character(CharacterId(1), "a", Vec2::new(10.0, 20.0));
        stage.spawn(c);
        assert_eq!(stage.len(), 1);
        assert_eq!(stage.get(CharacterId(1)).unwrap().coordinate(), Vec2::new(10.0, 20.0));
        assert!(stage.get(CharacterId(2)).is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Stage::new(EngineConfig::default().with_max_event_depth(0)).err();
        assert!(matches!(err, Some(EngineError::InvalidConfig(_))));
        assert!(Stage::new(EngineConfig::default().with_frame_rate(0)).is_err());
        assert!(Stage::new(EngineConfig::default()).is_ok());
    }

    #[test]
    fn runs_until_every_character_is_done() {
        let mut stage = Stage::default();
        let short = mover(&stage, 0, 2.0);
        let long = mover(&stage, 1, 5.0);
        stage.spawn(short);
        stage.spawn(long);

        let mut ticks = 0;
        while !stage.is_complete() {
            assert!(stage.tick().is_clean());
            ticks += 1;
            assert!(ticks <= 10, "stage never completed");
        }
        assert_eq!(ticks, 5);
        assert_eq!(stage.ticks(), 5);
    }

    #[test]
    fn failing_character_does_not_stop_others() {
        let mut stage = Stage::new(EngineConfig::default().with_max_event_depth(4)).unwrap();

        let mut looping = stage.character(CharacterId(0), "x", Vec2::ZERO);
        looping.motion.register_path(Path::new("a")).unwrap();
        looping.animation.register_scene(Scene::new("b")).unwrap();
        looping
            .animation
            .register_scene(Scene::new("intro").with_frame("i", 1, None))
            .unwrap();
        looping
            .on(Event::SceneComplete("intro".into()), Action::ActivatePath("a".into()))
            .unwrap();
        looping
            .on(Event::PathComplete("a".into()), Action::ActivateScene("b".into()))
            .unwrap();
        looping
            .on(Event::SceneComplete("b".into()), Action::ActivatePath("a".into()))
            .unwrap();
        looping.activate_scene(&"intro".into()).unwrap();
        stage.spawn(looping);

        let healthy = mover(&stage, 1, 3.0);
        stage.spawn(healthy);

        let report = stage.tick();
        assert_eq!(report.tick, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, CharacterId(0));
        assert!(matches!(report.failures[0].1, EngineError::EventCycle { .. }));

        let healthy = stage.get(CharacterId(1)).unwrap();
        assert!((healthy.coordinate().x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn advance_converts_time_into_ticks() {
        let mut stage = Stage::new(EngineConfig::default().with_frame_rate(4)).unwrap();
        let c = mover(&stage, 0, 10.0);
        stage.spawn(c);

        assert!(stage.advance(0.125).is_empty());
        assert_eq!(stage.advance(0.625).len(), 3);
        let x = stage.get(CharacterId(0)).unwrap().coordinate().x;
        assert!((x - 3.0).abs() < 1e-4, "x was {}", x);
    }

    #[test]
    fn snapshot_reflects_last_tick() {
        let mut stage = Stage::default();
        let mut c = mover(&stage, 0, 4.0).with_visibility(true);
        c.animation.set_appearance("*", None);
        stage.spawn(c);
        stage.tick();

        let snapshot = stage.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.cells()[0].coord, Vec2::new(1.0, 0.0));
        assert_eq!(snapshot.instances()[0].visible, 1.0);
    }
}
