// components/character.rs
//
// The per-glyph node that owns motion, animation and events.

use glam::Vec2;

use crate::api::config::EngineConfig;
use crate::api::error::Result;
use crate::api::types::{CharacterId, Visual};
use crate::components::animation::Animation;
use crate::components::events::{Action, Event, EventHandler};
use crate::components::motion::Motion;
use crate::renderer::cell::RenderCell;

/// One glyph of the input text, with everything needed to move and restyle it.
///
/// A character exclusively owns its motion, animation and event table, so
/// stepping one character never reads another's state.
#[derive(Debug)]
pub struct Character {
    /// Stable identifier, usually the glyph's position in the input.
    pub id: CharacterId,
    /// Symbol taken from the input text.
    input_symbol: String,
    /// Grid cell the glyph occupies in the input layout.
    home: Vec2,
    /// Whether the renderer should draw this character.
    pub visible: bool,
    /// Draw order. Higher layers are drawn on top.
    pub layer: i32,
    pub motion: Motion,
    pub animation: Animation,
    pub events: EventHandler,
    /// Dispatch ceiling copied from the engine config.
    pub(crate) max_event_depth: usize,
    /// Dispatch depth of the innermost running callback, so calls made from
    /// inside a callback continue counting instead of starting over.
    pub(crate) dispatch_depth: usize,
    /// First dispatch cycle hit while a callback was running. Callbacks may
    /// swallow the error, so dispatch re-raises it once the callback returns.
    pub(crate) nested_cycle: Option<(Event, usize)>,
}

impl Character {
    /// Create an invisible character resting at its home cell.
    pub fn new(id: CharacterId, symbol: impl Into<String>, home: Vec2) -> Self {
        let config = EngineConfig::default();
        Self {
            id,
            input_symbol: symbol.into(),
            home,
            visible: false,
            layer: 0,
            motion: Motion::new(home).with_curve_samples(config.curve_samples),
            animation: Animation::new(),
            events: EventHandler::new(),
            max_event_depth: config.max_event_depth,
            dispatch_depth: 0,
            nested_cycle: None,
        }
    }

    // -- Builder pattern --

    /// Apply engine settings. Fails if the config does not validate.
    pub fn with_config(self, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(self.configured(config))
    }

    /// Apply settings already validated by the caller.
    pub(crate) fn configured(mut self, config: &EngineConfig) -> Self {
        self.max_event_depth = config.max_event_depth;
        self.motion = self.motion.with_curve_samples(config.curve_samples);
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Bind a reaction to an event on this character.
    ///
    /// Fails with `RegistrationClosed` once the character has ticked.
    pub fn on(&mut self, event: Event, action: Action) -> Result<()> {
        self.events.register(event, action)
    }

    pub fn input_symbol(&self) -> &str {
        &self.input_symbol
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn coordinate(&self) -> Vec2 {
        self.motion.current_coordinate()
    }

    /// The appearance the animation last applied, if any.
    pub fn visual(&self) -> Option<&Visual> {
        self.animation.current_frame()
    }

    pub fn max_event_depth(&self) -> usize {
        self.max_event_depth
    }

    /// True while a path or a scene is running.
    pub fn is_active(&self) -> bool {
        self.motion.active_path().is_some() || self.animation.active_scene().is_some()
    }

    /// What the renderer needs to draw this character this tick.
    pub fn render_cell(&self) -> RenderCell {
        RenderCell {
            id: self.id,
            coord: self.coordinate(),
            visible: self.visible,
            layer: self.layer,
            visual: self.visual().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PathId;
    use crate::components::path::Path;
    use crate::components::scene::Scene;

    #[test]
    fn new_character_rests_at_home() {
        let c = Character::new(CharacterId(3), "x", Vec2::new(4.0, 1.0));
        assert_eq!(c.coordinate(), Vec2::new(4.0, 1.0));
        assert_eq!(c.input_symbol(), "x");
        assert!(!c.visible);
        assert!(!c.is_active());
        assert!(c.visual().is_none());
    }

    #[test]
    fn config_sets_dispatch_ceiling() {
        let config = EngineConfig::default().with_max_event_depth(5);
        let c = Character::new(CharacterId(0), "a", Vec2::ZERO)
            .with_config(&config)
            .unwrap();
        assert_eq!(c.max_event_depth(), 5);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = EngineConfig::default().with_max_event_depth(0);
        let err = Character::new(CharacterId(0), "a", Vec2::ZERO)
            .with_config(&config)
            .unwrap_err();
        assert!(matches!(err, crate::api::error::EngineError::InvalidConfig(_)));
    }

    #[test]
    fn activity_follows_path_and_scene() {
        let mut c = Character::new(CharacterId(0), "a", Vec2::ZERO);
        c.motion.register_path(Path::new("p").to(Vec2::new(3.0, 0.0))).unwrap();
        c.animation
            .register_scene(Scene::new("s").with_frame("*", 1, None))
            .unwrap();

        c.motion.activate_path(&PathId::from("p")).unwrap();
        assert!(c.is_active());
        c.motion.deactivate();
        assert!(!c.is_active());

        c.animation.activate_scene(&"s".into()).unwrap();
        assert!(c.is_active());
    }

    #[test]
    fn render_cell_carries_position_and_visual() {
        let mut c = Character::new(CharacterId(7), "a", Vec2::new(2.0, 5.0))
            .with_visibility(true)
            .with_layer(2);
        c.animation.set_appearance("#", None);

        let cell = c.render_cell();
        assert_eq!(cell.id, CharacterId(7));
        assert_eq!(cell.coord, Vec2::new(2.0, 5.0));
        assert!(cell.visible);
        assert_eq!(cell.layer, 2);
        assert_eq!(cell.visual.map(|v| v.symbol), Some("#".to_string()));
    }
}
