// components/events.rs
//
// Events raised by motion and animation, and the reactions bound to them.
//
// An `Event` value is also the lookup key: it names the subject kind, the
// subject id and the transition in one hashable enum.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use glam::Vec2;

use crate::api::error::{EngineError, Result};
use crate::api::types::{PathId, SceneId, WaypointId};
use crate::components::character::Character;

/// A state transition raised by a character's motion or animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    PathActivated(PathId),
    PathComplete(PathId),
    /// The final waypoint was reached and the path's hold began.
    PathHolding(PathId),
    WaypointReached(PathId, WaypointId),
    SceneActivated(SceneId),
    SceneComplete(SceneId),
    SceneLooped(SceneId),
}

/// The transition alone, without its subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PathActivated,
    PathComplete,
    PathHolding,
    WaypointReached,
    SceneActivated,
    SceneComplete,
    SceneLooped,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PathActivated(_) => EventKind::PathActivated,
            Event::PathComplete(_) => EventKind::PathComplete,
            Event::PathHolding(_) => EventKind::PathHolding,
            Event::WaypointReached(..) => EventKind::WaypointReached,
            Event::SceneActivated(_) => EventKind::SceneActivated,
            Event::SceneComplete(_) => EventKind::SceneComplete,
            Event::SceneLooped(_) => EventKind::SceneLooped,
        }
    }
}

/// Error type returned by external callbacks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

type CallbackFn = dyn Fn(&mut Character, &Event) -> std::result::Result<(), CallbackError> + Send + Sync;

/// An externally supplied handler invoked with the character and the event.
///
/// Failures (returned errors or panics) are logged and swallowed by dispatch.
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Character, &Event) -> std::result::Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(
        &self,
        character: &mut Character,
        event: &Event,
    ) -> std::result::Result<(), CallbackError> {
        (self.0)(character, event)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// A reaction executed when its event is raised.
#[derive(Debug, Clone)]
pub enum Action {
    ActivatePath(PathId),
    ActivateScene(SceneId),
    /// Cancel the active path without completing it.
    DeactivatePath,
    /// Cancel the active scene without completing it.
    DeactivateScene,
    SetVisibility(bool),
    SetLayer(i32),
    SetCoordinate(Vec2),
    /// Show the character's input symbol with no color.
    ResetAppearance,
    Callback(Callback),
}

impl Action {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&mut Character, &Event) -> std::result::Result<(), CallbackError> + Send + Sync + 'static,
    {
        Action::Callback(Callback::new(f))
    }
}

/// Per-character table of reactions, keyed by event.
///
/// Registration is additive and closes once the character starts ticking.
#[derive(Debug, Default)]
pub struct EventHandler {
    reactions: HashMap<Event, Vec<Action>>,
    sealed: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an action to an event. Actions run in registration order.
    pub fn register(&mut self, event: Event, action: Action) -> Result<()> {
        if self.sealed {
            return Err(EngineError::RegistrationClosed);
        }
        self.reactions.entry(event).or_default().push(action);
        Ok(())
    }

    /// Actions bound to an event, in registration order.
    pub fn actions(&self, event: &Event) -> &[Action] {
        self.reactions.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Close registration. Called when the character first ticks.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of registered actions across all events.
    pub fn len(&self) -> usize {
        self.reactions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_keep_registration_order() {
        let mut handler = EventHandler::new();
        let event = Event::PathComplete(PathId::from("fall"));
        handler.register(event.clone(), Action::SetLayer(1)).unwrap();
        handler.register(event.clone(), Action::SetVisibility(false)).unwrap();
        handler.register(event.clone(), Action::SetLayer(2)).unwrap();

        let actions = handler.actions(&event);
        assert_eq!(actions.len(), 3);
        assert!(matches!(actions[0], Action::SetLayer(1)));
        assert!(matches!(actions[1], Action::SetVisibility(false)));
        assert!(matches!(actions[2], Action::SetLayer(2)));
    }

    #[test]
    fn subjects_are_distinguished() {
        let mut handler = EventHandler::new();
        handler
            .register(Event::PathComplete(PathId::from("a")), Action::DeactivateScene)
            .unwrap();
        assert!(handler.actions(&Event::PathComplete(PathId::from("b"))).is_empty());
        assert!(handler.actions(&Event::PathActivated(PathId::from("a"))).is_empty());
        assert_eq!(handler.len(), 1);
    }

    #[test]
    fn sealed_handler_rejects_registration() {
        let mut handler = EventHandler::new();
        handler.seal();
        let err = handler
            .register(Event::SceneLooped(SceneId::from("s")), Action::ResetAppearance)
            .unwrap_err();
        assert!(matches!(err, EngineError::RegistrationClosed));
        assert!(handler.is_empty());
    }

    #[test]
    fn kind_drops_the_subject() {
        let event = Event::WaypointReached(PathId::from("p"), WaypointId::from("0"));
        assert_eq!(event.kind(), EventKind::WaypointReached);
    }
}
