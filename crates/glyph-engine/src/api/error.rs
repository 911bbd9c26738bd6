// api/error.rs
//
// The error taxonomy shared by motion, animation and dispatch.

use thiserror::Error;

use crate::api::types::{PathId, SceneId};
use crate::components::events::Event;

/// Errors surfaced by motion, animation and event dispatch.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Activation referenced a path that was never registered.
    #[error("unknown path: {0}")]
    UnknownPath(PathId),

    /// Activation referenced a scene that was never registered.
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),

    /// Dispatch recursed past the configured ceiling.
    #[error("event cycle detected while dispatching {event:?} (depth {depth})")]
    EventCycle { event: Event, depth: usize },

    /// An external callback failed. Logged by dispatch, never propagated.
    #[error("callback failed: {0}")]
    Callback(String),

    #[error("path {path} has invalid speed {speed}")]
    InvalidSpeed { path: PathId, speed: f32 },

    #[error("scene {scene} has a frame with invalid duration {duration}")]
    InvalidDuration { scene: SceneId, duration: u32 },

    /// Event registration is only allowed before the character starts ticking.
    #[error("event registration is closed once the character has started")]
    RegistrationClosed,

    /// A path was re-registered while the character is travelling it.
    #[error("path {0} is active and cannot be replaced")]
    PathActive(PathId),

    /// A scene was re-registered while the character is playing it.
    #[error("scene {0} is active and cannot be replaced")]
    SceneActive(SceneId),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "manifest")]
    #[error("malformed manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Whether this error aborts the operation that produced it.
    ///
    /// Callback failures are reported but never stop an animation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, EngineError::Callback(_))
    }
}
