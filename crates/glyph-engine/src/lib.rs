// lib.rs
//
// Per-character motion, animation and event dispatch for terminal text effects.

pub mod api;
pub mod math;
pub mod components;
pub mod systems;
pub mod core;
pub mod renderer;
#[cfg(feature = "manifest")]
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::EngineConfig;
pub use api::error::{EngineError, Result};
pub use api::types::{CharacterId, Color, PathId, SceneId, Visual, WaypointId};
pub use math::{Controls, Easing, EasingFn, interpolate, lerp, lerp_vec2, segment_length};
pub use components::animation::Animation;
pub use components::character::Character;
pub use components::events::{Action, Callback, CallbackError, Event, EventHandler, EventKind};
pub use components::motion::{Motion, PathProgress};
pub use components::path::{Path, Waypoint};
pub use components::scene::{Frame, Scene, SyncMetric};
pub use core::stage::{Stage, TickReport};
pub use core::time::TickClock;
pub use renderer::cell::{CellInstance, FrameSnapshot, RenderCell};

#[cfg(feature = "manifest")]
pub use assets::manifest::ChoreographyManifest;
#[cfg(feature = "manifest")]
pub use assets::registry::ChoreographyRegistry;

pub use glam::Vec2;
