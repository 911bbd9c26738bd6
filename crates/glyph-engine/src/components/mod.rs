// components/mod.rs
//
// Per-character state. A Character owns one Motion, one Animation and one
// EventHandler; path/scene/events hold the definitions they work from.

pub mod animation;
pub mod character;
pub mod events;
pub mod motion;
pub mod path;
pub mod scene;

pub use animation::Animation;
pub use character::Character;
pub use events::{Action, Callback, CallbackError, Event, EventHandler, EventKind};
pub use motion::{Motion, PathProgress};
pub use path::{Path, Waypoint};
pub use scene::{Frame, Scene, SyncMetric};
