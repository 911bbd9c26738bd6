// api/mod.rs
//
// Public vocabulary: ids, colors, config and errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use types::{CharacterId, Color, PathId, SceneId, Visual, WaypointId};
