// assets/mod.rs
//
// Declarative choreography loaded from JSON (feature "manifest").

pub mod manifest;
pub mod registry;

pub use manifest::{ChoreographyManifest, FrameDef, PathDef, SceneDef, WaypointDef};
pub use registry::ChoreographyRegistry;
