// assets/manifest.rs
//
// JSON shape of declarative path and scene definitions.

use std::collections::HashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::Result;
use crate::api::types::Color;
use crate::components::scene::SyncMetric;
use crate::math::Easing;

/// Declarative paths and scenes for an effect, keyed by id.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoreographyManifest {
    #[serde(default)]
    pub paths: HashMap<String, PathDef>,
    #[serde(default)]
    pub scenes: HashMap<String, SceneDef>,
}

/// Describes a path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDef {
    pub waypoints: Vec<WaypointDef>,
    /// Distance per tick (default: 1.0).
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Ticks to hold at the final waypoint.
    #[serde(default)]
    pub hold: u32,
    #[serde(default)]
    pub layer: Option<i32>,
    /// Coordinates are offsets from the character's home cell.
    #[serde(default)]
    pub relative: bool,
}

/// Describes one waypoint. Controls are `[x, y]` pairs; at most two are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointDef {
    /// Defaults to the waypoint's index.
    #[serde(default)]
    pub id: Option<String>,
    pub coord: Vec2,
    #[serde(default)]
    pub controls: Vec<Vec2>,
    /// Speed multiplier (default: 1.0).
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub easing: Easing,
}

/// Describes a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDef {
    pub frames: Vec<FrameDef>,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub sync: SyncMetric,
    #[serde(default)]
    pub easing: Easing,
}

/// Describes one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDef {
    pub symbol: String,
    #[serde(default)]
    pub color: Option<Color>,
    /// Ticks to hold the frame (default: 1).
    #[serde(default = "default_duration")]
    pub duration: u32,
}

fn default_speed() -> f32 {
    1.0
}

fn default_duration() -> u32 {
    1
}

impl ChoreographyManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
