// assets/registry.rs
//
// Validated paths and scenes built from a manifest, installable on characters.

use std::collections::HashMap;
use glam::Vec2;

use crate::api::error::Result;
use crate::api::types::{PathId, SceneId, WaypointId};
use crate::assets::manifest::{ChoreographyManifest, PathDef, SceneDef};
use crate::components::character::Character;
use crate::components::path::{Path, Waypoint};
use crate::components::scene::Scene;
use crate::math::Controls;

/// A path definition resolved from a manifest.
#[derive(Debug, Clone)]
struct PathTemplate {
    path: Path,
    /// Waypoints are offsets from each character's home.
    relative: bool,
}

/// Validated paths and scenes, built from a ChoreographyManifest.
/// Installs the same choreography on any number of characters.
#[derive(Debug, Clone, Default)]
pub struct ChoreographyRegistry {
    paths: HashMap<PathId, PathTemplate>,
    scenes: HashMap<SceneId, Scene>,
}

impl ChoreographyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed manifest, rejecting invalid definitions.
    pub fn from_manifest(manifest: &ChoreographyManifest) -> Result<Self> {
        let mut registry = Self::new();
        for (name, def) in &manifest.paths {
            let path = build_path(name, def);
            path.validate()?;
            registry.paths.insert(path.id.clone(), PathTemplate { path, relative: def.relative });
        }
        for (name, def) in &manifest.scenes {
            let scene = build_scene(name, def);
            scene.validate()?;
            registry.scenes.insert(scene.id.clone(), scene);
        }
        log::debug!(
            "choreography loaded: {} paths, {} scenes",
            registry.paths.len(),
            registry.scenes.len()
        );
        Ok(registry)
    }

    /// Parse and build in one go.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_manifest(&ChoreographyManifest::from_json(json)?)
    }

    /// Look up a path by id, as written in the manifest.
    pub fn path(&self, id: &str) -> Option<&Path> {
        self.paths.get(&PathId::from(id)).map(|t| &t.path)
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(&SceneId::from(id))
    }

    /// Register every path and scene on `character`.
    ///
    /// Relative paths are shifted by the character's home coordinate.
    pub fn install_into(&self, character: &mut Character) -> Result<()> {
        let home = character.home();
        for template in self.paths.values() {
            let path = if template.relative {
                offset(&template.path, home)
            } else {
                template.path.clone()
            };
            character.motion.register_path(path)?;
        }
        for scene in self.scenes.values() {
            character.animation.register_scene(scene.clone())?;
        }
        Ok(())
    }
}

fn build_path(name: &str, def: &PathDef) -> Path {
    let mut path = Path::new(name).with_speed(def.speed).with_hold(def.hold);
    path.looping = def.looping;
    path.layer = def.layer;
    for (i, wp) in def.waypoints.iter().enumerate() {
        let id = wp.id.clone().unwrap_or_else(|| i.to_string());
        path = path.with_waypoint(Waypoint {
            id: WaypointId::new(id),
            coord: wp.coord,
            controls: Controls::from_points(&wp.controls),
            speed: wp.speed,
            easing: wp.easing,
        });
    }
    path
}

fn build_scene(name: &str, def: &SceneDef) -> Scene {
    let mut scene = Scene::new(name).with_sync(def.sync).with_easing(def.easing);
    scene.looping = def.looping;
    for frame in &def.frames {
        scene.add_frame(frame.symbol.as_str(), frame.duration, frame.color);
    }
    scene
}

fn offset(path: &Path, by: Vec2) -> Path {
    let mut path = path.clone();
    for waypoint in &mut path.waypoints {
        waypoint.coord += by;
        waypoint.controls = match waypoint.controls {
            Controls::None => Controls::None,
            Controls::Quadratic(c) => Controls::Quadratic(c + by),
            Controls::Cubic(a, b) => Controls::Cubic(a + by, b + by),
        };
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::EngineError;
    use crate::api::types::CharacterId;
    use crate::math::Easing;

    const JSON: &str = r#"{
        "paths": {
            "rise": {
                "relative": true,
                "speed": 2.0,
                "layer": 1,
                "waypoints": [
                    { "coord": [0.0, -4.0], "controls": [[2.0, -2.0]], "easing": "quad_out" },
                    { "id": "top", "coord": [0.0, -8.0] }
                ]
            },
            "fixed": { "waypoints": [ { "coord": [5.0, 5.0] } ] }
        },
        "scenes": {
            "sparkle": { "frames": [ { "symbol": "*" }, { "symbol": "+", "duration": 2 } ] }
        }
    }"#;

    #[test]
    fn loads_from_manifest() {
        let reg = ChoreographyRegistry::from_json(JSON).unwrap();

        let rise = reg.path("rise").expect("rise should exist");
        assert_eq!(rise.speed, 2.0);
        assert_eq!(rise.layer, Some(1));
        assert_eq!(rise.waypoints[0].id.as_str(), "0");
        assert_eq!(rise.waypoints[1].id.as_str(), "top");
        assert_eq!(rise.waypoints[0].controls, Controls::Quadratic(Vec2::new(2.0, -2.0)));
        assert_eq!(rise.waypoints[0].easing, Easing::QuadOut);

        let sparkle = reg.scene("sparkle").expect("sparkle should exist");
        assert_eq!(sparkle.total_duration(), 3);
    }

    #[test]
    fn install_offsets_relative_paths() {
        let reg = ChoreographyRegistry::from_json(JSON).unwrap();
        let mut c = Character::new(CharacterId(0), "a", Vec2::new(10.0, 20.0));
        reg.install_into(&mut c).unwrap();

        let rise = c.motion.query_path(&"rise".into()).unwrap();
        assert_eq!(rise.waypoints[1].coord, Vec2::new(10.0, 12.0));
        assert_eq!(rise.waypoints[0].controls, Controls::Quadratic(Vec2::new(12.0, 18.0)));

        let fixed = c.motion.query_path(&"fixed".into()).unwrap();
        assert_eq!(fixed.waypoints[0].coord, Vec2::new(5.0, 5.0));
        assert!(c.animation.query_scene(&"sparkle".into()).is_some());
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let json = r#"{ "scenes": { "bad": { "frames": [ { "symbol": "x", "duration": 0 } ] } } }"#;
        let err = ChoreographyRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDuration { .. }));

        let json = r#"{ "paths": { "stuck": { "speed": 0.0, "waypoints": [] } } }"#;
        let err = ChoreographyRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSpeed { .. }));
    }

    #[test]
    fn unknown_returns_none() {
        let reg = ChoreographyRegistry::new();
        assert!(reg.path("nonexistent").is_none());
        assert!(reg.scene("nonexistent").is_none());
    }
}
