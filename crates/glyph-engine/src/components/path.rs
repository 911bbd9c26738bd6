// components/path.rs
//
// Waypoints and paths: the immutable route definitions a `Motion` follows.

use std::collections::HashSet;
use glam::Vec2;

use crate::api::error::{EngineError, Result};
use crate::api::types::{PathId, WaypointId};
use crate::math::{Controls, Easing};

/// A target point on a path.
///
/// Control points bend the segment that arrives at this waypoint: one makes a
/// quadratic curve, two a cubic one.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub id: WaypointId,
    pub coord: Vec2,
    pub controls: Controls,
    /// Multiplier on the path speed while travelling toward this waypoint.
    pub speed: f32,
    /// Easing applied to progress along the arriving segment.
    pub easing: Easing,
}

impl Waypoint {
    pub fn new(id: impl Into<WaypointId>, coord: Vec2) -> Self {
        Self {
            id: id.into(),
            coord,
            controls: Controls::None,
            speed: 1.0,
            easing: Easing::Linear,
        }
    }

    // -- Builder pattern --

    pub fn with_control(mut self, control: Vec2) -> Self {
        self.controls = Controls::Quadratic(control);
        self
    }

    pub fn with_controls(mut self, first: Vec2, second: Vec2) -> Self {
        self.controls = Controls::Cubic(first, second);
        self
    }

    pub fn with_speed(mut self, multiplier: f32) -> Self {
        self.speed = multiplier;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// An ordered route plus the parameters used to travel it.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub id: PathId,
    pub waypoints: Vec<Waypoint>,
    /// Distance covered per tick, before waypoint multipliers.
    pub speed: f32,
    /// Restart from the first waypoint instead of completing.
    pub looping: bool,
    /// Ticks spent at the final waypoint before the lap ends.
    pub hold: u32,
    /// Layer given to the character when this path activates.
    pub layer: Option<i32>,
}

impl Path {
    pub fn new(id: impl Into<PathId>) -> Self {
        Self {
            id: id.into(),
            waypoints: Vec::new(),
            speed: 1.0,
            looping: false,
            hold: 0,
            layer: None,
        }
    }

    // -- Builder pattern --

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn with_hold(mut self, ticks: u32) -> Self {
        self.hold = ticks;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn with_waypoint(mut self, waypoint: Waypoint) -> Self {
        self.waypoints.push(waypoint);
        self
    }

    /// Append a straight-line waypoint named after its index.
    pub fn to(mut self, coord: Vec2) -> Self {
        self.add_waypoint(coord);
        self
    }

    /// Append a waypoint named after its index and return it for tweaking.
    pub fn add_waypoint(&mut self, coord: Vec2) -> &mut Waypoint {
        let id = WaypointId::new(self.waypoints.len().to_string());
        self.waypoints.push(Waypoint::new(id, coord));
        let last = self.waypoints.len() - 1;
        &mut self.waypoints[last]
    }

    pub fn query_waypoint(&self, id: &WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| &w.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Reject non-positive speeds and duplicate waypoint ids.
    pub fn validate(&self) -> Result<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(EngineError::InvalidSpeed {
                path: self.id.clone(),
                speed: self.speed,
            });
        }

        let mut seen = HashSet::with_capacity(self.waypoints.len());
        for waypoint in &self.waypoints {
            if !(waypoint.speed.is_finite() && waypoint.speed > 0.0) {
                return Err(EngineError::InvalidSpeed {
                    path: self.id.clone(),
                    speed: self.speed * waypoint.speed,
                });
            }
            if !seen.insert(&waypoint.id) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate waypoint {} in path {}",
                    waypoint.id, self.id
                )));
            }
        }
        Ok(())
    }
}
