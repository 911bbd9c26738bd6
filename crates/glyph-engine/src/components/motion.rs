// components/motion.rs
//
// Motion component: the paths a character can travel and its position on them.
//
// The first segment of a path runs from the character's coordinate at
// activation to waypoint 0; each later segment runs between consecutive
// waypoints. A looping path closes the lap with a segment from the last
// waypoint back to waypoint 0, so every waypoint is reached once per lap.
//
// Events are queued rather than dispatched; the owning character drains them.

use std::collections::HashMap;
use glam::Vec2;

use crate::api::error::{EngineError, Result};
use crate::api::types::PathId;
use crate::components::events::Event;
use crate::components::path::Path;
use crate::math::{interpolate, segment_length};

/// Distance slack when deciding whether a waypoint was reached.
const ARRIVAL_EPSILON: f32 = 1e-5;

/// How far along its active path a character is, as seen by synced scenes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathProgress {
    /// Completed segments over total segments.
    pub step_ratio: f32,
    /// Distance travelled over the length of the current lap.
    pub distance_ratio: f32,
}

impl PathProgress {
    pub const START: Self = Self { step_ratio: 0.0, distance_ratio: 0.0 };
    pub const COMPLETE: Self = Self { step_ratio: 1.0, distance_ratio: 1.0 };
}

/// Travel state for the active path.
#[derive(Debug, Clone)]
struct ActivePath {
    id: PathId,
    /// Index of the waypoint being travelled toward.
    segment: usize,
    /// Start of the current segment.
    origin: Vec2,
    /// Distance covered along the current segment.
    travelled: f32,
    /// Segment lengths for the current lap.
    lengths: Vec<f32>,
    lap_length: f32,
    /// Length of segments already finished this lap.
    lap_travelled: f32,
    /// Remaining hold ticks once the final waypoint is reached.
    holding: Option<u32>,
}

impl ActivePath {
    fn start(path: &Path, origin: Vec2, samples: usize) -> Self {
        let mut active = Self {
            id: path.id.clone(),
            segment: 0,
            origin,
            travelled: 0.0,
            lengths: Vec::with_capacity(path.waypoints.len()),
            lap_length: 0.0,
            lap_travelled: 0.0,
            holding: None,
        };
        active.measure(path, samples);
        active
    }

    /// Recompute segment lengths starting from the current origin.
    fn measure(&mut self, path: &Path, samples: usize) {
        self.lengths.clear();
        let mut from = self.origin;
        for waypoint in &path.waypoints {
            self.lengths.push(segment_length(from, waypoint.coord, waypoint.controls, samples));
            from = waypoint.coord;
        }
        self.lap_length = self.lengths.iter().sum();
    }

    fn progress(&self) -> PathProgress {
        let segments = self.lengths.len().max(1) as f32;
        let step_ratio = (self.segment as f32 / segments).min(1.0);
        let distance_ratio = if self.lap_length > 0.0 {
            ((self.lap_travelled + self.travelled) / self.lap_length).clamp(0.0, 1.0)
        } else {
            step_ratio
        };
        PathProgress { step_ratio, distance_ratio }
    }
}

/// Per-character motion: registered paths, current coordinate, active path.
#[derive(Debug, Clone)]
pub struct Motion {
    paths: HashMap<PathId, Path>,
    coord: Vec2,
    active: Option<ActivePath>,
    /// Progress as of the end of the last step or activation.
    progress: Option<PathProgress>,
    events: Vec<Event>,
    curve_samples: usize,
}

impl Motion {
    /// Create a motion resting at `coord`.
    pub fn new(coord: Vec2) -> Self {
        Self {
            paths: HashMap::new(),
            coord,
            active: None,
            progress: None,
            events: Vec::new(),
            curve_samples: 16,
        }
    }

    pub fn with_curve_samples(mut self, samples: usize) -> Self {
        self.curve_samples = samples.max(2);
        self
    }

    /// Add a path. Replaces any inactive path with the same id.
    ///
    /// The active path cannot be replaced; deactivate it first.
    pub fn register_path(&mut self, path: Path) -> Result<()> {
        path.validate()?;
        if self.active_path() == Some(&path.id) {
            return Err(EngineError::PathActive(path.id));
        }
        self.paths.insert(path.id.clone(), path);
        Ok(())
    }

    pub fn query_path(&self, id: &PathId) -> Option<&Path> {
        self.paths.get(id)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.values()
    }

    /// Start travelling a registered path from the current coordinate.
    ///
    /// Any previously active path is replaced without completing. An empty
    /// path completes immediately.
    pub fn activate_path(&mut self, id: &PathId) -> Result<()> {
        let path = self
            .paths
            .get(id)
            .ok_or_else(|| EngineError::UnknownPath(id.clone()))?;

        self.events.push(Event::PathActivated(path.id.clone()));

        if path.is_empty() {
            self.active = None;
            self.progress = Some(PathProgress::COMPLETE);
            self.events.push(Event::PathComplete(path.id.clone()));
            return Ok(());
        }

        self.active = Some(ActivePath::start(path, self.coord, self.curve_samples));
        self.progress = Some(PathProgress::START);
        Ok(())
    }

    /// Cancel the active path. Progress resets and no completion is raised.
    pub fn deactivate(&mut self) {
        if let Some(active) = self.active.take() {
            log::trace!("path {} deactivated", active.id);
        }
        self.progress = None;
    }

    /// Advance one tick along the active path. No-op without one.
    pub fn step(&mut self) {
        let Motion { paths, coord, active, progress, events, curve_samples } = self;

        let Some(state) = active.as_mut() else {
            *progress = None;
            return;
        };
        let Some(path) = paths.get(&state.id) else {
            *active = None;
            *progress = None;
            return;
        };

        // Fraction of this tick still available for movement.
        let mut budget = 1.0_f32;
        let mut lap_budget = budget;

        loop {
            if let Some(remaining) = state.holding {
                let remaining = remaining.saturating_sub(1);
                if remaining > 0 {
                    state.holding = Some(remaining);
                    break;
                }
                state.holding = None;
                if !finish_lap(path, state, *coord, *curve_samples, events) {
                    *active = None;
                    *progress = Some(PathProgress::COMPLETE);
                    return;
                }
                break;
            }

            let (Some(waypoint), Some(&length)) =
                (path.waypoints.get(state.segment), state.lengths.get(state.segment))
            else {
                log::warn!("path {} lost its segment {}; stopping", path.id, state.segment);
                *active = None;
                *progress = None;
                return;
            };
            let speed = path.speed * waypoint.speed;

            if length > 0.0 {
                let remaining = length - state.travelled;
                let reach = budget * speed;
                if reach + ARRIVAL_EPSILON < remaining {
                    state.travelled += reach;
                    let t = waypoint.easing.apply(state.travelled / length);
                    *coord = interpolate(state.origin, waypoint.coord, waypoint.controls, t);
                    break;
                }
                budget = (budget - remaining / speed).max(0.0);
            }

            // Arrived.
            *coord = waypoint.coord;
            events.push(Event::WaypointReached(path.id.clone(), waypoint.id.clone()));
            state.lap_travelled += length;
            state.travelled = 0.0;
            state.origin = waypoint.coord;
            state.segment += 1;

            if state.segment < path.waypoints.len() {
                continue;
            }

            if path.hold > 0 {
                state.holding = Some(path.hold);
                events.push(Event::PathHolding(path.id.clone()));
                break;
            }

            if !finish_lap(path, state, *coord, *curve_samples, events) {
                *active = None;
                *progress = Some(PathProgress::COMPLETE);
                return;
            }

            // A lap that consumed no movement would repeat forever.
            if budget >= lap_budget {
                break;
            }
            lap_budget = budget;
        }

        *progress = Some(state.progress());
    }

    /// The last computed position. Always defined.
    pub fn current_coordinate(&self) -> Vec2 {
        self.coord
    }

    /// Move the character without touching the active path.
    pub fn set_coordinate(&mut self, coord: Vec2) {
        self.coord = coord;
    }

    pub fn active_path(&self) -> Option<&PathId> {
        self.active.as_ref().map(|a| &a.id)
    }

    /// Whether no path is being travelled.
    pub fn movement_is_complete(&self) -> bool {
        self.active.is_none()
    }

    /// Progress of the active path, or of the path that completed during the
    /// most recent step.
    pub fn progress(&self) -> Option<PathProgress> {
        self.progress
    }

    /// Index of the waypoint currently being travelled toward.
    pub fn segment_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.segment)
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// End the current lap. Returns `false` when the path completed.
fn finish_lap(
    path: &Path,
    state: &mut ActivePath,
    coord: Vec2,
    samples: usize,
    events: &mut Vec<Event>,
) -> bool {
    if !path.looping {
        events.push(Event::PathComplete(path.id.clone()));
        return false;
    }
    state.segment = 0;
    state.origin = coord;
    state.travelled = 0.0;
    state.lap_travelled = 0.0;
    state.measure(path, samples);
    true
}
