// systems/dispatch.rs
//
// Event dispatch: runs the reactions bound to a character's events and steps
// the character once per tick.
//
// Dispatch is recursive. An action that activates a path or scene raises new
// events, which are dispatched before the action returns. The nesting depth is
// threaded through every call and capped by `max_event_depth`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::api::error::{EngineError, Result};
use crate::api::types::{PathId, SceneId};
use crate::components::character::Character;
use crate::components::events::{Action, Callback, Event};

impl Character {
    /// Run every reaction bound to `event`, in registration order.
    pub fn raise(&mut self, event: Event) -> Result<()> {
        let depth = self.dispatch_depth;
        self.dispatch(event, depth)
    }

    /// Activate a registered path and dispatch the resulting events.
    ///
    /// The character moves to the path's layer if it declares one.
    pub fn activate_path(&mut self, id: &PathId) -> Result<()> {
        let depth = self.dispatch_depth;
        self.start_path(id, depth)
    }

    /// Activate a registered scene and dispatch the resulting events.
    pub fn activate_scene(&mut self, id: &SceneId) -> Result<()> {
        let depth = self.dispatch_depth;
        self.start_scene(id, depth)
    }

    /// Advance one tick: motion first, then animation with the fresh path
    /// progress, dispatching events after each.
    ///
    /// The first tick closes event registration. On error the rest of the tick
    /// is abandoned and undelivered events are dropped.
    pub fn tick(&mut self) -> Result<()> {
        self.events.seal();
        let depth = self.dispatch_depth;

        let result = self.step_all(depth);
        if result.is_err() {
            self.motion.drain_events();
            self.animation.drain_events();
            if depth == 0 {
                self.nested_cycle = None;
            }
        }
        result
    }

    fn step_all(&mut self, depth: usize) -> Result<()> {
        // Events queued by direct component calls since the last tick.
        self.flush(depth)?;

        self.motion.step();
        self.flush(depth)?;

        let progress = self.motion.progress();
        self.animation.step(progress);
        self.flush(depth)
    }

    fn start_path(&mut self, id: &PathId, depth: usize) -> Result<()> {
        self.motion.activate_path(id)?;
        if let Some(layer) = self.motion.query_path(id).and_then(|p| p.layer) {
            self.layer = layer;
        }
        self.flush(depth)
    }

    fn start_scene(&mut self, id: &SceneId, depth: usize) -> Result<()> {
        self.animation.activate_scene(id)?;
        self.flush(depth)
    }

    /// Dispatch everything motion and animation have queued.
    fn flush(&mut self, depth: usize) -> Result<()> {
        loop {
            let mut pending = self.motion.drain_events();
            pending.extend(self.animation.drain_events());
            if pending.is_empty() {
                return Ok(());
            }
            for event in pending {
                self.dispatch(event, depth)?;
            }
        }
    }

    fn dispatch(&mut self, event: Event, depth: usize) -> Result<()> {
        if depth >= self.max_event_depth {
            if self.dispatch_depth > 0 && self.nested_cycle.is_none() {
                self.nested_cycle = Some((event.clone(), depth));
            }
            return Err(EngineError::EventCycle { event, depth });
        }
        log::trace!("character {:?}: {:?} (depth {})", self.id, event, depth);

        let actions = self.events.actions(&event).to_vec();
        for action in &actions {
            self.execute(action, &event, depth + 1)?;
        }
        Ok(())
    }

    fn execute(&mut self, action: &Action, event: &Event, depth: usize) -> Result<()> {
        match action {
            Action::ActivatePath(id) => return self.start_path(id, depth),
            Action::ActivateScene(id) => return self.start_scene(id, depth),
            Action::DeactivatePath => self.motion.deactivate(),
            Action::DeactivateScene => self.animation.deactivate(),
            Action::SetVisibility(visible) => self.visible = *visible,
            Action::SetLayer(layer) => self.layer = *layer,
            Action::SetCoordinate(coord) => self.motion.set_coordinate(*coord),
            Action::ResetAppearance => {
                let symbol = self.input_symbol().to_string();
                self.animation.set_appearance(symbol, None);
            }
            Action::Callback(callback) => return self.run_callback(callback, event, depth),
        }
        Ok(())
    }

    /// Invoke an external callback.
    ///
    /// The callback's own errors and panics are logged, never propagated. A
    /// dispatch cycle reached through the callback still fails the chain.
    fn run_callback(&mut self, callback: &Callback, event: &Event, depth: usize) -> Result<()> {
        let outer = std::mem::replace(&mut self.dispatch_depth, depth);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback.call(self, event)));
        self.dispatch_depth = outer;

        if let Some((cycle_event, cycle_depth)) = self.nested_cycle.clone() {
            // Only the outermost callback clears it, so every level unwinds.
            if outer == 0 {
                self.nested_cycle = None;
            }
            return Err(EngineError::EventCycle {
                event: cycle_event,
                depth: cycle_depth,
            });
        }

        let error = match outcome {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(err)) => EngineError::Callback(err.to_string()),
            Err(payload) => EngineError::Callback(panic_message(payload.as_ref())),
        };
        log::warn!("character {:?}: {} (handling {:?})", self.id, error, event);
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {}", msg)
    } else {
        "panicked".to_string()
    }
}
