//! Core component trait
//!
//! Defines the interface every scene behavior implements so the
//! [`ComponentManager`](super::manager::ComponentManager) can drive it.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::scene::{EventOutcome, NodeId, Scene, SceneEvent};

/// Core trait for scene behaviors
///
/// A component is constructed with the handles it operates on (its own node,
/// plus any other nodes it touches) and holds all of its mutable state
/// itself. The manager calls the lifecycle methods below.
pub trait Component {
    /// Component name for logs, e.g. `water-surface`
    fn name(&self) -> &'static str;

    /// Node this component is attached to
    fn node(&self) -> NodeId;

    /// Attach to the scene
    ///
    /// Called once when the component is added. Capture initial state,
    /// build child nodes, apply initial visuals.
    fn bind(&mut self, scene: &mut Scene);

    /// Advance one frame
    ///
    /// # Arguments
    /// * `time_ms` - Elapsed time since the manager started, in milliseconds
    /// * `delta_ms` - Time since the previous frame, in milliseconds
    /// * `scene` - Scene to update
    fn tick(&mut self, _time_ms: f64, _delta_ms: f64, _scene: &mut Scene) {}

    /// React to an event targeted at this node or broadcast to everyone
    fn handle_event(&mut self, _event: &SceneEvent, _scene: &mut Scene) -> EventOutcome {
        EventOutcome::Ignored
    }

    /// Detach from the scene
    fn teardown(&mut self, _scene: &mut Scene) {
        // Default: nothing to undo
    }

    /// Downcasting hook so callers can reach typed parameters
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Lets two components share one instance, e.g. a toggle button and the
/// day/night cycle it drives.
impl<C: Component + 'static> Component for Rc<RefCell<C>> {
    fn name(&self) -> &'static str {
        self.borrow().name()
    }

    fn node(&self) -> NodeId {
        self.borrow().node()
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.borrow_mut().bind(scene);
    }

    fn tick(&mut self, time_ms: f64, delta_ms: f64, scene: &mut Scene) {
        self.borrow_mut().tick(time_ms, delta_ms, scene);
    }

    fn handle_event(&mut self, event: &SceneEvent, scene: &mut Scene) -> EventOutcome {
        self.borrow_mut().handle_event(event, scene)
    }

    fn teardown(&mut self, scene: &mut Scene) {
        self.borrow_mut().teardown(scene);
    }

    /// Exposes the `Rc` itself, not the inner component. Typed lookups
    /// through the manager therefore use `Rc<RefCell<C>>` as the type.
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
