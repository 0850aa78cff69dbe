//! Component manager
//!
//! Manages the lifecycle of attached components and drives them from the
//! host's frame loop.

use log::{debug, trace};

use super::traits::Component;
use crate::scene::{EventOutcome, NodeId, Scene, SceneEvent};

/// Handle to an attached component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentHandle(usize);

/// Owns components and forwards frames and events to them
pub struct ComponentManager {
    components: Vec<Option<Box<dyn Component>>>,
    is_paused: bool,
    time_scale: f64,
    elapsed_ms: f64,
}

impl ComponentManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            is_paused: false,
            time_scale: 1.0,
            elapsed_ms: 0.0,
        }
    }

    /// Attach a component and bind it to the scene
    ///
    /// # Arguments
    /// * `component` - Component to attach
    /// * `scene` - Scene the component binds to
    pub fn attach<C: Component + 'static>(&mut self, component: C, scene: &mut Scene) -> ComponentHandle {
        let mut component: Box<dyn Component> = Box::new(component);
        debug!("binding {} to node {}", component.name(), component.node().index());
        component.bind(scene);

        let handle = ComponentHandle(self.components.len());
        self.components.push(Some(component));
        handle
    }

    /// Tear down and remove a component
    pub fn detach(&mut self, handle: ComponentHandle, scene: &mut Scene) {
        if let Some(mut component) = self.components.get_mut(handle.0).and_then(Option::take) {
            debug!("tearing down {}", component.name());
            component.teardown(scene);
        }
    }

    /// Tear down every component in reverse attach order
    pub fn detach_all(&mut self, scene: &mut Scene) {
        for slot in self.components.iter_mut().rev() {
            if let Some(mut component) = slot.take() {
                component.teardown(scene);
            }
        }
        self.components.clear();
    }

    /// Typed access to an attached component, e.g. to change its parameters
    ///
    /// A component attached as a shared `Rc<RefCell<C>>` is looked up as
    /// `get_mut::<Rc<RefCell<C>>>`; asking for `C` directly yields `None`.
    pub fn get_mut<C: Component + 'static>(&mut self, handle: ComponentHandle) -> Option<&mut C> {
        self.components
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .and_then(|c| c.as_any_mut().downcast_mut::<C>())
    }

    /// Advance all components by one frame, then deliver queued events
    ///
    /// # Arguments
    /// * `delta_ms` - Time since the previous frame in milliseconds
    /// * `scene` - Scene the components update
    pub fn tick(&mut self, delta_ms: f64, scene: &mut Scene) {
        if !self.is_paused {
            let scaled_delta = delta_ms * self.time_scale;
            self.elapsed_ms += scaled_delta;

            for component in self.components.iter_mut().flatten() {
                component.tick(self.elapsed_ms, scaled_delta, scene);
            }
        }

        self.dispatch_events(scene);
    }

    /// Deliver one event right away
    ///
    /// `target == None` reaches every component; otherwise only the
    /// components attached to that node.
    pub fn send_event(&mut self, target: Option<NodeId>, event: &SceneEvent, scene: &mut Scene) -> EventOutcome {
        let mut outcome = EventOutcome::Ignored;
        for component in self.components.iter_mut().flatten() {
            if target.is_none_or(|node| node == component.node()) {
                trace!("{} <- {:?}", component.name(), event);
                outcome = outcome.merge(component.handle_event(event, scene));
            }
        }
        outcome
    }

    /// Drain the scene's event queue, including events raised while draining
    pub fn dispatch_events(&mut self, scene: &mut Scene) {
        while let Some((target, event)) = scene.pop_event() {
            self.send_event(target, &event, scene);
        }
    }

    /// Milliseconds of scaled time since the manager started
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Check if the manager is paused
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Set pause state; events still flow while paused
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    /// Get current time scale
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set time scale
    ///
    /// # Arguments
    /// * `scale` - Time scale multiplier (1.0 = normal speed)
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0); // Prevent negative time
    }

    /// Number of attached components
    pub fn len(&self) -> usize {
        self.components.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ComponentManager {
    fn default() -> Self {
        Self::new()
    }
}
