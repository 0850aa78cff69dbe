use std::collections::VecDeque;

use log::trace;

use super::events::SceneEvent;
use super::object::SceneNode;

/// Stable handle to a node in a [`Scene`]
///
/// Handles are never reused, so a handle to a removed node simply resolves to
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Main scene containing nodes and the pending event queue
///
/// This is the data the host mirrors into its renderer. Behaviors receive
/// `NodeId` handles at construction and read or write nodes through here.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Option<SceneNode>>,
    events: VecDeque<(Option<NodeId>, SceneEvent)>,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level node
    pub fn add_node(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    /// Adds a node under `parent`; a missing parent makes it top-level
    pub fn add_child(&mut self, parent: NodeId, node: SceneNode) -> NodeId {
        let id = self.add_node(node);
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(id);
            if let Some(child) = self.nodes[id.0].as_mut() {
                child.parent = Some(parent);
            }
        }
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Direct children of a node, empty for missing nodes
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map(|n| n.children.clone()).unwrap_or_default()
    }

    /// Removes a node and its whole subtree
    pub fn remove_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return;
        };

        if let Some(parent) = node.parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|c| *c != id);
        }

        let mut stack = node.children;
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.nodes.get_mut(child.0).and_then(Option::take) {
                stack.extend(removed.children);
            }
        }
    }

    /// Removes every descendant of a node, keeping the node itself
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id) {
            self.remove_node(child);
        }
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Number of live nodes below `id`
    pub fn descendant_count(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack = self.children(id);
        while let Some(child) = stack.pop() {
            count += 1;
            stack.extend(self.children(child));
        }
        count
    }

    /// First live node with the given name
    ///
    /// A convenience for hosts and tests; behaviors get their handles injected.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, n)| n.as_ref().is_some_and(|n| n.name == name))
            .map(|(i, _)| NodeId(i))
    }

    /// Queue an event for the behaviors attached to `target`
    pub fn emit(&mut self, target: NodeId, event: SceneEvent) {
        trace!("queued {:?} for node {}", event, target.0);
        self.events.push_back((Some(target), event));
    }

    /// Queue an event for every behavior
    pub fn broadcast(&mut self, event: SceneEvent) {
        trace!("queued broadcast {:?}", event);
        self.events.push_back((None, event));
    }

    pub(crate) fn pop_event(&mut self) -> Option<(Option<NodeId>, SceneEvent)> {
        self.events.pop_front()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
