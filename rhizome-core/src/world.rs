use crate::node::{Node, NodeId};
use crate::position::{Bounds, Space};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// World owns the node ensemble, the bounding volume and per-frame resources.
///
/// The node list is append-only: there is no removal API, which keeps every
/// `NodeId` handed out valid for the lifetime of the world.
pub struct World {
    nodes: Vec<Node>,
    bounds: Bounds,
    space: Space,
    resources: HashMap<TypeId, Box<dyn Any + Send + Sync>>, // Global resources
}

impl World {
    pub fn new(bounds: Bounds, space: Space) -> Self {
        World {
            nodes: Vec::new(),
            bounds,
            space,
            resources: HashMap::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replace the bounding volume and pull every node back inside it.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        for node in &mut self.nodes {
            node.position = bounds.clamp(node.position);
        }
    }

    pub fn space(&self) -> Space {
        self.space
    }

    /// Append a node and return its identifier. The position is clamped into bounds.
    pub fn push_node(&mut self, mut node: Node) -> NodeId {
        node.position = self.bounds.clamp(node.position);
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable access for the motion pass. Structural fields stay private to this crate.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add the directed edge `from -> to`.
    ///
    /// Returns `false` and leaves the graph untouched for self-loops,
    /// duplicates, or ids outside the ensemble.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> bool {
        if from == to || to.0 >= self.nodes.len() {
            return false;
        }
        match self.nodes.get_mut(from.0) {
            Some(node) if !node.is_connected_to(to) => {
                node.push_connection(to);
                true
            }
            _ => false,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.connections().len()).sum()
    }

    /// Iterate every directed edge as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(i, node)| {
            node.connections().iter().map(move |&to| (NodeId(i), to))
        })
    }

    /// Add a resource to the world, replacing any previous value of the same type
    pub fn insert_resource<T: Any + Send + Sync>(&mut self, resource: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(resource));
    }

    pub fn get_resource<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|res| res.downcast_ref::<T>())
    }

    pub fn get_resource_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|res| res.downcast_mut::<T>())
    }

    pub fn remove_resource<T: Any + Send + Sync>(&mut self) -> Option<T> {
        self.resources
            .remove(&TypeId::of::<T>())
            .and_then(|res| res.downcast::<T>().ok())
            .map(|res| *res)
    }
}
