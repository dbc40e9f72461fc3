use crate::appearance::Appearance;
use crate::position::{Axis, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Stable index of a node. Nodes are never removed, so ids never dangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-axis offsets into the noise field. Assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSeed {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl NoiseSeed {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..1000.0),
            y: rng.gen_range(0.0..2000.0),
            z: rng.gen_range(0.0..3000.0),
        }
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Outgoing edges. Most nodes have at most six.
pub type Connections = SmallVec<[NodeId; 8]>;

/// A vertex of the graph.
///
/// `position` is the only field the motion pass writes. Connections and the
/// noise seed are structural and can only change through [`crate::World`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Position,
    connections: Connections,
    noise_seed: NoiseSeed,
    pub appearance: Appearance,
}

impl Node {
    pub fn new(position: Position, noise_seed: NoiseSeed, appearance: Appearance) -> Self {
        Self {
            position,
            connections: Connections::new(),
            noise_seed,
            appearance,
        }
    }

    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }

    pub fn noise_seed(&self) -> NoiseSeed {
        self.noise_seed
    }

    pub fn is_connected_to(&self, target: NodeId) -> bool {
        self.connections.contains(&target)
    }

    pub(crate) fn push_connection(&mut self, target: NodeId) {
        self.connections.push(target);
    }
}
