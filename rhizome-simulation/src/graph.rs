//! Builds the node ensemble and wires it into a sparse random graph.

use log::debug;
use rand::Rng;
use rhizome_core::{Appearance, NodeId, NoiseSeed, Node, Position, World, DEFAULT_NODE_SIZE};
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("an ensemble needs at least one node")]
    EmptyEnsemble,

    #[error("world already holds {existing} nodes")]
    AlreadyPopulated { existing: usize },
}

/// Source of the random draws made while wiring edges.
pub trait EdgeSampler {
    /// How many connection attempts to make, drawn from `range`.
    fn degree(&mut self, range: RangeInclusive<usize>) -> usize;

    /// A candidate target index in `0..len`. `len` is never zero.
    fn target(&mut self, len: usize) -> usize;
}

/// Uniform draws from any [`Rng`].
pub struct RandomSampler<'a, R: ?Sized>(pub &'a mut R);

impl<R: Rng + ?Sized> EdgeSampler for RandomSampler<'_, R> {
    fn degree(&mut self, range: RangeInclusive<usize>) -> usize {
        self.0.gen_range(range)
    }

    fn target(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphParams {
    pub initial_count: usize,
    /// Attempts per node during the startup wiring.
    pub degree: RangeInclusive<usize>,
    /// Attempts for a node added by interaction.
    pub interaction_degree: RangeInclusive<usize>,
    /// Number of shape kinds new nodes draw from.
    pub shape_variety: usize,
    /// Display size shared by every node.
    pub node_size: f32,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            initial_count: 40,
            degree: 2..=6,
            interaction_degree: 2..=5,
            shape_variety: 4,
            node_size: DEFAULT_NODE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    params: GraphParams,
}

impl GraphBuilder {
    pub fn new(params: GraphParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GraphParams {
        &self.params
    }

    /// Fill an empty world with `count` unconnected nodes at random positions.
    pub fn initialize<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        count: usize,
        rng: &mut R,
    ) -> Result<(), GraphError> {
        if count == 0 {
            return Err(GraphError::EmptyEnsemble);
        }
        if !world.is_empty() {
            return Err(GraphError::AlreadyPopulated { existing: world.len() });
        }

        let bounds = world.bounds();
        for _ in 0..count {
            let position = bounds.sample(rng);
            self.spawn(world, position, rng);
        }
        debug!("initialized {} nodes", count);
        Ok(())
    }

    /// Append one unconnected node with a fresh noise seed and appearance.
    pub fn spawn<R: Rng + ?Sized>(&self, world: &mut World, position: Position, rng: &mut R) -> NodeId {
        let seed = NoiseSeed::sample(rng);
        let appearance = Appearance::sample(rng, self.params.shape_variety, self.params.node_size);
        world.push_node(Node::new(position, seed, appearance))
    }

    /// Give every node a handful of one-way edges.
    ///
    /// Each node makes `k` attempts; an attempt that lands on itself or on an
    /// existing target is dropped rather than retried, so the realised degree
    /// may fall short of `k`. Returns the number of edges added.
    pub fn connect_randomly<S: EdgeSampler + ?Sized>(&self, world: &mut World, sampler: &mut S) -> usize {
        let len = world.len();
        if len < 2 {
            return 0;
        }

        let mut added = 0;
        for i in 0..len {
            let attempts = sampler.degree(self.params.degree.clone());
            for _ in 0..attempts {
                let target = NodeId(sampler.target(len));
                if world.connect(NodeId(i), target) {
                    added += 1;
                }
            }
        }
        debug!("wired {} edges across {} nodes", added, len);
        added
    }

    /// Wire an already appended node both ways to random targets.
    ///
    /// For every accepted target `t` the edges `id -> t` and `t -> id` are
    /// each added if missing. Returns the number of edges added.
    pub fn connect_mutually<S: EdgeSampler + ?Sized>(
        &self,
        world: &mut World,
        id: NodeId,
        sampler: &mut S,
    ) -> usize {
        let len = world.len();
        if len < 2 {
            return 0;
        }

        let mut added = 0;
        let attempts = sampler.degree(self.params.interaction_degree.clone());
        for _ in 0..attempts {
            let target = NodeId(sampler.target(len));
            if target == id {
                continue;
            }
            added += usize::from(world.connect(id, target));
            added += usize::from(world.connect(target, id));
        }
        added
    }

    /// Append a node at `position` and connect it mutually into the graph.
    pub fn add_node<R: Rng + ?Sized>(&self, world: &mut World, position: Position, rng: &mut R) -> NodeId {
        let id = self.spawn(world, position, rng);
        let added = self.connect_mutually(world, id, &mut RandomSampler(rng));
        debug!("added node {} with {} edges", id, added);
        id
    }
}
