//! The [`Simulation`] aggregate: one per session, owning the world and
//! everything needed to grow and animate it.

use crate::graph::{GraphBuilder, GraphError, GraphParams, RandomSampler};
use crate::motion::{MotionIntegrator, MotionProfile};
use crate::noise::{NoiseField, PerlinNoise};
use crate::systems::MotionSystem;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rhizome_core::{
    Axis, Bounds, ControlSignal, FrameClock, Node, NodeId, Position, Scheduler, Space, World,
};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub bounds: Bounds,
    pub space: Space,
    pub graph: GraphParams,
    pub motion: MotionProfile,
    /// Random seed; drawn from the OS when unset.
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            bounds: Bounds::volumetric(800.0, 600.0, 600.0),
            space: Space::Volumetric,
            graph: GraphParams::default(),
            motion: MotionProfile::slider(),
            seed: None,
        }
    }
}

pub struct Simulation {
    world: World,
    builder: GraphBuilder,
    scheduler: Scheduler,
    rng: StdRng,
    seed: u64,
}

impl Simulation {
    /// Create an empty simulation driven by seeded [`PerlinNoise`].
    pub fn new(settings: SimulationSettings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = PerlinNoise::new(rng.gen());
        Self::build(settings, seed, rng, noise)
    }

    /// Create an empty simulation with a caller-supplied noise field.
    pub fn with_noise<N: NoiseField + 'static>(settings: SimulationSettings, noise: N) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let rng = StdRng::seed_from_u64(seed);
        Self::build(settings, seed, rng, noise)
    }

    fn build<N: NoiseField + 'static>(
        settings: SimulationSettings,
        seed: u64,
        rng: StdRng,
        noise: N,
    ) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(MotionSystem::new(MotionIntegrator::new(noise, settings.motion)));

        info!(
            "simulation ready: {:?} space, seed {}",
            settings.space, seed
        );
        Self {
            world: World::new(settings.bounds, settings.space),
            builder: GraphBuilder::new(settings.graph),
            scheduler,
            rng,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create `count` unconnected nodes. Fails for zero or on a populated world.
    pub fn initialize(&mut self, count: usize) -> Result<(), GraphError> {
        self.builder.initialize(&mut self.world, count, &mut self.rng)
    }

    /// Wire one-way random edges from every node. Returns the number added.
    pub fn connect_randomly(&mut self) -> usize {
        self.builder
            .connect_randomly(&mut self.world, &mut RandomSampler(&mut self.rng))
    }

    /// Startup sequence: the configured number of nodes, then random wiring.
    pub fn populate(&mut self) -> Result<(), GraphError> {
        let count = self.builder.params().initial_count;
        self.initialize(count)?;
        let edges = self.connect_randomly();
        info!("populated {} nodes with {} edges", count, edges);
        Ok(())
    }

    /// Resolve a pointer location. A missing depth in a 3D scene is drawn
    /// uniformly from the bounds; planar scenes always use zero.
    pub fn pointer_position(&mut self, x: f32, y: f32, z: Option<f32>) -> Position {
        let z = match self.world.space() {
            Space::Planar => 0.0,
            Space::Volumetric => {
                z.unwrap_or_else(|| self.world.bounds().sample_axis(Axis::Z, &mut self.rng))
            }
        };
        Position::new(x, y, z)
    }

    /// Add a node where the user clicked and connect it both ways.
    pub fn on_interaction(&mut self, position: Position) -> NodeId {
        let position = self.world.bounds().clamp(position);
        let id = self.builder.add_node(&mut self.world, position, &mut self.rng);
        debug!("interaction spawned node {} at {:?}", id, position);
        id
    }

    /// Advance one frame. Returns the time spent in systems.
    pub fn tick(&mut self, frame: u64, signal: f32) -> Duration {
        self.world.insert_resource(FrameClock { frame });
        self.world.insert_resource(ControlSignal(signal));
        self.scheduler.execute_once(&mut self.world)
    }

    /// Replace the bounding volume, e.g. after a window resize.
    pub fn resize(&mut self, bounds: Bounds) {
        debug!("bounds changed to {:?}", bounds);
        self.world.set_bounds(bounds);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn nodes(&self) -> &[Node] {
        self.world.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.world.len()
    }

    pub fn edge_count(&self) -> usize {
        self.world.edge_count()
    }
}
