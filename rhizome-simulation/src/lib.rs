//! Graph construction and noise-driven motion for a rhizome of nodes.

pub mod graph;
pub mod motion;
pub mod noise;
pub mod simulation;
pub mod systems;

pub use graph::{EdgeSampler, GraphBuilder, GraphError, GraphParams, RandomSampler};
pub use motion::{displacement, remap, MotionIntegrator, MotionProfile};
pub use noise::{ConstantNoise, NoiseField, PerlinNoise};
pub use simulation::{Simulation, SimulationSettings};
pub use systems::MotionSystem;
