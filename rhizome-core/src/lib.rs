//! Data model shared by the rhizome crates: positions and bounds, graph nodes,
//! the append-only [`World`] that owns them, and the [`System`]/[`Scheduler`]
//! pair that drives per-frame work.

pub mod appearance;
pub mod node;
pub mod position;
pub mod resources;
pub mod scheduler;
pub mod system;
pub mod world;

pub use appearance::{Appearance, Material, ShapeKind, DEFAULT_NODE_SIZE};
pub use node::{Connections, Node, NodeId, NoiseSeed};
pub use position::{Axis, Bounds, Position, Space};
pub use resources::{ControlSignal, FrameClock};
pub use scheduler::Scheduler;
pub use system::System;
pub use world::World;
