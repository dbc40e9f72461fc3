use rhizome_core::{Material, ShapeKind, World};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw one node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeState {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Colour-cycled hue in degrees for this frame.
    pub hue: f32,
    pub shape: ShapeKind,
    pub material: Material,
    pub size: f32,
    pub rotation_phase: f32,
}

/// Read-only copy of the world after a frame's motion pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub nodes: Vec<NodeState>,
    /// Directed edges as `(from, to)` node ids.
    pub edges: Vec<(u32, u32)>,
}

impl FrameSnapshot {
    pub fn capture(world: &World, frame: u64) -> Self {
        let nodes = world
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| NodeState {
                id: i as u32,
                x: node.position.x,
                y: node.position.y,
                z: node.position.z,
                hue: node.appearance.hue_at(frame),
                shape: node.appearance.shape,
                material: node.appearance.material,
                size: node.appearance.size,
                rotation_phase: node.appearance.rotation_phase,
            })
            .collect();

        let edges = world
            .edges()
            .map(|(from, to)| (from.0 as u32, to.0 as u32))
            .collect();

        FrameSnapshot { frame, nodes, edges }
    }
}
