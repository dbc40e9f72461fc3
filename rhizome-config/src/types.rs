use rhizome_core::{Bounds, Space, DEFAULT_NODE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// --- Enums for Choices ---

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SerializerType {
    #[default]
    Json,
    Binary,
}

/// Which set of motion constants to start from.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MotionPreset {
    /// Movement-speed slider in [0.1, 5], displacement range [1, 20].
    #[default]
    Slider,
    /// Microphone level in [0, 0.3], displacement range [1, 10].
    Audio,
}

// --- Configuration Sections ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorldSettings {
    #[serde(default)]
    pub space: Space,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_depth")]
    pub depth: f32,
}

fn default_depth() -> f32 { 600.0 }

impl WorldSettings {
    pub fn bounds(&self) -> Bounds {
        match self.space {
            Space::Planar => Bounds::planar(self.width, self.height),
            Space::Volumetric => Bounds::volumetric(self.width, self.height, self.depth),
        }
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            space: Space::default(),
            width: 800.0,
            height: 600.0,
            depth: default_depth(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GraphSettings {
    #[serde(default = "default_initial_count")]
    pub initial_count: usize,
    /// Out-degree draw for the startup wiring, both ends inclusive.
    #[serde(default = "default_degree_range")]
    pub degree_range: [usize; 2],
    /// Out-degree draw for interactively added nodes, upper end exclusive.
    #[serde(default = "default_interaction_degree")]
    pub interaction_degree: [usize; 2],
    /// How many of the shape kinds new nodes draw from.
    #[serde(default = "default_shape_variety")]
    pub shape_variety: usize,
    /// Display size of every node, in [3, 40].
    #[serde(default = "default_node_size")]
    pub node_size: f32,
}

fn default_initial_count() -> usize { 40 }
fn default_degree_range() -> [usize; 2] { [2, 6] }
fn default_interaction_degree() -> [usize; 2] { [2, 6] }
fn default_shape_variety() -> usize { 4 }
fn default_node_size() -> f32 { DEFAULT_NODE_SIZE }

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            initial_count: default_initial_count(),
            degree_range: default_degree_range(),
            interaction_degree: default_interaction_degree(),
            shape_variety: default_shape_variety(),
            node_size: default_node_size(),
        }
    }
}

/// Motion constants. Unset fields fall back to the preset.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MotionSettings {
    #[serde(default)]
    pub preset: MotionPreset,
    pub time_scale: Option<f64>,
    pub signal_domain: Option<[f32; 2]>,
    pub displacement_range: Option<[f32; 2]>,
    pub scale_time_by_signal: Option<bool>,
}

/// Where the per-frame control signal comes from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ControlSettings {
    /// A slider left at one value.
    Fixed { value: f32 },
    /// A slider swept back and forth across the signal domain.
    Sweep {
        #[serde(default = "default_sweep_period")]
        period_frames: u32,
    },
    /// A synthetic, smoothly varying input level.
    Audio {
        #[serde(default = "default_level_ceiling")]
        ceiling: f32,
        #[serde(default = "default_level_rate")]
        rate: f64,
    },
}

fn default_sweep_period() -> u32 { 600 }
fn default_level_ceiling() -> f32 { 0.3 }
fn default_level_rate() -> f64 { 0.02 }

impl Default for ControlSettings {
    fn default() -> Self {
        ControlSettings::Fixed { value: 1.0 }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SenderConfig {
    Stdio,
    File { path: PathBuf },
    #[default]
    Null,
    WebSocket {
        #[serde(default = "default_ws_host")]
        host: String,
        #[serde(default = "default_ws_port")]
        port: u16,
    },
}

fn default_ws_host() -> String { "127.0.0.1".to_string() }
fn default_ws_port() -> u16 { 8080 }

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TransportConfig {
    #[serde(default)]
    pub serializer: SerializerType,
    #[serde(default)]
    pub sender: SenderConfig,
    /// Send every Nth frame.
    #[serde(default = "default_output_every")]
    pub output_every: u32,
}

fn default_output_every() -> u32 { 1 }

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            serializer: SerializerType::default(),
            sender: SenderConfig::default(),
            output_every: default_output_every(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct InteractionSettings {
    /// Read `add <x> <y> [z]` commands from standard input.
    #[serde(default)]
    pub stdin: bool,
}

// --- Top-Level Config Struct ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_framerate")]
    pub framerate: u32,
    /// Fixes every random draw of the run when set.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub world: WorldSettings,
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub motion: MotionSettings,
    #[serde(default)]
    pub control: ControlSettings,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub interaction: InteractionSettings,
}

fn default_framerate() -> u32 { 60 }

impl Default for Config {
    fn default() -> Self {
        Self {
            framerate: default_framerate(),
            seed: None,
            world: WorldSettings::default(),
            graph: GraphSettings::default(),
            motion: MotionSettings::default(),
            control: ControlSettings::default(),
            transport: TransportConfig::default(),
            interaction: InteractionSettings::default(),
        }
    }
}
