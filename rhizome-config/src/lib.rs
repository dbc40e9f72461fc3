use log::debug;
use std::fs;
use std::path::Path;
use thiserror::Error;

// Re-export types
pub use self::types::{
    Config, ControlSettings, GraphSettings, InteractionSettings, MotionPreset, MotionSettings,
    SenderConfig, SerializerType, TransportConfig, WorldSettings,
};
mod types;

// Config error handling
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Values that can be set on the command line on top of the file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Number of nodes created at startup
    #[arg(long)]
    pub nodes: Option<usize>,

    /// Seed for every random draw of the run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(long)]
    pub framerate: Option<u32>,

    /// Hold the control signal at this value instead of the configured source
    #[arg(long)]
    pub signal: Option<f32>,
}

/// Load and validate a configuration file. `.toml` files are read as TOML,
/// `.json` files (or files without an extension) as JSON.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        Some("json") | None => serde_json::from_str(&content)?,
        Some(other) => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };
    debug!("Parsed configuration from {}", path.display());

    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(nodes) = overrides.nodes {
            self.graph.initial_count = nodes;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(framerate) = overrides.framerate {
            self.framerate = framerate;
        }
        if let Some(value) = overrides.signal {
            self.control = ControlSettings::Fixed { value };
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.framerate == 0 {
            return Err(invalid("Frame rate must be greater than 0"));
        }

        let world = &self.world;
        if ![world.width, world.height, world.depth].into_iter().all(positive) {
            return Err(invalid("World dimensions must be positive and finite"));
        }

        let graph = &self.graph;
        if graph.initial_count == 0 {
            return Err(invalid("Initial node count must be greater than 0"));
        }
        let [lo, hi] = graph.degree_range;
        if lo > hi {
            return Err(invalid(format!("Degree range [{lo}, {hi}] is empty")));
        }
        let [lo, hi] = graph.interaction_degree;
        if lo >= hi {
            return Err(invalid(format!("Interaction degree range [{lo}, {hi}) is empty")));
        }
        if graph.shape_variety == 0 {
            return Err(invalid("Shape variety must be at least 1"));
        }
        if !(3.0..=40.0).contains(&graph.node_size) {
            return Err(invalid(format!("Node size {} is outside [3, 40]", graph.node_size)));
        }

        let motion = &self.motion;
        if let Some([lo, hi]) = motion.signal_domain {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(invalid(format!("Signal domain [{lo}, {hi}] is empty")));
            }
        }
        if let Some([lo, hi]) = motion.displacement_range {
            if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || lo > hi {
                return Err(invalid(format!("Displacement range [{lo}, {hi}] is invalid")));
            }
        }
        if motion.time_scale.is_some_and(|t| !t.is_finite() || t < 0.0) {
            return Err(invalid("Time scale must be finite and not negative"));
        }

        match self.control {
            ControlSettings::Fixed { value } if !value.is_finite() => {
                return Err(invalid(format!("Control value {value} is not finite")));
            }
            ControlSettings::Sweep { period_frames: 0 } => {
                return Err(invalid("Sweep period must be greater than 0"));
            }
            ControlSettings::Audio { ceiling, rate }
                if !ceiling.is_finite() || ceiling < 0.0 || !rate.is_finite() =>
            {
                return Err(invalid("Audio ceiling and rate must be finite, ceiling not negative"));
            }
            _ => {}
        }

        if self.transport.output_every == 0 {
            return Err(invalid("Output frequency must be greater than 0"));
        }

        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_core::{Bounds, Space};
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn load_valid_json_config() {
        let content = r#"{
          "framerate": 30,
          "seed": 42,
          "world": { "space": "planar", "width": 400.0, "height": 300.0 },
          "graph": { "initial_count": 12 },
          "motion": { "preset": "audio" },
          "control": { "source": "audio", "ceiling": 0.25 },
          "transport": {
            "serializer": "binary",
            "sender": { "type": "websocket", "port": 9001 }
          }
        }"#;
        let file = write_temp(".json", content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.framerate, 30);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.world.space, Space::Planar);
        assert_eq!(config.world.bounds(), Bounds::planar(400.0, 300.0));
        assert_eq!(config.graph.initial_count, 12);
        assert_eq!(config.graph.degree_range, [2, 6]);
        assert_eq!(config.motion.preset, MotionPreset::Audio);
        assert_eq!(config.control, ControlSettings::Audio { ceiling: 0.25, rate: 0.02 });
        assert_eq!(config.transport.serializer, SerializerType::Binary);
        assert_eq!(
            config.transport.sender,
            SenderConfig::WebSocket { host: "127.0.0.1".to_string(), port: 9001 }
        );
    }

    #[test]
    fn load_valid_toml_config() {
        let content = r#"
framerate = 24

[world]
width = 1024.0
height = 768.0

[control]
source = "sweep"
period_frames = 120

[transport.sender]
type = "file"
path = "frames.jsonl"
"#;
        let file = write_temp(".toml", content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.framerate, 24);
        assert_eq!(config.world.space, Space::Volumetric);
        assert_eq!(config.world.depth, 600.0);
        assert_eq!(config.control, ControlSettings::Sweep { period_frames: 120 });
        assert!(matches!(config.transport.sender, SenderConfig::File { .. }));
    }

    #[test]
    fn empty_object_uses_defaults() {
        let file = write_temp(".json", "{}");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.graph.initial_count, 40);
    }

    #[test]
    fn load_invalid_framerate() {
        let file = write_temp(".json", r#"{ "framerate": 0 }"#);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn non_finite_world_size_rejected() {
        let file = write_temp(".toml", "[world]\nwidth = nan\nheight = 600.0\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::ValidationError(_))));

        let file = write_temp(".toml", "[world]\nwidth = 800.0\nheight = inf\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn non_finite_motion_and_control_rejected() {
        let mut config = Config::default();
        config.motion.signal_domain = Some([0.0, f32::INFINITY]);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.motion.displacement_range = Some([f32::NAN, 10.0]);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.motion.time_scale = Some(f64::NAN);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.apply(&Overrides { signal: Some(f32::NAN), ..Overrides::default() });
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = Config::default();
        config.control = ControlSettings::Audio { ceiling: 0.3, rate: f64::INFINITY };
        assert!(config.validate().is_err());
    }

    #[test]
    fn node_size_must_be_in_slider_range() {
        let mut config = Config::default();
        assert_eq!(config.graph.node_size, 8.0);
        config.graph.node_size = 50.0;
        assert!(config.validate().is_err());
        config.graph.node_size = f32::NAN;
        assert!(config.validate().is_err());
        config.graph.node_size = 3.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_nodes_rejected() {
        let mut config = Config::default();
        config.graph.initial_count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn empty_interaction_degree_rejected() {
        let mut config = Config::default();
        config.graph.interaction_degree = [3, 3];
        assert!(config.validate().is_err());
        config.graph.interaction_degree = [3, 4];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_extension_rejected() {
        let file = write_temp(".yaml", "framerate: 60");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        config.apply(&Overrides {
            nodes: Some(5),
            seed: Some(9),
            framerate: None,
            signal: Some(2.5),
        });
        assert_eq!(config.graph.initial_count, 5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.framerate, 60);
        assert_eq!(config.control, ControlSettings::Fixed { value: 2.5 });
    }
}
