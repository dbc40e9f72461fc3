use rhizome_config::ConfigError;
use rhizome_simulation::GraphError;
use rhizome_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph setup failed: {0}")]
    Graph(#[from] GraphError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to create frame histogram: {0:?}")]
    Stats(hdrhistogram::CreationError),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} was configured but the binary was built without it")]
    FeatureDisabled(&'static str),
}
