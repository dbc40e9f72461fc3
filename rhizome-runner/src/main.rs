mod app;
mod control;
mod error;
mod input;
mod stats;

use crate::app::{simulation_settings, Runner};
use crate::error::RunnerError;
use crate::stats::FrameStats;
use clap::Parser;
use crossbeam_channel::Sender as EventSender;
use log::{error, info};
use rhizome_config::{load_config, Config, Overrides, SenderConfig, SerializerType};
use rhizome_simulation::Simulation;
use rhizome_transport::{
    BinarySerializer, FileSender, InteractionEvent, JsonSerializer, NullSender, Sender,
    Serializer, StdioSender,
};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "websocket")]
use rhizome_transport::WebSocketSender;

#[derive(Parser, Debug)]
#[command(author, version, about = "Noise-driven rhizome of connected nodes", long_about = None)]
struct Args {
    /// Path to the configuration file (.json or .toml)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Stop after this many frames instead of running until Ctrl+C
    #[arg(long)]
    frames: Option<u64>,

    #[command(flatten)]
    overrides: Overrides,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), RunnerError> {
    let mut config = load_config(&args.config)?;
    config.apply(&args.overrides);
    config.validate()?;
    info!("Using configuration from {}", args.config.display());

    let (events_tx, events_rx) = crossbeam_channel::unbounded();
    let serializer = create_serializer(&config);
    let sender = create_sender(&config, events_tx.clone())?;
    if config.interaction.stdin {
        input::spawn_stdin_reader(events_tx)?;
        info!("Reading `add` and `resize` commands from standard input");
    }

    let mut sim = Simulation::new(simulation_settings(&config));
    info!("Simulation seed: {}", sim.seed());
    sim.populate()?;

    let profile = app::motion_profile(&config.motion);
    let control = control::from_settings(&config.control, &profile, sim.seed());

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::SeqCst);
    })?;

    let mut runner = Runner::new(
        sim,
        control,
        serializer,
        sender,
        events_rx,
        config.transport.output_every,
        FrameStats::new()?,
    );
    runner.run(config.framerate, &running, args.frames);

    let sim = runner.simulation();
    info!(
        "Finished at frame {} with {} nodes and {} edges",
        runner.frame(),
        sim.node_count(),
        sim.edge_count()
    );
    Ok(())
}

fn create_serializer(config: &Config) -> Box<dyn Serializer> {
    match config.transport.serializer {
        SerializerType::Json => Box::new(JsonSerializer),
        SerializerType::Binary => Box::new(BinarySerializer),
    }
}

#[allow(unused_variables)]
fn create_sender(
    config: &Config,
    events: EventSender<InteractionEvent>,
) -> Result<Box<dyn Sender>, RunnerError> {
    match &config.transport.sender {
        SenderConfig::Stdio => Ok(Box::new(StdioSender::new())),
        SenderConfig::File { path } => Ok(Box::new(FileSender::new(path)?)),
        SenderConfig::Null => Ok(Box::new(NullSender)),
        SenderConfig::WebSocket { host, port } => {
            #[cfg(feature = "websocket")]
            {
                let sender = WebSocketSender::start(host, *port, events)?;
                info!("Open the front end and point it at ws://{}", sender.local_addr());
                Ok(Box::new(sender))
            }

            #[cfg(not(feature = "websocket"))]
            {
                Err(RunnerError::FeatureDisabled("WebSocket sender"))
            }
        }
    }
}
