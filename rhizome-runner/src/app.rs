//! The frame loop: drain interactions, advance the rhizome, ship a snapshot.

use crate::control::ControlSource;
use crate::stats::FrameStats;
use crossbeam_channel::Receiver;
use log::{debug, error, info, warn};
use rhizome_config::{Config, MotionPreset, MotionSettings};
use rhizome_core::Bounds;
use rhizome_simulation::{GraphParams, MotionProfile, Simulation, SimulationSettings};
use rhizome_transport::{FrameSnapshot, InteractionEvent, Sender, Serializer, TransportError};
use spin_sleep::SpinSleeper;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Frames between timing reports.
const REPORT_EVERY: u64 = 600;

/// Interactions applied per frame. The rest wait for later frames.
const MAX_EVENTS_PER_FRAME: usize = 64;

pub fn motion_profile(settings: &MotionSettings) -> MotionProfile {
    let mut profile = match settings.preset {
        MotionPreset::Slider => MotionProfile::slider(),
        MotionPreset::Audio => MotionProfile::audio(),
    };
    if let Some(time_scale) = settings.time_scale {
        profile.time_scale = time_scale;
    }
    if let Some([lo, hi]) = settings.signal_domain {
        profile.signal_domain = (lo, hi);
    }
    if let Some([lo, hi]) = settings.displacement_range {
        profile.displacement_range = (lo, hi);
    }
    if let Some(scale) = settings.scale_time_by_signal {
        profile.scale_time_by_signal = scale;
    }
    profile
}

pub fn simulation_settings(config: &Config) -> SimulationSettings {
    let graph = &config.graph;
    let [degree_lo, degree_hi] = graph.degree_range;
    // Interaction degree is configured upper-exclusive.
    let [click_lo, click_hi] = graph.interaction_degree;
    SimulationSettings {
        bounds: config.world.bounds(),
        space: config.world.space,
        graph: GraphParams {
            initial_count: graph.initial_count,
            degree: degree_lo..=degree_hi,
            interaction_degree: click_lo..=click_hi.saturating_sub(1).max(click_lo),
            shape_variety: graph.shape_variety,
            node_size: graph.node_size,
        },
        motion: motion_profile(&config.motion),
        seed: config.seed,
    }
}

pub struct Runner {
    sim: Simulation,
    control: Box<dyn ControlSource>,
    serializer: Box<dyn Serializer>,
    sender: Box<dyn Sender>,
    events: Receiver<InteractionEvent>,
    output_every: u64,
    frame: u64,
    stats: FrameStats,
}

impl Runner {
    pub fn new(
        sim: Simulation,
        control: Box<dyn ControlSource>,
        serializer: Box<dyn Serializer>,
        sender: Box<dyn Sender>,
        events: Receiver<InteractionEvent>,
        output_every: u32,
        stats: FrameStats,
    ) -> Self {
        Self {
            sim,
            control,
            serializer,
            sender,
            events,
            output_every: u64::from(output_every.max(1)),
            frame: 0,
            stats,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Apply interactions queued since the last frame, at most
    /// `MAX_EVENTS_PER_FRAME` of them. Returns how many were applied.
    pub fn apply_interactions(&mut self) -> usize {
        let mut applied = 0;
        for event in self.events.try_iter().take(MAX_EVENTS_PER_FRAME) {
            match event {
                InteractionEvent::Add { x, y, z } => {
                    let position = self.sim.pointer_position(x, y, z);
                    let id = self.sim.on_interaction(position);
                    debug!("Added node {} at ({}, {}, {})", id, position.x, position.y, position.z);
                    applied += 1;
                }
                InteractionEvent::Resize { width, height, depth } => {
                    let world = self.sim.world();
                    let current = world.bounds();
                    let depth = depth.unwrap_or(current.max.z - current.min.z);
                    match Bounds::from_extents(world.space(), width, height, depth) {
                        Some(bounds) => {
                            self.sim.resize(bounds);
                            applied += 1;
                        }
                        None => warn!("Ignoring resize to {} x {} x {}", width, height, depth),
                    }
                }
            }
        }
        applied
    }

    /// Advance one frame. Simulation state moves forward even when the
    /// frame could not be delivered.
    pub fn step(&mut self) -> Result<(), TransportError> {
        self.apply_interactions();

        self.frame += 1;
        let signal = self.control.sample(self.frame);
        let elapsed = self.sim.tick(self.frame, signal);
        self.stats.record(elapsed);

        if self.frame % self.output_every == 0 {
            let snapshot = FrameSnapshot::capture(self.sim.world(), self.frame);
            let payload = self.serializer.serialize(&snapshot)?;
            self.sender.send(payload.as_bytes())?;
        }
        Ok(())
    }

    /// Run at `framerate` until `running` is cleared or `max_frames` is reached.
    pub fn run(&mut self, framerate: u32, running: &AtomicBool, max_frames: Option<u64>) {
        let frame_duration = Duration::from_secs_f64(1.0 / framerate.max(1) as f64);
        let sleeper = SpinSleeper::default();
        info!(
            "Running with {} nodes and {} edges at {} FPS",
            self.sim.node_count(),
            self.sim.edge_count(),
            framerate
        );

        while running.load(Ordering::SeqCst) {
            if max_frames.is_some_and(|max| self.frame >= max) {
                break;
            }
            let frame_start = Instant::now();

            if let Err(e) = self.step() {
                error!("Error sending frame {}: {}", self.frame, e);
            }
            if self.frame % REPORT_EVERY == 0 {
                self.stats.report();
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                sleeper.sleep(frame_duration - elapsed);
            } else if framerate > 10 {
                warn!("Frame time exceeded budget: {:?} > {:?}", elapsed, frame_duration);
            }
        }

        if let Err(e) = self.sender.flush() {
            error!("Failed to flush output: {}", e);
        }
        self.stats.report();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::FixedSignal;
    use rhizome_transport::{FileSender, JsonSerializer, NullSender};
    use std::fs;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.seed = Some(11);
        config.graph.initial_count = 12;
        config
    }

    fn runner_with(config: &Config, sender: Box<dyn Sender>) -> (Runner, crossbeam_channel::Sender<InteractionEvent>) {
        let mut sim = Simulation::new(simulation_settings(config));
        sim.populate().unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        let runner = Runner::new(
            sim,
            Box::new(FixedSignal(1.0)),
            Box::new(JsonSerializer),
            sender,
            rx,
            config.transport.output_every,
            FrameStats::new().unwrap(),
        );
        (runner, tx)
    }

    #[test]
    fn profile_overrides_apply_on_top_of_preset() {
        let settings = MotionSettings {
            preset: MotionPreset::Audio,
            displacement_range: Some([0.0, 4.0]),
            ..Default::default()
        };
        let profile = motion_profile(&settings);
        assert_eq!(profile.signal_domain, (0.0, 0.3));
        assert_eq!(profile.displacement_range, (0.0, 4.0));
        assert!(!profile.scale_time_by_signal);
    }

    #[test]
    fn interaction_degree_becomes_inclusive() {
        let settings = simulation_settings(&Config::default());
        assert_eq!(settings.graph.degree, 2..=6);
        assert_eq!(settings.graph.interaction_degree, 2..=5);
    }

    #[test]
    fn steps_advance_frames() {
        let (mut runner, _tx) = runner_with(&test_config(), Box::new(NullSender));
        runner.step().unwrap();
        runner.step().unwrap();
        assert_eq!(runner.frame(), 2);
        assert_eq!(runner.simulation().node_count(), 12);
    }

    #[test]
    fn queued_events_add_nodes_before_the_frame() {
        let (mut runner, tx) = runner_with(&test_config(), Box::new(NullSender));
        let edges_before = runner.simulation().edge_count();
        tx.send(InteractionEvent::Add { x: 0.0, y: 0.0, z: None }).unwrap();
        tx.send(InteractionEvent::Add { x: 5000.0, y: -5000.0, z: Some(0.0) }).unwrap();
        runner.step().unwrap();

        let sim = runner.simulation();
        assert_eq!(sim.node_count(), 14);
        assert!(sim.edge_count() > edges_before);
        let bounds = sim.world().bounds();
        assert!(sim.nodes().iter().all(|n| bounds.contains(&n.position)));
    }

    #[test]
    fn resize_pulls_nodes_into_new_bounds_before_the_tick() {
        let (mut runner, tx) = runner_with(&test_config(), Box::new(NullSender));
        tx.send(InteractionEvent::Resize { width: 40.0, height: 30.0, depth: None }).unwrap();
        runner.step().unwrap();

        let sim = runner.simulation();
        let bounds = sim.world().bounds();
        assert_eq!(bounds, Bounds::volumetric(40.0, 30.0, 600.0));
        assert!(sim.nodes().iter().all(|n| bounds.contains(&n.position)));

        tx.send(InteractionEvent::Resize { width: f32::NAN, height: 30.0, depth: None }).unwrap();
        runner.step().unwrap();
        assert_eq!(runner.simulation().world().bounds(), bounds);
    }

    #[test]
    fn event_flood_is_spread_across_frames() {
        let (mut runner, tx) = runner_with(&test_config(), Box::new(NullSender));
        for i in 0..(MAX_EVENTS_PER_FRAME + 6) {
            tx.send(InteractionEvent::Add { x: i as f32, y: 0.0, z: None }).unwrap();
        }
        runner.step().unwrap();
        assert_eq!(runner.simulation().node_count(), 12 + MAX_EVENTS_PER_FRAME);
        runner.step().unwrap();
        assert_eq!(runner.simulation().node_count(), 12 + MAX_EVENTS_PER_FRAME + 6);
    }

    #[test]
    fn run_writes_every_nth_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.jsonl");
        let mut config = test_config();
        config.transport.output_every = 2;
        let sender = FileSender::new(&path).unwrap();
        let (mut runner, _tx) = runner_with(&config, Box::new(sender));

        let running = AtomicBool::new(true);
        runner.run(1000, &running, Some(5));
        assert_eq!(runner.frame(), 5);

        let content = fs::read_to_string(&path).unwrap();
        let frames: Vec<u64> = content
            .lines()
            .map(|line| serde_json::from_str::<FrameSnapshot>(line).unwrap().frame)
            .collect();
        assert_eq!(frames, vec![2, 4]);
    }

    #[test]
    fn cleared_flag_stops_immediately() {
        let (mut runner, _tx) = runner_with(&test_config(), Box::new(NullSender));
        let running = AtomicBool::new(false);
        runner.run(60, &running, None);
        assert_eq!(runner.frame(), 0);
    }
}
