//! Stand-ins for the UI slider and microphone that feed the control signal.

use rhizome_config::ControlSettings;
use rhizome_simulation::{MotionProfile, NoiseField, PerlinNoise};

/// Produces the control signal for each frame.
pub trait ControlSource: Send {
    fn sample(&mut self, frame: u64) -> f32;
}

/// A slider nobody touches.
pub struct FixedSignal(pub f32);

impl ControlSource for FixedSignal {
    fn sample(&mut self, _frame: u64) -> f32 {
        self.0
    }
}

/// A slider dragged from one end of its range to the other and back.
pub struct Sweep {
    domain: (f32, f32),
    period_frames: u32,
}

impl Sweep {
    pub fn new(domain: (f32, f32), period_frames: u32) -> Self {
        Self {
            domain,
            period_frames: period_frames.max(1),
        }
    }
}

impl ControlSource for Sweep {
    fn sample(&mut self, frame: u64) -> f32 {
        let period = self.period_frames as u64;
        let phase = (frame % period) as f32 / period as f32;
        let triangle = 1.0 - (2.0 * phase - 1.0).abs();
        self.domain.0 + (self.domain.1 - self.domain.0) * triangle
    }
}

/// A smoothly wandering input level in `[0, ceiling]`.
pub struct SyntheticLevel {
    noise: PerlinNoise,
    ceiling: f32,
    rate: f64,
}

impl SyntheticLevel {
    pub fn new(seed: u64, ceiling: f32, rate: f64) -> Self {
        Self {
            noise: PerlinNoise::new(seed),
            ceiling,
            rate,
        }
    }
}

impl ControlSource for SyntheticLevel {
    fn sample(&mut self, frame: u64) -> f32 {
        self.noise.sample(frame as f64 * self.rate) as f32 * self.ceiling
    }
}

pub fn from_settings(
    settings: &ControlSettings,
    profile: &MotionProfile,
    seed: u64,
) -> Box<dyn ControlSource> {
    match *settings {
        ControlSettings::Fixed { value } => Box::new(FixedSignal(value)),
        ControlSettings::Sweep { period_frames } => {
            Box::new(Sweep::new(profile.signal_domain, period_frames))
        }
        ControlSettings::Audio { ceiling, rate } => {
            Box::new(SyntheticLevel::new(seed ^ 0xA0D1_0000, ceiling, rate))
        }
    }
}
