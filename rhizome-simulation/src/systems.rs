use crate::motion::MotionIntegrator;
use crate::noise::NoiseField;
use log::warn;
use rhizome_core::{ControlSignal, FrameClock, System, World};

/// Runs the [`MotionIntegrator`] against the frame and signal stored in the world.
pub struct MotionSystem<N> {
    integrator: MotionIntegrator<N>,
}

impl<N: NoiseField> MotionSystem<N> {
    pub fn new(integrator: MotionIntegrator<N>) -> Self {
        Self { integrator }
    }
}

impl<N: NoiseField> System for MotionSystem<N> {
    fn name(&self) -> &'static str {
        "motion"
    }

    fn run(&mut self, world: &mut World) {
        let Some(clock) = world.get_resource::<FrameClock>().copied() else {
            warn!("FrameClock resource missing, skipping motion");
            return;
        };
        let signal = world
            .get_resource::<ControlSignal>()
            .map_or(self.integrator.profile().signal_domain.0, |s| s.0);

        self.integrator.step(world, clock.frame, signal);
    }
}
