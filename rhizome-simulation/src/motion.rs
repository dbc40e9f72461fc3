//! Noise-driven motion: every node drifts along a smooth random path, with
//! the step size set by the host's control signal.

use crate::noise::NoiseField;
use rayon::prelude::*;
use rhizome_core::World;

/// Linear remap of `value` from `from` to `to`, clamped at the edges of `from`.
/// A non-finite `value` maps to the low end of `to`.
pub fn remap(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    let (lo, hi) = from;
    let t = if hi > lo && value.is_finite() {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    to.0 + (to.1 - to.0) * t
}

/// Constants tying the control signal to motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Range the control signal is expected to move in.
    pub signal_domain: (f32, f32),
    /// Displacement magnitude at the low and high end of the domain.
    pub displacement_range: (f32, f32),
    /// Noise-space distance travelled per frame.
    pub time_scale: f64,
    /// Speed up noise time with the signal as well as widening the step.
    pub scale_time_by_signal: bool,
}

impl MotionProfile {
    /// Movement-speed slider: signal in [0.1, 5], steps of up to [1, 20].
    pub fn slider() -> Self {
        Self {
            signal_domain: (0.1, 5.0),
            displacement_range: (1.0, 20.0),
            time_scale: 0.005,
            scale_time_by_signal: true,
        }
    }

    /// Microphone level: signal in [0, 0.3], steps of up to [1, 10].
    pub fn audio() -> Self {
        Self {
            signal_domain: (0.0, 0.3),
            displacement_range: (1.0, 10.0),
            time_scale: 0.005,
            scale_time_by_signal: false,
        }
    }

    /// Clamp into the signal domain. NaN and infinities fall to the low end.
    pub fn clamp_signal(&self, signal: f32) -> f32 {
        if signal.is_finite() {
            signal.clamp(self.signal_domain.0, self.signal_domain.1)
        } else {
            self.signal_domain.0
        }
    }

    /// Half-width of the displacement interval for this signal.
    pub fn range_for(&self, signal: f32) -> f32 {
        remap(signal, self.signal_domain, self.displacement_range)
    }

    /// Offset added to each noise seed on `frame`.
    pub fn noise_time(&self, frame: u64, signal: f32) -> f64 {
        let t = frame as f64 * self.time_scale;
        if self.scale_time_by_signal {
            t * self.clamp_signal(signal) as f64
        } else {
            t
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::slider()
    }
}

/// Map a noise sample in `[0, 1]` onto `[-range, range]`.
#[inline]
pub fn displacement(sample: f64, range: f32) -> f32 {
    sample as f32 * 2.0 * range - range
}

pub struct MotionIntegrator<N> {
    noise: N,
    profile: MotionProfile,
}

impl<N: NoiseField> MotionIntegrator<N> {
    pub fn new(noise: N, profile: MotionProfile) -> Self {
        Self { noise, profile }
    }

    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Advance every node by one frame and clamp it into the world bounds.
    ///
    /// Only positions change. The result depends solely on each node's
    /// starting position and seed, `frame` and `signal`, so nodes are
    /// processed in parallel.
    pub fn step(&self, world: &mut World, frame: u64, signal: f32) {
        let range = self.profile.range_for(signal);
        let t = self.profile.noise_time(frame, signal);
        let bounds = world.bounds();
        let axes = world.space().axes();

        world.nodes_mut().par_iter_mut().for_each(|node| {
            let seed = node.noise_seed();
            let mut p = node.position;
            for &axis in axes {
                let sample = self.noise.sample(seed.axis(axis) + t);
                *p.axis_mut(axis) += displacement(sample, range);
            }
            node.position = bounds.clamp(p);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, RandomSampler};
    use crate::noise::{ConstantNoise, PerlinNoise};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rhizome_core::{Appearance, Bounds, Node, NodeId, NoiseSeed, Position, Space};

    fn world_with_node(space: Space, bounds: Bounds, at: Position) -> World {
        let mut world = World::new(bounds, space);
        let seed = NoiseSeed { x: 10.0, y: 20.0, z: 30.0 };
        world.push_node(Node::new(at, seed, Appearance::default()));
        world
    }

    #[test]
    fn remap_is_linear_and_clamped() {
        assert_eq!(remap(0.1, (0.1, 5.0), (1.0, 20.0)), 1.0);
        assert_eq!(remap(5.0, (0.1, 5.0), (1.0, 20.0)), 20.0);
        assert_eq!(remap(0.15, (0.0, 0.3), (1.0, 10.0)), 5.5);
        assert_eq!(remap(9.0, (0.0, 0.3), (1.0, 10.0)), 10.0);
        assert_eq!(remap(-1.0, (0.0, 0.3), (1.0, 10.0)), 1.0);
        assert_eq!(remap(f32::NAN, (0.1, 5.0), (1.0, 20.0)), 1.0);
        assert_eq!(remap(f32::INFINITY, (0.1, 5.0), (1.0, 20.0)), 1.0);
    }

    #[test]
    fn non_finite_signal_moves_like_the_domain_minimum() {
        let profile = MotionProfile::slider();
        assert_eq!(profile.clamp_signal(f32::NAN), 0.1);
        assert_eq!(profile.clamp_signal(f32::NEG_INFINITY), 0.1);

        let bounds = Bounds::volumetric(800.0, 600.0, 600.0);
        let start = Position::new(10.0, 10.0, 10.0);
        let mut nan_world = world_with_node(Space::Volumetric, bounds, start);
        let mut min_world = world_with_node(Space::Volumetric, bounds, start);
        let integrator = MotionIntegrator::new(PerlinNoise::new(1), profile);
        integrator.step(&mut nan_world, 1, f32::NAN);
        integrator.step(&mut min_world, 1, 0.1);

        let p = nan_world.nodes()[0].position;
        assert_eq!(p, min_world.nodes()[0].position);
        assert!((p.x - start.x).abs() <= 1.0);
        assert!((p.y - start.y).abs() <= 1.0);
        assert!((p.z - start.z).abs() <= 1.0);
    }

    #[test]
    fn midpoint_sample_does_not_move() {
        let profile = MotionProfile::slider();
        assert_eq!(profile.range_for(profile.signal_domain.0), 1.0);

        let start = Position::new(12.5, -7.0, 3.0);
        let mut world = world_with_node(Space::Volumetric, Bounds::volumetric(100.0, 100.0, 100.0), start);
        let integrator = MotionIntegrator::new(ConstantNoise(0.5), profile);
        integrator.step(&mut world, 17, profile.signal_domain.0);
        assert_eq!(world.nodes()[0].position, start);
    }

    #[test]
    fn extreme_samples_move_by_full_range() {
        let bounds = Bounds::volumetric(100.0, 100.0, 100.0);
        let mut world = world_with_node(Space::Volumetric, bounds, Position::default());
        MotionIntegrator::new(ConstantNoise(1.0), MotionProfile::slider()).step(&mut world, 1, 5.0);
        assert_eq!(world.nodes()[0].position, Position::new(20.0, 20.0, 20.0));

        MotionIntegrator::new(ConstantNoise(0.0), MotionProfile::audio()).step(&mut world, 2, 0.0);
        assert_eq!(world.nodes()[0].position, Position::new(19.0, 19.0, 19.0));
    }

    #[test]
    fn corner_node_stays_on_corner() {
        let bounds = Bounds::volumetric(100.0, 60.0, 40.0);
        let mut world = world_with_node(Space::Volumetric, bounds, bounds.max);
        let integrator = MotionIntegrator::new(ConstantNoise(1.0), MotionProfile::slider());
        for frame in 0..5 {
            integrator.step(&mut world, frame, 3.0);
            assert_eq!(world.nodes()[0].position, bounds.max);
        }
    }

    #[test]
    fn planar_space_leaves_z_alone() {
        let bounds = Bounds::planar(100.0, 100.0);
        let mut world = world_with_node(Space::Planar, bounds, Position::planar(1.0, 1.0));
        MotionIntegrator::new(ConstantNoise(0.75), MotionProfile::slider()).step(&mut world, 1, 0.1);
        assert_eq!(world.nodes()[0].position, Position::planar(1.5, 1.5));
    }

    #[test]
    fn step_is_deterministic_and_structure_preserving() {
        let make_world = || {
            let mut rng = StdRng::seed_from_u64(21);
            let mut world = World::new(Bounds::volumetric(800.0, 600.0, 600.0), Space::Volumetric);
            let builder = GraphBuilder::default();
            builder.initialize(&mut world, 40, &mut rng).unwrap();
            builder.connect_randomly(&mut world, &mut RandomSampler(&mut rng));
            world
        };
        let mut a = make_world();
        let mut b = make_world();
        let edges_before: Vec<_> = a.edges().collect();

        let integrator = MotionIntegrator::new(PerlinNoise::new(99), MotionProfile::slider());
        for frame in 1..=120 {
            integrator.step(&mut a, frame, 2.0);
            integrator.step(&mut b, frame, 2.0);
        }

        assert_eq!(a.len(), 40);
        assert_eq!(a.edges().collect::<Vec<_>>(), edges_before);
        for (na, nb) in a.nodes().iter().zip(b.nodes()) {
            assert_eq!(na.position, nb.position);
            assert!(a.bounds().contains(&na.position));
        }
        assert!(a.node(NodeId(0)).is_some());
    }

    #[test]
    fn motion_is_continuous() {
        let bounds = Bounds::volumetric(10_000.0, 10_000.0, 10_000.0);
        let mut world = world_with_node(Space::Volumetric, bounds, Position::default());
        let profile = MotionProfile::slider();
        let integrator = MotionIntegrator::new(PerlinNoise::new(1), profile);
        let limit = profile.displacement_range.1;

        let mut prev = world.nodes()[0].position;
        for frame in 0..500 {
            integrator.step(&mut world, frame, 5.0);
            let p = world.nodes()[0].position;
            assert!((p.x - prev.x).abs() <= limit);
            assert!((p.y - prev.y).abs() <= limit);
            assert!((p.z - prev.z).abs() <= limit);
            prev = p;
        }
    }
}
