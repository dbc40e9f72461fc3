use crate::system::System;
use crate::World;
use log::trace;
use std::time::{Duration, Instant};

/// Runs registered systems in insertion order, once per frame.
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system to the scheduler
    pub fn add_system<T: System + 'static>(&mut self, system: T) -> &mut Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Execute all systems once and return the total time spent.
    pub fn execute_once(&mut self, world: &mut World) -> Duration {
        let start = Instant::now();

        for system in &mut self.systems {
            let system_start = Instant::now();
            system.run(world);
            trace!(
                "system {} took {:?}",
                system.name(),
                system_start.elapsed()
            );
        }

        start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Bounds, Space};
    use crate::resources::FrameClock;

    struct Advance;

    impl System for Advance {
        fn run(&mut self, world: &mut World) {
            if let Some(clock) = world.get_resource_mut::<FrameClock>() {
                clock.frame += 1;
            }
        }
    }

    struct Double;

    impl System for Double {
        fn name(&self) -> &'static str {
            "double"
        }

        fn run(&mut self, world: &mut World) {
            if let Some(clock) = world.get_resource_mut::<FrameClock>() {
                clock.frame *= 2;
            }
        }
    }

    #[test]
    fn systems_run_in_insertion_order() {
        let mut world = World::new(Bounds::planar(10.0, 10.0), Space::Planar);
        world.insert_resource(FrameClock { frame: 1 });

        let mut scheduler = Scheduler::new();
        scheduler.add_system(Advance).add_system(Double);
        assert_eq!(scheduler.len(), 2);

        scheduler.execute_once(&mut world);
        assert_eq!(world.get_resource::<FrameClock>().unwrap().frame, 4);
    }
}
