use crate::World;

/// A unit of per-frame work run by the [`Scheduler`](crate::Scheduler).
pub trait System: Send {
    /// Name used in timing logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn run(&mut self, world: &mut World);
}
