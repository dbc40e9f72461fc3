//! Per-frame values that systems read from the [`World`](crate::World).

/// Index of the frame being simulated. Monotonically increasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    pub frame: u64,
}

/// Scalar supplied by the host each frame: a slider value or an audio level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlSignal(pub f32);
