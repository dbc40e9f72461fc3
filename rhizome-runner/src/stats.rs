use crate::error::RunnerError;
use hdrhistogram::Histogram;
use log::info;
use std::time::Duration;

/// Frame time distribution in microseconds, up to one minute per frame.
pub struct FrameStats {
    histogram: Histogram<u64>,
}

impl FrameStats {
    pub fn new() -> Result<Self, RunnerError> {
        let histogram = Histogram::new_with_bounds(1, 60_000_000, 3).map_err(RunnerError::Stats)?;
        Ok(Self { histogram })
    }

    pub fn record(&mut self, elapsed: Duration) {
        let micros = elapsed.as_micros().clamp(1, 60_000_000) as u64;
        self.histogram.saturating_record(micros);
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }

    pub fn report(&self) {
        if self.is_empty() {
            return;
        }
        let h = &self.histogram;
        info!(
            "Frame timing over {} frames: mean {:.0}us, p50 {}us, p99 {}us, max {}us",
            h.len(),
            h.mean(),
            h.value_at_quantile(0.5),
            h.value_at_quantile(0.99),
            h.max()
        );
    }
}
