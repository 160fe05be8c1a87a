//! Pacing adapters.

use std::{thread, time::Duration};

use stackforge_core::application::ports::Pacer;
use tracing::trace;

/// Default pause between generation calls.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Blocks the calling thread for a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPacer {
    interval: Duration,
}

impl FixedPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// A pacer that never sleeps.
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedPacer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Pacer for FixedPacer {
    fn pause(&self) {
        if self.interval.is_zero() {
            return;
        }
        trace!(interval_ms = self.interval.as_millis() as u64, "Pacing");
        thread::sleep(self.interval);
    }
}
