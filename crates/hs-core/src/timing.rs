//! Wall-clock timing for driver phases.

use std::time::Instant;

/// A simple timer that measures elapsed wall-clock time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed time in seconds without stopping.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer, log the phase at info level and return elapsed seconds.
    pub fn stop_and_log(self) -> f64 {
        let elapsed = self.elapsed_s();
        tracing::info!(phase = self.label, elapsed_s = elapsed, "=== {} {:.3} s", self.label, elapsed);
        elapsed
    }
}
