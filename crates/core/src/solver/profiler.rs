//! Stage timing for the solver tick.
//!
//! Provides an RAII profiling scope that reports through `tracing`.

use std::time::Instant;
use tracing::trace;

/// A profiling scope that measures elapsed time using RAII.
///
/// The elapsed time is emitted as a `trace` event when the scope is dropped.
pub struct ProfilerScope {
    start: Instant,
    name: &'static str,
}

impl ProfilerScope {
    /// Creates a new profiling scope.
    pub fn new(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Name of the measured stage.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        trace!(stage = self.name, elapsed_ms = self.elapsed_ms(), "stage finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiler_scope_measures() {
        let scope = ProfilerScope::new("projection");
        assert_eq!(scope.name(), "projection");
        assert!(scope.elapsed_ms() >= 0.0);
    }
}
