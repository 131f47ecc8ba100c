//! Per-call instrumentation counters.

use std::fmt;
use std::time::{Duration, Instant};

/// Counters scoped to a single algorithm invocation.
///
/// `start()` resets every counter and starts the clock; `stop()` freezes the
/// elapsed time. Each call owns its instance: nested calls create their own.
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    started_at: Option<Instant>,
    elapsed: Duration,
    dfs_visits: u64,
    relaxations: u64,
    operations: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset counters and start timing.
    pub fn start(&mut self) {
        *self = Self {
            started_at: Some(Instant::now()),
            ..Self::default()
        };
    }

    /// Freeze the elapsed time. A second call is a no-op.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.elapsed = started_at.elapsed();
        }
    }

    #[inline]
    pub fn increment_dfs_visits(&mut self) {
        self.dfs_visits += 1;
    }

    #[inline]
    pub fn increment_relaxations(&mut self) {
        self.relaxations += 1;
    }

    #[inline]
    pub fn increment_operations(&mut self) {
        self.operations += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }

    pub fn dfs_visits(&self) -> u64 {
        self.dfs_visits
    }

    pub fn relaxations(&self) -> u64 {
        self.relaxations
    }

    pub fn operations(&self) -> u64 {
        self.operations
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {:.3} ms, DFS Visits: {}, Relaxations: {}, Operations: {}",
            self.elapsed_ms(),
            self.dfs_visits,
            self.relaxations,
            self.operations
        )
    }
}
