//! Step metrics and structured logging setup.

use std::time::{Duration, Instant};

/// How often [`StepMetrics::record_step`] emits an info-level event.
pub const LOG_EVERY_GENERATIONS: u64 = 1000;

/// Running statistics over recorded steps.
///
/// Owned by whoever drives the engine; the engine itself does not time
/// anything.
#[derive(Debug)]
pub struct StepMetrics {
    steps: u64,
    last_occupied: usize,
    total_step_time: Duration,
    start_time: Instant,
}

impl Default for StepMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl StepMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: 0,
            last_occupied: 0,
            total_step_time: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    /// Records a completed step with its duration.
    pub fn record_step(&mut self, generation: u64, duration: Duration, occupied: usize) {
        self.steps += 1;
        self.last_occupied = occupied;
        self.total_step_time += duration;

        if generation > 0 && generation % LOG_EVERY_GENERATIONS == 0 {
            tracing::info!(
                generation,
                occupied,
                mean_step_us = self.mean_step_time().as_micros() as u64,
                "Simulation generation"
            );
        }
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn last_occupied(&self) -> usize {
        self.last_occupied
    }

    #[must_use]
    pub fn mean_step_time(&self) -> Duration {
        if self.steps == 0 {
            Duration::ZERO
        } else {
            self.total_step_time / self.steps as u32
        }
    }

    /// Time since the metrics were created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Later calls are no-ops.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = StepMetrics::new();
        assert_eq!(metrics.steps(), 0);
        assert_eq!(metrics.mean_step_time(), Duration::ZERO);
    }

    #[test]
    fn test_record_step() {
        let mut metrics = StepMetrics::new();
        metrics.record_step(1, Duration::from_millis(2), 40);
        metrics.record_step(2, Duration::from_millis(4), 38);
        assert_eq!(metrics.steps(), 2);
        assert_eq!(metrics.last_occupied(), 38);
        assert_eq!(metrics.mean_step_time(), Duration::from_millis(3));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }
}
