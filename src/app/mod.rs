pub mod state;

pub use state::{App, Control};

use anyhow::Result;
use cavern_core::StepReport;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

impl App {
    /// Drives the engine at the configured interval while it is running.
    ///
    /// Returns once playback halts (generation limit, fixed point) or on
    /// Ctrl+C. `on_frame` runs after every step.
    pub async fn run<F>(&mut self, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&App, &StepReport) -> Result<()>,
    {
        let period = Duration::from_millis(self.config.scheduler.tick_interval_ms);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        tracing::info!(
            interval_ms = self.config.scheduler.tick_interval_ms,
            "playback started"
        );
        while self.engine.is_running() {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Ctrl+C received, halting playback");
                    self.engine.set_running(false);
                }
                _ = interval.tick() => {
                    if let Some(report) = self.tick() {
                        on_frame(self, &report)?;
                    }
                }
            }
        }
        tracing::info!(
            generation = self.engine.current_generation(),
            steps = self.metrics.steps(),
            "playback stopped"
        );
        Ok(())
    }
}
