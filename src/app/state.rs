use anyhow::Result;
use cavern_core::{SimConfig, SimulationEngine, StepMetrics, StepReport};
use std::time::Instant;

use crate::ui::TextRenderer;

/// Operator commands, one per control on the original panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start ticking (EXECUTE).
    Play,
    /// Stop ticking (HALT).
    Halt,
    Toggle,
    /// Advance a single generation regardless of run state.
    Step,
    /// Re-seed; the run state is kept.
    Reset,
}

/// Front-end state around one engine: the part that owns timing.
pub struct App {
    pub engine: SimulationEngine,
    pub config: SimConfig,
    pub metrics: StepMetrics,
    pub renderer: TextRenderer,
    /// Pause once this generation is reached.
    pub max_generations: Option<u64>,
    /// Pause once a step leaves the grid unchanged.
    pub stop_when_stable: bool,
}

impl App {
    pub fn new(config: SimConfig) -> Result<Self> {
        let engine = SimulationEngine::from_config(&config)?;
        Ok(Self {
            engine,
            config,
            metrics: StepMetrics::new(),
            renderer: TextRenderer::default(),
            max_generations: None,
            stop_when_stable: false,
        })
    }

    pub fn apply(&mut self, control: Control) -> Result<Option<StepReport>> {
        match control {
            Control::Play => self.engine.set_running(true),
            Control::Halt => self.engine.set_running(false),
            Control::Toggle => {
                let running = self.engine.is_running();
                self.engine.set_running(!running);
            }
            Control::Step => return Ok(Some(self.timed_step())),
            Control::Reset => self.engine.reset()?,
        }
        Ok(None)
    }

    /// Scheduler callback: steps only while the engine is marked running.
    pub fn tick(&mut self) -> Option<StepReport> {
        if !self.engine.is_running() {
            return None;
        }
        let report = self.timed_step();

        let reached_limit = self
            .max_generations
            .is_some_and(|max| report.generation >= max);
        let stalled = self.stop_when_stable && !report.changed;
        if reached_limit || stalled {
            tracing::info!(
                generation = report.generation,
                occupied = report.occupied,
                stalled,
                "halting playback"
            );
            self.engine.set_running(false);
        }
        Some(report)
    }

    fn timed_step(&mut self) -> StepReport {
        let started = Instant::now();
        let report = self.engine.step();
        self.metrics
            .record_step(report.generation, started.elapsed(), report.occupied);
        report
    }

    /// Current grid plus telemetry, rendered as text.
    pub fn frame(&self) -> String {
        self.renderer
            .render(&self.engine.snapshot(), &self.engine.telemetry())
    }
}
