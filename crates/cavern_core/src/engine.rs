//! Steppable simulation engine.
//!
//! The engine owns one [`GridState`], one transition rule and a seeded
//! ChaCha8 random source. It is a single-writer state machine:
//!
//! - `Idle` (`running == false`) and `Playing` (`running == true`) toggle via
//!   [`SimulationEngine::set_running`].
//! - [`SimulationEngine::step`] and [`SimulationEngine::reset`] are legal in
//!   both states and never touch `running`. Resetting while playing keeps
//!   playing; callers that want a paused reset must pause first.
//!
//! `running` is only advice for an external scheduler. The engine never
//! starts a timer or a thread, and there is no terminal state.

use crate::error::Result;
use crate::grid::{GridState, SeedPolicy, DEFAULT_MAX_DIMENSION};
use crate::rule::{Rule, TransitionRule};
use crate::snapshot::{GridSnapshot, Telemetry};
use crate::SimConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Outcome of a single [`SimulationEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Generation reached by this step.
    pub generation: u64,
    pub occupied: usize,
    /// False once the grid has reached a fixed point under the rule.
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct SimulationEngine<R: TransitionRule = Rule> {
    grid: GridState,
    rule: R,
    policy: SeedPolicy,
    max_dimension: u16,
    rng: ChaCha8Rng,
    grid_seed: u64,
    generation: u64,
    running: bool,
}

impl SimulationEngine<Rule> {
    /// Builds an engine from validated configuration.
    pub fn from_config(config: &SimConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let engine = Self::new_bounded(
            config.grid.width,
            config.grid.height,
            config.grid.max_dimension,
            config.build_rule()?,
            config.seed_policy(),
        )?;
        tracing::info!(
            fingerprint = %config.fingerprint(),
            rule = %engine.rule,
            "engine configured"
        );
        Ok(engine)
    }
}

impl<R: TransitionRule> SimulationEngine<R> {
    /// Constructs and seeds a `width x height` grid. Starts idle at
    /// generation 0.
    pub fn new(width: u16, height: u16, rule: R, policy: SeedPolicy) -> Result<Self> {
        Self::new_bounded(width, height, DEFAULT_MAX_DIMENSION, rule, policy)
    }

    /// Like [`SimulationEngine::new`] with an explicit dimension cap.
    pub fn new_bounded(
        width: u16,
        height: u16,
        max_dimension: u16,
        rule: R,
        policy: SeedPolicy,
    ) -> Result<Self> {
        let mut rng = match policy.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let grid_seed = rng.gen();
        let grid = Self::seed_grid(width, height, max_dimension, &policy, grid_seed)?;
        tracing::debug!(width, height, grid_seed, "engine initialized");

        Ok(Self {
            grid,
            rule,
            policy,
            max_dimension,
            rng,
            grid_seed,
            generation: 0,
            running: false,
        })
    }

    /// Wraps a pre-built grid, e.g. a parsed pattern. `policy` is used by
    /// later resets.
    pub fn from_grid(grid: GridState, rule: R, policy: SeedPolicy) -> Self {
        let mut rng = match policy.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let grid_seed = rng.gen();
        Self {
            grid,
            rule,
            policy,
            max_dimension: DEFAULT_MAX_DIMENSION,
            rng,
            grid_seed,
            generation: 0,
            running: false,
        }
    }

    fn seed_grid(
        width: u16,
        height: u16,
        max_dimension: u16,
        policy: &SeedPolicy,
        grid_seed: u64,
    ) -> Result<GridState> {
        let mut grid_rng = ChaCha8Rng::seed_from_u64(grid_seed);
        GridState::initialize_bounded(width, height, max_dimension, policy, &mut grid_rng)
    }

    /// Re-seeds the grid from a fresh seed and zeroes the generation.
    ///
    /// Dimensions, rule and `running` are preserved. On error the current
    /// grid is left untouched.
    pub fn reset(&mut self) -> Result<()> {
        let grid_seed = self.rng.gen();
        let grid = Self::seed_grid(
            self.grid.width(),
            self.grid.height(),
            self.max_dimension,
            &self.policy,
            grid_seed,
        )?;
        self.grid = grid;
        self.grid_seed = grid_seed;
        self.generation = 0;
        tracing::debug!(grid_seed, running = self.running, "engine reset");
        Ok(())
    }

    /// Computes exactly one generation from the current one.
    pub fn step(&mut self) -> StepReport {
        let changed = self.grid.advance(&self.rule);
        self.generation += 1;
        let occupied = self.grid.occupied_count();
        tracing::trace!(generation = self.generation, occupied, changed, "step");
        StepReport {
            generation: self.generation,
            occupied,
            changed,
        }
    }

    /// Runs `n` steps and returns the last report, or `None` when `n == 0`.
    pub fn step_n(&mut self, n: u64) -> Option<StepReport> {
        (0..n).map(|_| self.step()).last()
    }

    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            tracing::debug!(running, generation = self.generation, "run state changed");
        }
        self.running = running;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.grid.occupied_count()
    }

    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    #[must_use]
    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            generation: self.generation,
            occupied: self.grid.occupied_count(),
            running: self.running,
            width: self.grid.width(),
            height: self.grid.height(),
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    #[must_use]
    pub fn rule(&self) -> &R {
        &self.rule
    }

    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Seed that produced the current grid; replaying it with the same
    /// policy and dimensions reproduces generation 0.
    #[must_use]
    pub fn grid_seed(&self) -> u64 {
        self.grid_seed
    }
}
