//! Configuration management for simulation parameters.
//!
//! Strongly-typed structures mapping to `cavern.toml`. Every section and
//! field is optional in the file; missing values fall back to the defaults
//! below, which reproduce the original cave generator (100x100 grid, 45%
//! initial fill, birth at 5, survival at 4, a tick every 100 ms).
//!
//! ## Example `cavern.toml`
//!
//! ```toml
//! [grid]
//! width = 120
//! height = 80
//! seed = 42
//! fill_probability = 0.45
//!
//! [rule]
//! kind = "cellular"
//! birth_threshold = 5
//! death_threshold = 4
//! border = "closed"   # optional; "open" counts off-grid cells as empty
//!
//! [scheduler]
//! tick_interval_ms = 100
//! ```

use crate::grid::{Border, SeedPolicy, DEFAULT_FILL_PROBABILITY, DEFAULT_MAX_DIMENSION};
use crate::rule::{Rule, DEFAULT_BIRTH_THRESHOLD, DEFAULT_DEATH_THRESHOLD, MAX_NEIGHBORS};
use serde::{Deserialize, Serialize};

/// Grid dimensions and seeding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub width: u16,
    pub height: u16,
    pub max_dimension: u16,
    pub seed: Option<u64>,
    pub fill_probability: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            max_dimension: DEFAULT_MAX_DIMENSION,
            seed: None,
            fill_probability: DEFAULT_FILL_PROBABILITY,
        }
    }
}

/// Rule selection. `kind` is `cellular`, `life`, `erosion`, or a
/// `B../S..` rulestring; thresholds only affect `cellular`. `border`
/// overrides the rule's own border policy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RuleConfig {
    pub kind: String,
    pub birth_threshold: u8,
    pub death_threshold: u8,
    pub border: Option<Border>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            kind: "cellular".to_string(),
            birth_threshold: DEFAULT_BIRTH_THRESHOLD,
            death_threshold: DEFAULT_DEATH_THRESHOLD,
            border: None,
        }
    }
}

/// Settings for the external tick driver and renderer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    pub tick_interval_ms: u64,
    /// Pixel size of one cell on a raster surface.
    pub cell_size: u16,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            cell_size: 8,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    pub grid: GridConfig,
    pub rule: RuleConfig,
    pub scheduler: SchedulerConfig,
}

impl SimConfig {
    /// Validates all configuration parameters.
    ///
    /// # Validation Rules
    /// - Grid sides must be in `1..=max_dimension`
    /// - Fill probability must be in [0.0, 1.0]
    /// - Thresholds must be in `0..=9` (9 disables the transition)
    /// - The rule selector must resolve to an implemented rule
    /// - Tick interval must be in `1..=10000` ms
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.grid.width > 0, "Grid width must be positive");
        anyhow::ensure!(self.grid.height > 0, "Grid height must be positive");
        anyhow::ensure!(
            self.grid.width <= self.grid.max_dimension,
            "Grid width too large (max {})",
            self.grid.max_dimension
        );
        anyhow::ensure!(
            self.grid.height <= self.grid.max_dimension,
            "Grid height too large (max {})",
            self.grid.max_dimension
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.grid.fill_probability),
            "Fill probability must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.rule.birth_threshold <= MAX_NEIGHBORS + 1,
            "Birth threshold must be in [0, 9]"
        );
        anyhow::ensure!(
            self.rule.death_threshold <= MAX_NEIGHBORS + 1,
            "Death threshold must be in [0, 9]"
        );
        self.build_rule()?;

        anyhow::ensure!(
            self.scheduler.tick_interval_ms > 0,
            "Tick interval must be positive"
        );
        anyhow::ensure!(
            self.scheduler.tick_interval_ms <= 10_000,
            "Tick interval too long (max 10000 ms)"
        );
        anyhow::ensure!(self.scheduler.cell_size > 0, "Cell size must be positive");

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, or returns defaults when the file does not exist.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file missing, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn build_rule(&self) -> crate::Result<Rule> {
        let rule = Rule::resolve(
            &self.rule.kind,
            self.rule.birth_threshold,
            self.rule.death_threshold,
        )?;
        Ok(match self.rule.border {
            Some(border) => rule.with_border(border),
            None => rule,
        })
    }

    #[must_use]
    pub fn seed_policy(&self) -> SeedPolicy {
        SeedPolicy {
            fill_probability: self.grid.fill_probability,
            seed: self.grid.seed,
        }
    }

    /// Stable hash of everything that shapes the generated map.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.grid).as_bytes());
        hasher.update(format!("{:?}", self.rule).as_bytes());
        hex::encode(hasher.finalize())
    }
}
