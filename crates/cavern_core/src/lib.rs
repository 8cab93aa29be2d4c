//! # Cavern Core
//!
//! Deterministic, steppable occupancy-grid simulation.
//!
//! This crate contains:
//! - [`GridState`]: a double-buffered grid of two-valued cells with
//!   closed-border Moore-neighborhood queries
//! - [`TransitionRule`] and the built-in [`Rule`] (cave automaton, Conway's
//!   Life, arbitrary `B/S` rulestrings)
//! - [`SimulationEngine`]: generation counter, run flag and reset/step
//!   lifecycle over one grid and one rule
//! - Configuration, errors and structured logging
//!
//! The engine is single-threaded and performs no I/O. Timing is left to an
//! external scheduler that calls [`SimulationEngine::step`] while
//! [`SimulationEngine::is_running`] is true.
//!
//! ## Example
//!
//! ```
//! use cavern_core::{Rule, SeedPolicy, SimulationEngine};
//!
//! let mut engine = SimulationEngine::new(64, 48, Rule::cave(), SeedPolicy::seeded(42))?;
//! for _ in 0..5 {
//!     engine.step();
//! }
//! assert_eq!(engine.current_generation(), 5);
//! let map = engine.snapshot();
//! assert_eq!(map.occupied_count(), engine.occupied_count());
//! # Ok::<(), cavern_core::SimError>(())
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Steppable engine and its run/idle state
pub mod engine;
/// Error taxonomy for grid and engine operations
pub mod error;
/// Occupancy grid, seeding and neighbor queries
pub mod grid;
/// Step metrics and logging setup
pub mod metrics;
/// Transition rules
pub mod rule;
/// Immutable views for renderers and telemetry
pub mod snapshot;

pub use cavern_data::{Cell, RuleKind};
pub use config::SimConfig;
pub use engine::{SimulationEngine, StepReport};
pub use error::{Result, SimError};
pub use grid::{Border, GridState, SeedPolicy};
pub use metrics::{init_logging, StepMetrics};
pub use rule::{NeighborSet, Rule, TransitionRule};
pub use snapshot::{GridSnapshot, Telemetry};
