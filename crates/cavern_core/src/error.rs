//! Error types for the simulation core.
//!
//! Configuration loading reports through `anyhow`; everything the grid and
//! engine can reject at runtime is a [`SimError`].

use cavern_data::RuleKind;
use thiserror::Error;

/// Main error type for grid and engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Width or height is zero, above the configured maximum, or does not
    /// match the supplied buffer length.
    #[error("Invalid dimensions: {width}x{height} (allowed 1..={max} per side)")]
    InvalidDimensions { width: u16, height: u16, max: u16 },

    /// Direct cell access outside the grid.
    #[error("Cell ({row}, {col}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: u16,
        height: u16,
    },

    /// Seed probability outside [0.0, 1.0].
    #[error("Seed probability must be in [0.0, 1.0], got {0}")]
    InvalidProbability(f64),

    /// Rule slot exists but has no implementation.
    #[error("Rule '{0}' is not implemented")]
    UnsupportedRule(RuleKind),

    /// Unparsable rule selector or out-of-range threshold.
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// Malformed text pattern.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new rule error.
    #[must_use]
    pub fn invalid_rule<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRule(msg.into())
    }

    /// Creates a new pattern error.
    #[must_use]
    pub fn invalid_pattern<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPattern(msg.into())
    }
}
