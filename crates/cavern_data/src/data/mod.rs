//! Core data structures for the Cavern simulation.

pub mod cell;
pub mod rule;
