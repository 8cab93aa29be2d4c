//! Front end for the Cavern simulation: the periodic scheduler that plays the
//! engine and a text renderer for its snapshots.

pub mod app;
pub mod ui;
