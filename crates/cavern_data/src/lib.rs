//! Plain data types shared by the Cavern simulation crates.

pub mod data;

pub use data::cell::Cell;
pub use data::rule::RuleKind;
