//! Transition rules applied once per cell per generation.
//!
//! Every built-in algorithm is a [`Rule`]: a pair of neighbor-count sets
//! deciding birth (empty → occupied) and survival (occupied → occupied).
//! The cave automaton and Conway's Life differ only in those sets, so the
//! step loop in [`crate::grid`] is shared by all of them.

use crate::error::{Result, SimError};
use crate::grid::Border;
use cavern_data::{Cell, RuleKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest possible Moore-neighborhood count.
pub const MAX_NEIGHBORS: u8 = 8;

/// Default birth threshold of the cave automaton.
pub const DEFAULT_BIRTH_THRESHOLD: u8 = 5;
/// Default survival threshold of the cave automaton.
pub const DEFAULT_DEATH_THRESHOLD: u8 = 4;

/// Pure mapping from (current state, occupied neighbor count) to next state.
///
/// Implementations must be deterministic and total over
/// `{Empty, Occupied} x [0, 8]`.
pub trait TransitionRule {
    fn next_state(&self, current: Cell, occupied_neighbors: u8) -> Cell;

    /// Border policy used when counting neighbors for this rule.
    fn border(&self) -> Border {
        Border::Closed
    }
}

impl<F> TransitionRule for F
where
    F: Fn(Cell, u8) -> Cell,
{
    fn next_state(&self, current: Cell, occupied_neighbors: u8) -> Cell {
        self(current, occupied_neighbors)
    }
}

/// Set of neighbor counts in `0..=8`, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NeighborSet(u16);

impl NeighborSet {
    pub const NONE: NeighborSet = NeighborSet(0);

    /// Builds a set from explicit counts. Counts above 8 are rejected.
    pub fn from_counts(counts: &[u8]) -> Result<Self> {
        let mut mask = 0u16;
        for &n in counts {
            if n > MAX_NEIGHBORS {
                return Err(SimError::invalid_rule(format!(
                    "neighbor count {n} exceeds {MAX_NEIGHBORS}"
                )));
            }
            mask |= 1 << n;
        }
        Ok(Self(mask))
    }

    /// All counts `>= threshold`. A threshold of 9 yields the empty set.
    pub fn at_least(threshold: u8) -> Result<Self> {
        if threshold > MAX_NEIGHBORS + 1 {
            return Err(SimError::invalid_rule(format!(
                "threshold {threshold} exceeds {}",
                MAX_NEIGHBORS + 1
            )));
        }
        let counts: Vec<u8> = (threshold..=MAX_NEIGHBORS).collect();
        Self::from_counts(&counts)
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(self, n: u8) -> bool {
        n <= MAX_NEIGHBORS && self.0 & (1 << n) != 0
    }

    pub fn counts(self) -> impl Iterator<Item = u8> {
        (0..=MAX_NEIGHBORS).filter(move |&n| self.contains(n))
    }
}

/// Birth/survive rule covering every built-in algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Named family this rule came from; `None` for a custom rulestring.
    pub kind: Option<RuleKind>,
    pub birth: NeighborSet,
    pub survive: NeighborSet,
    #[serde(default)]
    pub border: Border,
}

impl Default for Rule {
    fn default() -> Self {
        Self::cave()
    }
}

impl Rule {
    /// Cave automaton with the default thresholds (birth >= 5, survive >= 4).
    #[must_use]
    pub fn cave() -> Self {
        Self {
            kind: Some(RuleKind::Cellular),
            birth: NeighborSet(0b1_1110_0000),
            survive: NeighborSet(0b1_1111_0000),
            border: Border::Closed,
        }
    }

    /// Cave automaton with explicit thresholds.
    ///
    /// An empty cell becomes occupied when at least `birth_threshold`
    /// neighbors are occupied; an occupied cell stays occupied when at least
    /// `death_threshold` are.
    pub fn cellular(birth_threshold: u8, death_threshold: u8) -> Result<Self> {
        Ok(Self {
            kind: Some(RuleKind::Cellular),
            birth: NeighborSet::at_least(birth_threshold)?,
            survive: NeighborSet::at_least(death_threshold)?,
            border: Border::Closed,
        })
    }

    /// Conway's Game of Life, B3/S23, on an open border.
    ///
    /// Under a closed border every edge cell of an empty region would see
    /// exactly three occupied neighbors and be born.
    #[must_use]
    pub fn conway_life() -> Self {
        Self {
            kind: Some(RuleKind::ConwayLife),
            birth: NeighborSet(1 << 3),
            survive: NeighborSet((1 << 2) | (1 << 3)),
            border: Border::Open,
        }
    }

    #[must_use]
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    /// Default rule for a named family.
    pub fn from_kind(kind: RuleKind) -> Result<Self> {
        match kind {
            RuleKind::Cellular => Ok(Self::cave()),
            RuleKind::ConwayLife => Ok(Self::conway_life()),
            RuleKind::HydraulicErosion => Err(SimError::UnsupportedRule(kind)),
        }
    }

    /// Parses `B<digits>/S<digits>` (either order, case-insensitive).
    ///
    /// Rulestring rules use an open border, like Life.
    pub fn from_rulestring(s: &str) -> Result<Self> {
        let mut birth = None;
        let mut survive = None;

        for part in s.trim().split('/') {
            let part = part.trim();
            let (slot, digits) = match part.chars().next() {
                Some('B' | 'b') => (&mut birth, &part[1..]),
                Some('S' | 's') => (&mut survive, &part[1..]),
                _ => {
                    return Err(SimError::invalid_rule(format!(
                        "malformed rulestring '{s}'"
                    )))
                }
            };
            if slot.is_some() {
                return Err(SimError::invalid_rule(format!(
                    "duplicate section in rulestring '{s}'"
                )));
            }
            let counts = digits
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or_else(|| SimError::invalid_rule(format!("bad digit '{c}' in '{s}'")))
                })
                .collect::<Result<Vec<u8>>>()?;
            *slot = Some(NeighborSet::from_counts(&counts)?);
        }

        match (birth, survive) {
            (Some(birth), Some(survive)) => Ok(Self {
                kind: None,
                birth,
                survive,
                border: Border::Open,
            }),
            _ => Err(SimError::invalid_rule(format!(
                "rulestring '{s}' needs both B and S sections"
            ))),
        }
    }

    /// Resolves a selector (`cellular`, `life`, `erosion`, or a rulestring).
    ///
    /// Thresholds only apply to the cellular family.
    pub fn resolve(selector: &str, birth_threshold: u8, death_threshold: u8) -> Result<Self> {
        match selector.parse::<RuleKind>() {
            Ok(RuleKind::Cellular) => Self::cellular(birth_threshold, death_threshold),
            Ok(kind) => Self::from_kind(kind),
            Err(_) => Self::from_rulestring(selector),
        }
    }

    /// Rulestring form, e.g. `B3/S23`.
    #[must_use]
    pub fn rulestring(&self) -> String {
        let digits = |set: NeighborSet| set.counts().map(|n| char::from(b'0' + n)).collect::<String>();
        format!("B{}/S{}", digits(self.birth), digits(self.survive))
    }
}

impl TransitionRule for Rule {
    #[inline(always)]
    fn next_state(&self, current: Cell, occupied_neighbors: u8) -> Cell {
        let set = match current {
            Cell::Occupied => self.survive,
            Cell::Empty => self.birth,
        };
        Cell::from(set.contains(occupied_neighbors))
    }

    fn border(&self) -> Border {
        self.border
    }
}

impl FromStr for Rule {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s, DEFAULT_BIRTH_THRESHOLD, DEFAULT_DEATH_THRESHOLD)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{kind} ({})", self.rulestring()),
            None => f.write_str(&self.rulestring()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cave_thresholds() {
        let rule = Rule::cave();
        assert_eq!(rule.next_state(Cell::Occupied, 4), Cell::Occupied);
        assert_eq!(rule.next_state(Cell::Occupied, 3), Cell::Empty);
        assert_eq!(rule.next_state(Cell::Empty, 5), Cell::Occupied);
        assert_eq!(rule.next_state(Cell::Empty, 4), Cell::Empty);
    }

    #[test]
    fn test_cellular_matches_cave_defaults() {
        let rule = Rule::cellular(DEFAULT_BIRTH_THRESHOLD, DEFAULT_DEATH_THRESHOLD).unwrap();
        assert_eq!(rule, Rule::cave());
        assert_eq!(rule.rulestring(), "B5678/S45678");
    }

    #[test]
    fn test_conway_survive_set_is_not_a_threshold() {
        let rule = Rule::conway_life();
        assert_eq!(rule.next_state(Cell::Occupied, 1), Cell::Empty);
        assert_eq!(rule.next_state(Cell::Occupied, 2), Cell::Occupied);
        assert_eq!(rule.next_state(Cell::Occupied, 3), Cell::Occupied);
        assert_eq!(rule.next_state(Cell::Occupied, 4), Cell::Empty);
        assert_eq!(rule.next_state(Cell::Empty, 3), Cell::Occupied);
        assert_eq!(rule.next_state(Cell::Empty, 2), Cell::Empty);
    }

    #[test]
    fn test_threshold_nine_disables_transition() {
        let rule = Rule::cellular(9, 0).unwrap();
        for n in 0..=MAX_NEIGHBORS {
            assert_eq!(rule.next_state(Cell::Empty, n), Cell::Empty);
            assert_eq!(rule.next_state(Cell::Occupied, n), Cell::Occupied);
        }
        assert!(Rule::cellular(10, 4).is_err());
    }

    #[test]
    fn test_erosion_is_reserved() {
        assert_eq!(
            Rule::from_kind(RuleKind::HydraulicErosion),
            Err(SimError::UnsupportedRule(RuleKind::HydraulicErosion))
        );
    }

    #[test]
    fn test_rulestring_parsing() {
        let life = Rule::from_rulestring("B3/S23").unwrap();
        assert_eq!(life.birth, Rule::conway_life().birth);
        assert_eq!(life.survive, Rule::conway_life().survive);
        assert_eq!(life.kind, None);

        let reversed = Rule::from_rulestring("s23/b36").unwrap();
        assert_eq!(reversed.rulestring(), "B36/S23");

        assert!(Rule::from_rulestring("B3").is_err());
        assert!(Rule::from_rulestring("B9/S23").is_err());
        assert!(Rule::from_rulestring("B3/B4").is_err());
        assert!(Rule::from_rulestring("X3/S23").is_err());
    }

    #[test]
    fn test_resolve_selectors() {
        assert_eq!(Rule::resolve("life", 1, 1).unwrap(), Rule::conway_life());
        let custom = Rule::resolve("cellular", 6, 3).unwrap();
        assert_eq!(custom.rulestring(), "B678/S345678");
        assert!(matches!(
            "erosion".parse::<Rule>(),
            Err(SimError::UnsupportedRule(_))
        ));
        assert!("B2/S".parse::<Rule>().is_ok());
    }

    #[test]
    fn test_default_borders() {
        assert_eq!(Rule::cave().border, Border::Closed);
        assert_eq!(Rule::conway_life().border, Border::Open);
        assert_eq!(Rule::from_rulestring("B3/S23").unwrap().border, Border::Open);
        let walled_life = Rule::conway_life().with_border(Border::Closed);
        assert_eq!(TransitionRule::border(&walled_life), Border::Closed);
    }

    #[test]
    fn test_closures_are_rules() {
        let invert = |c: Cell, _n: u8| Cell::from(!c.is_occupied());
        assert_eq!(invert.next_state(Cell::Empty, 0), Cell::Occupied);
        assert_eq!(invert.border(), Border::Closed);
    }
}
