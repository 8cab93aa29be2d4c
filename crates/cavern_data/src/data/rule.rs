use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named rule families selectable from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Cave-generation automaton driven by birth/death thresholds.
    #[default]
    Cellular,
    /// Conway's Game of Life (B3/S23).
    ConwayLife,
    /// Reserved for a future erosion rule; not implemented.
    HydraulicErosion,
}

impl RuleKind {
    /// Short selector name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Cellular => "cellular",
            RuleKind::ConwayLife => "life",
            RuleKind::HydraulicErosion => "erosion",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cellular" | "ca" | "cave" => Ok(RuleKind::Cellular),
            "life" | "conway" | "conway_life" | "gol" => Ok(RuleKind::ConwayLife),
            "erosion" | "hydraulic" | "hydraulic_erosion" | "perlin" => {
                Ok(RuleKind::HydraulicErosion)
            }
            other => Err(format!("unknown rule kind '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("cellular".parse(), Ok(RuleKind::Cellular));
        assert_eq!("Life".parse(), Ok(RuleKind::ConwayLife));
        assert_eq!("perlin".parse(), Ok(RuleKind::HydraulicErosion));
        assert!("wireworld".parse::<RuleKind>().is_err());
    }

    #[test]
    fn test_name_round_trips_through_parse() {
        for kind in [
            RuleKind::Cellular,
            RuleKind::ConwayLife,
            RuleKind::HydraulicErosion,
        ] {
            assert_eq!(kind.name().parse(), Ok(kind));
        }
    }
}
