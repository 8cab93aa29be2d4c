use serde::{Deserialize, Serialize};

/// State of a single grid cell.
///
/// Stored as a two-valued integer rather than a `bool` so that multi-state
/// rules can extend it later without changing the buffer layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Cell {
    /// Open floor.
    #[default]
    Empty = 0,
    /// Solid wall.
    Occupied = 1,
}

impl Cell {
    #[inline(always)]
    #[must_use]
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Occupied)
    }

    /// Raw integer value of the state.
    #[inline(always)]
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Cell {
    fn from(occupied: bool) -> Self {
        if occupied {
            Cell::Occupied
        } else {
            Cell::Empty
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Occupied),
            other => Err(other),
        }
    }
}
