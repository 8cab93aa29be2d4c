//! Read-only grid views handed to renderers and telemetry.

use cavern_data::Cell;
use serde::{Deserialize, Serialize};

/// Owned copy of one generation.
///
/// Snapshots never alias engine state: a snapshot taken before a `step()` or
/// `reset()` stays readable and keeps describing the generation it was
/// taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl GridSnapshot {
    pub(crate) fn new(width: u16, height: u16, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height as usize && col < self.width as usize {
            Some(self.cells[row * self.width as usize + col])
        } else {
            None
        }
    }

    /// Row-major cell slice.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// `height x width` buffer of raw cell values, for renderers that paint
    /// integers.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.as_u8()).collect())
            .collect()
    }
}

/// Per-generation telemetry published alongside each snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telemetry {
    pub generation: u64,
    pub occupied: usize,
    pub running: bool,
    pub width: u16,
    pub height: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridSnapshot {
        use Cell::{Empty as E, Occupied as O};
        GridSnapshot::new(3, 2, vec![O, E, E, E, O, O])
    }

    #[test]
    fn test_get_and_bounds() {
        let snap = sample();
        assert_eq!(snap.get(0, 0), Some(Cell::Occupied));
        assert_eq!(snap.get(1, 0), Some(Cell::Empty));
        assert_eq!(snap.get(2, 0), None);
        assert_eq!(snap.get(0, 3), None);
    }

    #[test]
    fn test_rows_and_counts() {
        let snap = sample();
        assert_eq!(snap.rows().count(), 2);
        assert_eq!(snap.occupied_count(), 3);
        assert_eq!(snap.to_rows(), vec![vec![1, 0, 0], vec![0, 1, 1]]);
    }
}
