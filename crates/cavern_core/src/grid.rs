//! Occupancy grid with closed-border neighbor queries.
//!
//! The grid owns two buffers of identical length. A generation is computed by
//! reading `cells` and writing `back_buffer`, then swapping them, so a step
//! never observes a cell it has already updated. After a step the back buffer
//! holds the previous generation until the next one overwrites it.
//!
//! Neighbors outside the grid count as [`Cell::Occupied`] unless a rule asks
//! for an open [`Border`]. The closed border is what makes cave maps wall off
//! at the edges.

use crate::error::{Result, SimError};
use crate::rule::TransitionRule;
use crate::snapshot::GridSnapshot;
use cavern_data::Cell;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound on either side unless configured otherwise.
pub const DEFAULT_MAX_DIMENSION: u16 = 500;
/// Probability that a freshly seeded cell is occupied.
pub const DEFAULT_FILL_PROBABILITY: f64 = 0.45;

const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// What neighbors outside the grid count as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    /// Off-grid neighbors are occupied (solid wall around the map).
    #[default]
    Closed,
    /// Off-grid neighbors are empty.
    Open,
}

impl std::str::FromStr for Border {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "closed" | "solid" | "wall" => Ok(Border::Closed),
            "open" | "dead" => Ok(Border::Open),
            other => Err(SimError::invalid_rule(format!("unknown border '{other}'"))),
        }
    }
}

/// How a grid is populated before the first generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Each cell is independently occupied with this probability.
    pub fill_probability: f64,
    /// Seed for the engine's random source. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            fill_probability: DEFAULT_FILL_PROBABILITY,
            seed: None,
        }
    }
}

impl SeedPolicy {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fill_probability(mut self, fill_probability: f64) -> Self {
        self.fill_probability = fill_probability;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.fill_probability) {
            Ok(())
        } else {
            Err(SimError::InvalidProbability(self.fill_probability))
        }
    }
}

/// Checks `1..=max` on both sides.
pub fn validate_dimensions(width: u16, height: u16, max: u16) -> Result<()> {
    if width == 0 || height == 0 || width > max || height > max {
        return Err(SimError::InvalidDimensions { width, height, max });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    back_buffer: Vec<Cell>,
}

impl GridState {
    /// Allocates a `width x height` grid and seeds it from `rng`.
    pub fn initialize<R: Rng + ?Sized>(
        width: u16,
        height: u16,
        policy: &SeedPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        Self::initialize_bounded(width, height, DEFAULT_MAX_DIMENSION, policy, rng)
    }

    /// Like [`GridState::initialize`] with an explicit dimension cap.
    pub fn initialize_bounded<R: Rng + ?Sized>(
        width: u16,
        height: u16,
        max_dimension: u16,
        policy: &SeedPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        validate_dimensions(width, height, max_dimension)?;
        policy.validate()?;

        let len = width as usize * height as usize;
        let cells = (0..len)
            .map(|_| Cell::from(rng.gen_bool(policy.fill_probability)))
            .collect();
        Ok(Self::with_buffers(width, height, cells))
    }

    /// Grid with every cell set to `cell`.
    pub fn filled(width: u16, height: u16, cell: Cell) -> Result<Self> {
        validate_dimensions(width, height, DEFAULT_MAX_DIMENSION)?;
        let len = width as usize * height as usize;
        Ok(Self::with_buffers(width, height, vec![cell; len]))
    }

    /// Grid from a row-major buffer. The length must be `width * height`.
    pub fn from_cells(width: u16, height: u16, cells: Vec<Cell>) -> Result<Self> {
        validate_dimensions(width, height, DEFAULT_MAX_DIMENSION)?;
        if cells.len() != width as usize * height as usize {
            return Err(SimError::InvalidDimensions {
                width,
                height,
                max: DEFAULT_MAX_DIMENSION,
            });
        }
        Ok(Self::with_buffers(width, height, cells))
    }

    /// Parses a text pattern, one row per line.
    ///
    /// `#`, `O`, `*`, `1` and `█` are occupied; `.`, `0`, `-` and spaces are
    /// empty. Blank lines are ignored and every row must have the same width.
    pub fn from_pattern(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(SimError::invalid_pattern("pattern has no rows"));
        };

        let width = first.chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            for ch in line.chars() {
                cells.push(match ch {
                    '#' | 'O' | '*' | '1' | '█' => Cell::Occupied,
                    '.' | '0' | '-' | ' ' => Cell::Empty,
                    other => {
                        return Err(SimError::invalid_pattern(format!(
                            "unexpected '{other}' on row {row}"
                        )))
                    }
                });
            }
            if cells.len() - before != width {
                return Err(SimError::invalid_pattern(format!(
                    "row {row} has {} cells, expected {width}",
                    cells.len() - before
                )));
            }
        }

        let width = u16::try_from(width)
            .map_err(|_| SimError::invalid_pattern(format!("pattern too wide ({width})")))?;
        let height = u16::try_from(rows.len())
            .map_err(|_| SimError::invalid_pattern(format!("pattern too tall ({})", rows.len())))?;
        Self::from_cells(width, height, cells)
    }

    fn with_buffers(width: u16, height: u16, cells: Vec<Cell>) -> Self {
        let back_buffer = vec![Cell::Empty; cells.len()];
        Self {
            width,
            height,
            cells,
            back_buffer,
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

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width as usize + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.height as usize && col < self.width as usize {
            Ok(self.index(row, col))
        } else {
            Err(SimError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<()> {
        let idx = self.check_bounds(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Occupied cells among the 8 Moore neighbors of `(row, col)`.
    ///
    /// Off-grid neighbors count as occupied, so a corner of an all-empty grid
    /// reports 5 and a non-corner edge cell reports 3.
    #[must_use]
    pub fn neighbor_occupied_count(&self, row: usize, col: usize) -> u8 {
        self.neighbor_count_with(row, col, Border::Closed)
    }

    /// Occupied Moore neighbors under an explicit border policy.
    #[must_use]
    pub fn neighbor_count_with(&self, row: usize, col: usize, border: Border) -> u8 {
        let off_grid_counts = border == Border::Closed;
        let h = self.height as i64;
        let w = self.width as i64;
        let mut count = 0;
        for (dy, dx) in MOORE_OFFSETS {
            let ny = row as i64 + dy;
            let nx = col as i64 + dx;
            let occupied = if ny < 0 || ny >= h || nx < 0 || nx >= w {
                off_grid_counts
            } else {
                self.cells[ny as usize * self.width as usize + nx as usize].is_occupied()
            };
            if occupied {
                count += 1;
            }
        }
        count
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Copy of the current generation.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.width, self.height, self.cells.clone())
    }

    /// Copy of the generation before the last [`GridState::advance`].
    ///
    /// Before the first advance this is an all-empty buffer.
    #[must_use]
    pub fn previous_snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.width, self.height, self.back_buffer.clone())
    }

    /// Applies `rule` to every cell once. Returns whether any cell changed.
    pub fn advance<R: TransitionRule + ?Sized>(&mut self, rule: &R) -> bool {
        let mut next = std::mem::take(&mut self.back_buffer);
        if next.len() != self.cells.len() {
            next = vec![Cell::Empty; self.cells.len()];
        }

        let border = rule.border();
        let w = self.width as usize;
        for row in 0..self.height as usize {
            for col in 0..w {
                let idx = row * w + col;
                let n = self.neighbor_count_with(row, col, border);
                next[idx] = rule.next_state(self.cells[idx], n);
            }
        }

        std::mem::swap(&mut self.cells, &mut next);
        self.back_buffer = next;
        self.cells != self.back_buffer
    }
}
