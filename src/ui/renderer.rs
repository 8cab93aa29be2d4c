use cavern_core::{Cell, GridSnapshot, Telemetry};

pub const OCCUPIED_GLYPH: char = '█';
pub const EMPTY_GLYPH: char = ' ';

/// Paints snapshots as text, one glyph per cell.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    occupied: char,
    empty: char,
    framed: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TextRenderer {
    pub fn new(framed: bool) -> Self {
        Self {
            occupied: OCCUPIED_GLYPH,
            empty: EMPTY_GLYPH,
            framed,
        }
    }

    pub fn with_glyphs(mut self, occupied: char, empty: char) -> Self {
        self.occupied = occupied;
        self.empty = empty;
        self
    }

    fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::Occupied => self.occupied,
            Cell::Empty => self.empty,
        }
    }

    /// Grid only. Rows are newline-terminated; a frame of border glyphs is
    /// drawn around the grid when enabled, matching the closed border the
    /// rules assume.
    pub fn render_grid(&self, snapshot: &GridSnapshot) -> String {
        let w = snapshot.width() as usize;
        let h = snapshot.height() as usize;
        let mut out = String::with_capacity((w + 3) * (h + 2) * self.occupied.len_utf8());

        let edge = |out: &mut String| {
            out.extend(std::iter::repeat(self.occupied).take(w + 2));
            out.push('\n');
        };

        if self.framed {
            edge(&mut out);
        }
        for row in snapshot.rows() {
            if self.framed {
                out.push(self.occupied);
            }
            out.extend(row.iter().map(|&c| self.glyph(c)));
            if self.framed {
                out.push(self.occupied);
            }
            out.push('\n');
        }
        if self.framed {
            edge(&mut out);
        }
        out
    }

    /// Grid followed by the telemetry line.
    pub fn render(&self, snapshot: &GridSnapshot, telemetry: &Telemetry) -> String {
        let mut out = self.render_grid(snapshot);
        out.push_str(&telemetry_line(telemetry));
        out.push('\n');
        out
    }
}

pub fn telemetry_line(t: &Telemetry) -> String {
    format!(
        "EPOCH: {} | ACTIVE_NODES: {} | {} | {}x{}",
        t.generation,
        t.occupied,
        if t.running { "EXECUTE" } else { "HALT" },
        t.width,
        t.height
    )
}

/// Pixel rectangles `(x, y, w, h)` for every occupied cell on a raster
/// surface with square cells of `cell_size` pixels.
pub fn filled_rects(
    snapshot: &GridSnapshot,
    cell_size: u16,
) -> impl Iterator<Item = (u32, u32, u32, u32)> + '_ {
    let size = cell_size as u32;
    snapshot.rows().enumerate().flat_map(move |(y, row)| {
        row.iter().enumerate().filter_map(move |(x, cell)| {
            cell.is_occupied()
                .then(|| (x as u32 * size, y as u32 * size, size, size))
        })
    })
}
