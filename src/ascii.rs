//! ASCII rendering for cave grids
//!
//! `#` is wall and `.` is passage, one line per row. Used by the headless
//! CLI mode and handy when debugging tests.

use std::io::{self, Write};

use crate::caverns::Cavern;
use crate::grid::CaveGrid;
use crate::tilemap::Coord;

/// Render the grid as text, one row per line.
pub fn render_grid(grid: &CaveGrid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for (coord, state) in grid.cells() {
        out.push(state.symbol());
        if coord.x == grid.width() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Render the grid with one cavern drawn using `mark` instead of `.`.
pub fn render_with_cavern(grid: &CaveGrid, cavern: &Cavern, mark: char) -> String {
    let mut marked = vec![false; grid.width() * grid.height()];
    for Coord { x, y } in cavern.iter() {
        if let Some(slot) = marked.get_mut(y * grid.width() + x) {
            *slot = true;
        }
    }

    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for (idx, (coord, state)) in grid.cells().enumerate() {
        out.push(if marked[idx] { mark } else { state.symbol() });
        if coord.x == grid.width() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Write the text rendering to any writer.
pub fn write_grid<W: Write>(grid: &CaveGrid, writer: &mut W) -> io::Result<()> {
    writer.write_all(render_grid(grid).as_bytes())
}
