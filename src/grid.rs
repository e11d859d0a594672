//! Grid store for the cave automaton
//!
//! `CaveGrid` owns the cell buffer and is the only way the seeder, the rule
//! engine and the cavern analysis read or write cells. Dimensions are fixed at
//! construction; a fresh grid is solid wall.

use crate::cell::CellState;
use crate::error::{CaveError, Result};
use crate::tilemap::{Coord, Tilemap};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaveGrid {
    cells: Tilemap<CellState>,
}

impl CaveGrid {
    /// Create a `width x height` grid filled with walls.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CaveError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if width.checked_mul(height).is_none() {
            return Err(CaveError::InvalidConfiguration(format!(
                "grid of {}x{} cells is too large",
                width, height
            )));
        }
        Ok(Self {
            cells: Tilemap::new_with(width, height, CellState::Wall),
        })
    }

    /// Build a grid from text rows: `#` is wall, `.` is passage.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(CaveError::InvalidConfiguration(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let state = CellState::from_symbol(c).ok_or_else(|| {
                    CaveError::InvalidConfiguration(format!(
                        "unknown cell symbol {:?} at ({}, {})",
                        c, x, y
                    ))
                })?;
                grid.cells.set(Coord::new(x, y), state);
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.cells.in_bounds(coord)
    }

    fn out_of_bounds(&self, coord: Coord) -> CaveError {
        CaveError::OutOfBounds {
            x: coord.x,
            y: coord.y,
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn get(&self, coord: Coord) -> Result<CellState> {
        self.cells
            .get(coord)
            .copied()
            .ok_or_else(|| self.out_of_bounds(coord))
    }

    pub fn set(&mut self, coord: Coord, state: CellState) -> Result<()> {
        if self.cells.set(coord, state) {
            Ok(())
        } else {
            Err(self.out_of_bounds(coord))
        }
    }

    /// State of the cell at `(x, y)`.
    pub fn cell_state(&self, x: usize, y: usize) -> Result<CellState> {
        self.get(Coord::new(x, y))
    }

    /// In-bounds orthogonal neighbors of `coord`.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.cells.neighbors(coord)
    }

    /// Signed lookup used by neighbor counting: anything past the edge is wall.
    pub fn is_wall_or_off_grid(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return true;
        }
        self.cells
            .get(Coord::new(x as usize, y as usize))
            .map_or(true, |state| state.is_wall())
    }

    /// True iff the cell lies on the outermost ring of the grid.
    pub fn is_border(&self, x: usize, y: usize) -> Result<bool> {
        let coord = Coord::new(x, y);
        if !self.in_bounds(coord) {
            return Err(self.out_of_bounds(coord));
        }
        Ok(self.is_border_unchecked(coord))
    }

    fn is_border_unchecked(&self, coord: Coord) -> bool {
        coord.x == 0
            || coord.y == 0
            || coord.x == self.width() - 1
            || coord.y == self.height() - 1
    }

    /// Open every listed in-bounds cell as passage. Coordinates outside the
    /// grid are skipped.
    pub(crate) fn open_cells(&mut self, coords: impl IntoIterator<Item = Coord>) {
        for coord in coords {
            if let Some(cell) = self.cells.get_mut(coord) {
                *cell = CellState::Passage;
            }
        }
    }

    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    pub fn fill_with_walls(&mut self) {
        self.fill(CellState::Wall);
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|(_, &s)| s == state).count()
    }

    /// All cells with their coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells.iter().map(|(coord, &state)| (coord, state))
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = (Coord, &mut CellState)> {
        self.cells.iter_mut()
    }

    /// Row-major coordinates. The grid itself owns this order so every
    /// consumer scans identically.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        self.cells.coords()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_wall() {
        let grid = CaveGrid::new(7, 3).unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.count(CellState::Wall), 21);
        assert_eq!(grid.count(CellState::Passage), 0);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            CaveGrid::new(0, 5),
            Err(CaveError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CaveGrid::new(5, 0),
            Err(CaveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        // 2^33 x 2^33 on 64-bit targets
        let side = 1usize << (usize::BITS / 2 + 1);
        assert!(matches!(
            CaveGrid::new(side, side),
            Err(CaveError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CaveGrid::new(usize::MAX, 2),
            Err(CaveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_open_cells_skips_outside() {
        let mut grid = CaveGrid::new(3, 3).unwrap();
        grid.open_cells([Coord::new(1, 1), Coord::new(5, 5), Coord::new(2, 0)]);
        assert_eq!(grid.count(CellState::Passage), 2);
        assert_eq!(grid.cell_state(1, 1).unwrap(), CellState::Passage);
        assert_eq!(grid.cell_state(2, 0).unwrap(), CellState::Passage);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = CaveGrid::new(4, 4).unwrap();
        assert!(matches!(
            grid.cell_state(4, 0),
            Err(CaveError::OutOfBounds { x: 4, y: 0, width: 4, height: 4 })
        ));
        assert!(grid.set(Coord::new(0, 9), CellState::Passage).is_err());
        assert!(grid.is_border(10, 10).is_err());
        // failed writes leave the grid untouched
        assert_eq!(grid.count(CellState::Passage), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = CaveGrid::new(4, 4).unwrap();
        grid.set(Coord::new(2, 1), CellState::Passage).unwrap();
        assert_eq!(grid.cell_state(2, 1).unwrap(), CellState::Passage);
        assert_eq!(grid.cell_state(1, 2).unwrap(), CellState::Wall);
    }

    #[test]
    fn test_is_border() {
        let grid = CaveGrid::new(5, 4).unwrap();
        assert!(grid.is_border(0, 2).unwrap());
        assert!(grid.is_border(4, 2).unwrap());
        assert!(grid.is_border(2, 0).unwrap());
        assert!(grid.is_border(2, 3).unwrap());
        assert!(!grid.is_border(2, 2).unwrap());
        assert!(!grid.is_border(1, 1).unwrap());
    }

    #[test]
    fn test_off_grid_counts_as_wall() {
        let mut grid = CaveGrid::new(3, 3).unwrap();
        grid.fill(CellState::Passage);
        assert!(grid.is_wall_or_off_grid(-1, 0));
        assert!(grid.is_wall_or_off_grid(0, -1));
        assert!(grid.is_wall_or_off_grid(3, 1));
        assert!(!grid.is_wall_or_off_grid(1, 1));
    }

    #[test]
    fn test_from_rows() {
        let grid = CaveGrid::from_rows(&["###", "#.#", "###"]).unwrap();
        assert_eq!(grid.cell_state(1, 1).unwrap(), CellState::Passage);
        assert_eq!(grid.count(CellState::Passage), 1);

        assert!(CaveGrid::from_rows(&["###", "##"]).is_err());
        assert!(CaveGrid::from_rows(&["#x#"]).is_err());
        assert!(CaveGrid::from_rows(&[]).is_err());
    }
}
