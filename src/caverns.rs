//! Cavern detection
//!
//! A cavern is a maximal set of passage cells joined by orthogonal adjacency
//! (diagonals do not connect, unlike the automaton's 8-cell neighborhood).
//! Caverns are always recomputed from the current grid; nothing is cached.
//!
//! Algorithm:
//! 1. Scan cells row by row
//! 2. For each passage cell not yet flooded, BFS over 4-connected passages
//! 3. A single visited map covers the whole scan, so every cell is queued once

use std::collections::VecDeque;

use log::debug;

use crate::cell::CellState;
use crate::error::Result;
use crate::grid::CaveGrid;
use crate::tilemap::{Coord, Tilemap};

/// A connected region of passage cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cavern {
    /// Cells in flood order; the first one is where the fill started.
    cells: Vec<Coord>,
    /// Bounding box (min_x, min_y, max_x, max_y)
    bounds: (usize, usize, usize, usize),
}

impl Cavern {
    fn new(start: Coord) -> Self {
        Self {
            cells: Vec::new(),
            bounds: (start.x, start.y, start.x, start.y),
        }
    }

    fn add_cell(&mut self, coord: Coord) {
        self.cells.push(coord);
        self.bounds.0 = self.bounds.0.min(coord.x);
        self.bounds.1 = self.bounds.1.min(coord.y);
        self.bounds.2 = self.bounds.2.max(coord.x);
        self.bounds.3 = self.bounds.3.max(coord.y);
    }

    /// Number of cells. Never zero for a cavern returned by the analysis.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    /// Linear scan; meant for callers and tests, not for the flood fill.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        self.bounds
    }

    pub fn bounding_width(&self) -> usize {
        self.bounds.2 - self.bounds.0 + 1
    }

    pub fn bounding_height(&self) -> usize {
        self.bounds.3 - self.bounds.1 + 1
    }
}

impl IntoIterator for Cavern {
    type Item = Coord;
    type IntoIter = std::vec::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// Summary numbers for a grid's caverns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CavernStats {
    pub cavern_count: usize,
    pub total_area: usize,
    pub largest_area: usize,
    pub smallest_area: usize,
}

impl CavernStats {
    pub fn from_caverns(caverns: &[Cavern]) -> Self {
        Self {
            cavern_count: caverns.len(),
            total_area: caverns.iter().map(Cavern::len).sum(),
            largest_area: caverns.iter().map(Cavern::len).max().unwrap_or(0),
            smallest_area: caverns.iter().map(Cavern::len).min().unwrap_or(0),
        }
    }
}

/// Largest by cell count; earlier caverns win ties.
fn first_largest(caverns: Vec<Cavern>) -> Option<Cavern> {
    caverns.into_iter().fold(None, |best, cavern| match best {
        Some(b) if b.len() >= cavern.len() => Some(b),
        _ => Some(cavern),
    })
}

impl CaveGrid {
    fn is_passage_at(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Ok(CellState::Passage))
    }

    /// BFS from `start`, marking cells in `flooded` as they are queued so a cell
    /// is never pending twice. Caller guarantees `start` is an unflooded passage.
    fn flood_from(&self, start: Coord, flooded: &mut Tilemap<bool>) -> Cavern {
        let mut cavern = Cavern::new(start);
        let mut pending = VecDeque::new();

        flooded.set(start, true);
        pending.push_back(start);

        while let Some(coord) = pending.pop_front() {
            cavern.add_cell(coord);

            for next in self.neighbors(coord) {
                if !self.is_passage_at(next) {
                    continue;
                }
                if let Some(seen) = flooded.get_mut(next) {
                    if !*seen {
                        *seen = true;
                        pending.push_back(next);
                    }
                }
            }
        }

        cavern
    }

    /// The cavern containing `coord`, or `None` if that cell is a wall.
    pub fn find_cavern_at(&self, coord: Coord) -> Result<Option<Cavern>> {
        if self.get(coord)? != CellState::Passage {
            return Ok(None);
        }
        let mut flooded = Tilemap::new_with(self.width(), self.height(), false);
        let cavern = self.flood_from(coord, &mut flooded);
        Ok((!cavern.is_empty()).then_some(cavern))
    }

    /// Every cavern in the grid, in the order their first cell is met scanning
    /// row by row. Together they partition the passage cells.
    pub fn find_caverns(&self) -> Vec<Cavern> {
        let mut flooded = Tilemap::new_with(self.width(), self.height(), false);
        let mut caverns = Vec::new();

        for (coord, state) in self.cells() {
            if state != CellState::Passage || flooded.get(coord).copied().unwrap_or(true) {
                continue;
            }
            let cavern = self.flood_from(coord, &mut flooded);
            if !cavern.is_empty() {
                caverns.push(cavern);
            }
        }

        caverns
    }

    /// The cavern with the most cells. On a tie the first one found wins.
    pub fn largest_cavern(&self) -> Option<Cavern> {
        first_largest(self.find_caverns())
    }

    /// Total passage cells across all caverns.
    pub fn total_passage_area(&self) -> usize {
        self.find_caverns().iter().map(Cavern::len).sum()
    }

    pub fn is_area_at_least(&self, desired: usize) -> bool {
        self.total_passage_area() >= desired
    }

    pub fn cavern_stats(&self) -> CavernStats {
        CavernStats::from_caverns(&self.find_caverns())
    }

    /// Wall over everything except the largest cavern.
    ///
    /// Returns the size of the cavern kept, or `None` if there were no
    /// caverns, in which case the grid is left untouched.
    pub fn cull_to_largest_cavern(&mut self) -> Option<usize> {
        let caverns = self.find_caverns();
        let total = caverns.len();
        let largest = first_largest(caverns)?;

        self.fill_with_walls();
        self.open_cells(largest.iter());

        debug!(
            "culled {} of {} caverns, kept {} cells",
            total.saturating_sub(1),
            total,
            largest.len()
        );
        Some(largest.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_wall_has_no_caverns() {
        let grid = CaveGrid::new(8, 8).unwrap();
        assert!(grid.find_caverns().is_empty());
        assert!(grid.largest_cavern().is_none());
        assert_eq!(grid.total_passage_area(), 0);
        assert!(grid.is_area_at_least(0));
        assert!(!grid.is_area_at_least(1));
    }

    #[test]
    fn test_isolated_single_cell() {
        let mut grid = CaveGrid::new(5, 5).unwrap();
        grid.set(Coord::new(2, 2), CellState::Passage).unwrap();

        let caverns = grid.find_caverns();
        assert_eq!(caverns.len(), 1);
        assert_eq!(caverns[0].cells(), &[Coord::new(2, 2)]);
        assert_eq!(grid.total_passage_area(), 1);
        assert!(!grid.is_area_at_least(2));
    }

    #[test]
    #[rustfmt::skip]
    fn test_diagonals_do_not_connect() {
        let grid = CaveGrid::from_rows(&[
            "#####",
            "#.###",
            "##.##",
            "#####",
        ])
        .unwrap();
        let caverns = grid.find_caverns();
        assert_eq!(caverns.len(), 2);
        assert!(caverns.iter().all(|c| c.len() == 1));
    }

    #[test]
    #[rustfmt::skip]
    fn test_find_cavern_at() {
        let grid = CaveGrid::from_rows(&[
            "#######",
            "#...#.#",
            "#.#####",
            "#######",
        ])
        .unwrap();

        let cavern = grid.find_cavern_at(Coord::new(2, 1)).unwrap().unwrap();
        assert_eq!(cavern.len(), 4);
        assert_eq!(cavern.start(), Some(Coord::new(2, 1)));
        assert!(cavern.contains(Coord::new(1, 2)));
        assert!(!cavern.contains(Coord::new(5, 1)));
        assert_eq!(cavern.bounds(), (1, 1, 3, 2));
        assert_eq!(cavern.bounding_width(), 3);
        assert_eq!(cavern.bounding_height(), 2);

        assert!(grid.find_cavern_at(Coord::new(0, 0)).unwrap().is_none());
        assert!(grid.find_cavern_at(Coord::new(7, 0)).is_err());
    }

    #[test]
    #[rustfmt::skip]
    fn test_caverns_partition_passages() {
        let grid = CaveGrid::from_rows(&[
            "..#....",
            ".##.#.#",
            "#...#..",
            "##.##.#",
            "..#..#.",
        ])
        .unwrap();

        let caverns = grid.find_caverns();
        let mut seen = HashSet::new();
        for cavern in &caverns {
            assert!(!cavern.is_empty());
            for coord in cavern.iter() {
                assert!(seen.insert(coord), "{:?} in two caverns", coord);
            }
        }
        let passages: HashSet<_> = grid
            .cells()
            .filter(|(_, s)| s.is_passage())
            .map(|(c, _)| c)
            .collect();
        assert_eq!(seen, passages);
    }

    #[test]
    #[rustfmt::skip]
    fn test_two_cavern_cull() {
        let mut grid = CaveGrid::from_rows(&[
            "##########",
            "#...######",
            "##########",
            "#####.....",
            "##########",
        ])
        .unwrap();
        assert_eq!(grid.find_caverns().len(), 2);

        assert_eq!(grid.cull_to_largest_cavern(), Some(5));
        assert_eq!(grid.total_passage_area(), 5);
        assert_eq!(grid.find_caverns().len(), 1);
        for x in 1..4 {
            assert_eq!(grid.cell_state(x, 1).unwrap(), CellState::Wall);
        }
    }

    #[test]
    fn test_cull_without_caverns_is_noop() {
        let mut grid = CaveGrid::new(6, 6).unwrap();
        let before = grid.clone();
        assert_eq!(grid.cull_to_largest_cavern(), None);
        assert_eq!(grid, before);
    }

    #[test]
    #[rustfmt::skip]
    fn test_tie_keeps_first_found() {
        let grid = CaveGrid::from_rows(&[
            "#####",
            "#..##",
            "#####",
            "##..#",
            "#####",
        ])
        .unwrap();
        let largest = grid.largest_cavern().unwrap();
        assert_eq!(largest.start(), Some(Coord::new(1, 1)));
    }

    #[test]
    fn test_stats() {
        let grid = CaveGrid::from_rows(&["#.#..", "#.###", "#####"]).unwrap();
        let stats = grid.cavern_stats();
        assert_eq!(stats.cavern_count, 2);
        assert_eq!(stats.total_area, 4);
        assert_eq!(stats.largest_area, 2);
        assert_eq!(stats.smallest_area, 2);
    }
}
