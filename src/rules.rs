//! Cellular automaton rules
//!
//! One generation looks at the Moore neighborhood of every cell:
//! 1. A wall with fewer than `wall_survival` wall neighbors opens into a passage.
//! 2. A passage with at least `passage_collapse` wall neighbors closes into a wall.
//! 3. Anything else keeps its state.
//!
//! Neighbors past the grid edge count as walls, and every border cell is forced
//! back to wall after the rules run. All neighbor counts are taken from the
//! grid as it was before the step; nothing is written until every count exists.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::cell::CellState;
use crate::error::{CaveError, Result};
use crate::grid::CaveGrid;
use crate::tilemap::{Coord, Tilemap, MOORE_OFFSETS};

/// Thresholds for the transition rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonRules {
    /// A wall survives only with at least this many wall neighbors.
    pub wall_survival: u8,
    /// A passage collapses once it has this many wall neighbors.
    pub passage_collapse: u8,
}

impl Default for AutomatonRules {
    fn default() -> Self {
        Self {
            wall_survival: 4,
            passage_collapse: 5,
        }
    }
}

impl AutomatonRules {
    /// Thresholds above 9 can never (or always) fire; reject them.
    pub fn validate(&self) -> Result<()> {
        if self.wall_survival > 9 || self.passage_collapse > 9 {
            return Err(CaveError::InvalidConfiguration(format!(
                "rule thresholds must be in 0..=9, got wall_survival={} passage_collapse={}",
                self.wall_survival, self.passage_collapse
            )));
        }
        Ok(())
    }

    /// New state for a non-border cell given its wall neighbor count.
    pub fn transition(&self, current: CellState, wall_neighbors: u8) -> CellState {
        match current {
            CellState::Wall if wall_neighbors < self.wall_survival => CellState::Passage,
            CellState::Passage if wall_neighbors >= self.passage_collapse => CellState::Wall,
            state => state,
        }
    }
}

impl CaveGrid {
    /// Wall neighbors of a cell among its 8 surrounding positions,
    /// off-grid positions included as walls.
    pub fn wall_neighbor_count(&self, coord: Coord) -> Result<u8> {
        self.get(coord)?;
        Ok(self.count_walls_around(coord))
    }

    fn count_walls_around(&self, coord: Coord) -> u8 {
        let (x, y) = (coord.x as isize, coord.y as isize);
        MOORE_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| self.is_wall_or_off_grid(x + dx, y + dy))
            .count() as u8
    }

    /// Snapshot of wall neighbor counts for every cell.
    pub fn wall_neighbor_counts(&self) -> Tilemap<u8> {
        let mut counts = Tilemap::new_with(self.width(), self.height(), 0u8);
        for (coord, count) in counts.iter_mut() {
            *count = self.count_walls_around(coord);
        }
        counts
    }

    /// Advance one generation with the standard 4/5 rule.
    pub fn step(&mut self) {
        self.step_with(&AutomatonRules::default());
    }

    /// Advance one generation with custom thresholds.
    pub fn step_with(&mut self, rules: &AutomatonRules) {
        let counts = self.wall_neighbor_counts();
        let mut changed = 0usize;

        let (last_x, last_y) = (self.width() - 1, self.height() - 1);

        for (coord, cell) in self.cells_mut() {
            let on_border = coord.x == 0 || coord.y == 0 || coord.x == last_x || coord.y == last_y;
            let next = if on_border {
                CellState::Wall
            } else {
                let n = counts.get(coord).copied().unwrap_or(8);
                rules.transition(*cell, n)
            };
            if next != *cell {
                changed += 1;
                *cell = next;
            }
        }

        trace!("automaton step changed {} cells", changed);
    }

    /// Run `generations` steps with the standard rule.
    pub fn step_n(&mut self, generations: usize) {
        for _ in 0..generations {
            self.step();
        }
    }
}
