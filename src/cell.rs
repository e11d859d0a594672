//! Cell states of the cave automaton.

use serde::{Deserialize, Serialize};

/// State of a single cell. A cave is made of exactly these two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Wall,
    Passage,
}

impl CellState {
    pub fn is_wall(self) -> bool {
        self == CellState::Wall
    }

    pub fn is_passage(self) -> bool {
        self == CellState::Passage
    }

    /// Character used by text renderings and fixtures.
    pub fn symbol(self) -> char {
        match self {
            CellState::Wall => '#',
            CellState::Passage => '.',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '#' => Some(CellState::Wall),
            '.' => Some(CellState::Passage),
            _ => None,
        }
    }
}
