//! Cave level generation library
//!
//! Random noise is smoothed into caves by a cellular automaton, then the
//! largest connected cavern is kept. Re-exports modules for use by the binary.

pub mod ascii;
pub mod caverns;
pub mod cell;
pub mod error;
pub mod generator;
pub mod grid;
pub mod noise;
pub mod params;
pub mod rules;
pub mod seeds;
pub mod tilemap;
pub mod viewer;

pub use caverns::{Cavern, CavernStats};
pub use cell::CellState;
pub use error::CaveError;
pub use generator::{CaveGenerator, GenerationSummary, Phase};
pub use grid::CaveGrid;
pub use params::{CavePreset, CaveParams};
pub use rules::AutomatonRules;
pub use tilemap::Coord;
