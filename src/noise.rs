//! Random noise seeding for the cave grid.

use rand::Rng;

use crate::cell::CellState;
use crate::grid::CaveGrid;

impl CaveGrid {
    /// Overwrite every cell: wall with probability `wall_chance`, else passage.
    ///
    /// One uniform draw in `[0, 1)` per cell, row by row, so a seeded RNG
    /// always produces the same grid. Probabilities outside `[0, 1]` saturate.
    pub fn fill_with_noise<R: Rng + ?Sized>(&mut self, wall_chance: f64, rng: &mut R) {
        for (_, cell) in self.cells_mut() {
            *cell = if rng.gen::<f64>() < wall_chance {
                CellState::Wall
            } else {
                CellState::Passage
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_saturating_probabilities() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = CaveGrid::new(20, 20).unwrap();

        grid.fill_with_noise(1.0, &mut rng);
        assert_eq!(grid.count(CellState::Wall), 400);

        grid.fill_with_noise(0.0, &mut rng);
        assert_eq!(grid.count(CellState::Passage), 400);

        grid.fill_with_noise(3.5, &mut rng);
        assert_eq!(grid.count(CellState::Wall), 400);

        grid.fill_with_noise(-1.0, &mut rng);
        assert_eq!(grid.count(CellState::Passage), 400);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let mut a = CaveGrid::new(32, 24).unwrap();
        let mut b = CaveGrid::new(32, 24).unwrap();
        a.fill_with_noise(0.45, &mut ChaCha8Rng::seed_from_u64(42));
        b.fill_with_noise(0.45, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_wall_ratio_tracks_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let mut grid = CaveGrid::new(100, 100).unwrap();
        grid.fill_with_noise(0.45, &mut rng);
        let ratio = grid.count(CellState::Wall) as f64 / 10_000.0;
        assert!((0.40..0.50).contains(&ratio), "wall ratio {}", ratio);
    }
}
