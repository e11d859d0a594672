//! Tick-driven cave generation
//!
//! `CaveGenerator` runs the whole pipeline one small unit at a time so a
//! harness can animate it: seed noise, smooth for a fixed number of
//! generations, cull to the largest cavern, and start over with a new seed
//! if the cave came out too small.

use log::{debug, info, warn};

use crate::caverns::CavernStats;
use crate::error::Result;
use crate::grid::CaveGrid;
use crate::params::CaveParams;
use crate::seeds::AttemptSeed;

/// Where the generator is in the current attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// `done` automaton steps have run in this attempt.
    Smoothing { done: usize },
    /// A cave was accepted; ticking does nothing until the next restart.
    Complete,
}

/// Outcome of a finished generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationSummary {
    pub seed: u64,
    pub attempts: u32,
    /// Whether the accepted cave met `min_area` (false if the budget ran out)
    pub met_min_area: bool,
    pub stats: CavernStats,
}

pub struct CaveGenerator {
    params: CaveParams,
    seed: AttemptSeed,
    grid: CaveGrid,
    phase: Phase,
    met_min_area: bool,
}

impl CaveGenerator {
    /// Validate `params` and seed the first attempt.
    pub fn new(params: CaveParams, seed: u64) -> Result<Self> {
        params.validate()?;
        let grid = CaveGrid::new(params.width, params.height)?;
        let mut generator = Self {
            params,
            seed: AttemptSeed::new(seed, 0),
            grid,
            phase: Phase::Smoothing { done: 0 },
            met_min_area: false,
        };
        generator.seed_attempt();
        Ok(generator)
    }

    pub fn params(&self) -> &CaveParams {
        &self.params
    }

    pub fn grid(&self) -> &CaveGrid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed.master
    }

    /// Zero-based index of the current attempt.
    pub fn attempt(&self) -> u32 {
        self.seed.attempt
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    fn seed_attempt(&mut self) {
        let mut rng = self.seed.rng();
        self.grid.fill_with_noise(self.params.wall_chance, &mut rng);
        self.phase = Phase::Smoothing { done: 0 };
        self.met_min_area = false;
        debug!("seeded attempt {}", self.seed);
    }

    /// Throw away the current cave and try the next attempt of the same seed.
    pub fn restart(&mut self) {
        self.seed = AttemptSeed::new(self.seed.master, self.seed.attempt + 1);
        self.seed_attempt();
    }

    /// Start over from a new master seed with a fresh attempt budget.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = AttemptSeed::new(seed, 0);
        self.seed_attempt();
    }

    /// Do one unit of work and return the resulting phase.
    pub fn tick(&mut self) -> Phase {
        match self.phase {
            Phase::Complete => {}
            Phase::Smoothing { done } if done < self.params.smoothing_steps => {
                self.grid.step_with(&self.params.rules);
                self.phase = Phase::Smoothing { done: done + 1 };
            }
            Phase::Smoothing { .. } => self.finish_attempt(),
        }
        self.phase
    }

    fn finish_attempt(&mut self) {
        if self.params.cull {
            self.grid.cull_to_largest_cavern();
        }

        let area = self.grid.total_passage_area();
        if area >= self.params.min_area {
            info!("accepted cave {} with {} passage cells", self.seed, area);
            self.met_min_area = true;
            self.phase = Phase::Complete;
        } else if self.seed.attempt + 1 >= self.params.max_attempts {
            warn!(
                "gave up after {} attempts; keeping cave {} with {} of {} required cells",
                self.seed.attempt + 1,
                self.seed,
                area,
                self.params.min_area
            );
            self.phase = Phase::Complete;
        } else {
            debug!(
                "attempt {} too small ({} < {}), restarting",
                self.seed, area, self.params.min_area
            );
            self.restart();
        }
    }

    /// Tick until a cave is accepted.
    pub fn run_to_completion(&mut self) -> GenerationSummary {
        while self.tick() != Phase::Complete {}
        self.summary()
    }

    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary {
            seed: self.seed.master,
            attempts: self.seed.attempt + 1,
            met_min_area: self.met_min_area,
            stats: self.grid.cavern_stats(),
        }
    }
}
