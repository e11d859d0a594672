//! Seed management for cave generation
//!
//! Every restart of the generator draws its noise from its own RNG, derived
//! from the master seed and the attempt number. Derivation uses SplitMix64
//! mixing, so any attempt can be replayed from `(master, attempt)` alone, on
//! any platform and toolchain.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed for a single generation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptSeed {
    pub master: u64,
    pub attempt: u32,
    pub noise: u64,
}

impl AttemptSeed {
    pub fn new(master: u64, attempt: u32) -> Self {
        Self {
            master,
            attempt,
            noise: derive_seed(master, "noise", attempt),
        }
    }

    /// Fresh RNG for this attempt's noise fill.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.noise)
    }
}

impl std::fmt::Display for AttemptSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.master, self.attempt)
    }
}

/// One SplitMix64 step: advance by the golden gamma, then finalize.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive a sub-seed from a master seed, a system name, and an attempt number.
fn derive_seed(master: u64, system: &str, attempt: u32) -> u64 {
    let state = system
        .bytes()
        .fold(splitmix64(master), |acc, byte| splitmix64(acc ^ u64::from(byte)));
    splitmix64(state ^ u64::from(attempt))
}
