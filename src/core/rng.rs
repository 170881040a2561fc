//! Deterministic random stream owned by a single world
//!
//! Every stochastic decision in a run draws from one `SimRng`, in this order:
//!
//! 1. Grid setup: one `next_f64` per cell, columns outer (`x`), rows inner (`y`).
//! 2. Agent setup, per slot: metabolism, vision, life expectancy, x, y,
//!    wealth bonus, age.
//! 3. Each tick, only in the move/consume/age phase: a dead agent's rebirth
//!    draws, in slot order. The draws depend on the rebirth policy.
//!
//! No other phase touches the stream, so two worlds built from the same
//! configuration, policies and seed follow bit-identical trajectories.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded random source threaded through setup and rebirth
#[derive(Debug, Clone)]
pub struct SimRng(ChaCha8Rng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform integer in `[0, bound)`; a zero bound yields 0 without drawing
    pub fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.0.gen_range(0..bound)
    }

    /// Uniform integer in `[low, high]`
    pub fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        self.0.gen_range(low..=high)
    }

    /// Uniform float in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}
