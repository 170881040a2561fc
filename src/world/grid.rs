//! Toroidal grain landscape
//!
//! Setup seeds sparse best-land peaks and smooths them with repeated diffusion
//! so grain radiates outward instead of forming blocky islands. At runtime the
//! grid only grows grain back and hands it to harvesters.

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::rng::SimRng;
use crate::core::types::{Position, Wealth};
use crate::world::patch::Patch;

/// Grain on a best-land cell before smoothing
pub const MAX_GRAIN: u32 = 50;

/// Fraction of a cell's grain shared with its four neighbours per pass
pub const DIFFUSION_RATE: f64 = 0.25;

/// Passes that reset best land to full before diffusing
const SEEDING_PASSES: usize = 5;

/// Extra diffusion passes without reset
const SMOOTHING_PASSES: usize = 10;

/// Neighbour offsets in diffusion order
const NEIGHBOURS: [(i64, i64); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    /// Row-major: index = y * width + x
    patches: Vec<Patch>,
}

impl Grid {
    /// Empty grid with no grain and no capacity anywhere
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            patches: vec![Patch::default(); width as usize * height as usize],
        }
    }

    /// Build the starting landscape
    ///
    /// Draws one float per cell (columns outer, rows inner). After smoothing,
    /// each cell's capacity becomes the grain that ended up on it.
    pub fn generate(config: &WorldConfig, rng: &mut SimRng) -> Self {
        let mut grid = Self::new(config.width, config.height);
        let threshold = f64::from(config.percent_best_land);

        for x in 0..grid.width {
            for y in 0..grid.height {
                if rng.next_f64() * 100.0 < threshold {
                    *grid.patch_mut(Position::new(x, y)) = Patch::new(MAX_GRAIN, MAX_GRAIN);
                }
            }
        }

        for _ in 0..SEEDING_PASSES {
            for patch in grid.patches.iter_mut().filter(|p| !p.is_barren()) {
                patch.grain = patch.capacity;
            }
            grid.diffuse(DIFFUSION_RATE);
        }

        for _ in 0..SMOOTHING_PASSES {
            grid.diffuse(DIFFUSION_RATE);
        }

        for patch in &mut grid.patches {
            patch.capacity = patch.grain;
        }

        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn patches_mut(&mut self) -> &mut [Patch] {
        &mut self.patches
    }

    pub fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    pub fn patch(&self, pos: Position) -> &Patch {
        &self.patches[self.index(pos)]
    }

    pub fn patch_mut(&mut self, pos: Position) -> &mut Patch {
        let idx = self.index(pos);
        &mut self.patches[idx]
    }

    pub fn grain_at(&self, pos: Position) -> u32 {
        self.patch(pos).grain
    }

    /// One diffusion pass
    ///
    /// Each cell keeps `1 - rate` of its grain and gives `rate / 4` to each
    /// orthogonal neighbour. The pass reads the old grid and writes a fresh
    /// buffer, then truncates back to whole grain.
    pub fn diffuse(&mut self, rate: f64) {
        let mut next = vec![0.0_f64; self.patches.len()];

        for x in 0..self.width {
            for y in 0..self.height {
                let pos = Position::new(x, y);
                let current = f64::from(self.grain_at(pos));
                let share = current * rate / 4.0;
                next[self.index(pos)] += current * (1.0 - rate);

                for (dx, dy) in NEIGHBOURS {
                    let neighbour = Position::wrapped(
                        i64::from(x) + dx,
                        i64::from(y) + dy,
                        self.width,
                        self.height,
                    );
                    next[self.index(neighbour)] += share;
                }
            }
        }

        for (patch, amount) in self.patches.iter_mut().zip(next) {
            // amounts are non-negative and bounded by the grid total
            patch.grain = amount as u32;
        }
    }

    /// Grow every cell by `amount`, respecting capacity
    pub fn grow_all(&mut self, amount: u32) {
        for patch in &mut self.patches {
            patch.grow(amount);
        }
    }

    pub fn total_grain(&self) -> u64 {
        self.patches.iter().map(|p| u64::from(p.grain)).sum()
    }

    pub fn total_deposits(&self) -> Wealth {
        self.patches.iter().map(|p| p.deposit).sum()
    }
}
