//! Land: patches of renewable grain on a torus

pub mod grid;
pub mod patch;

pub use grid::{Grid, DIFFUSION_RATE, MAX_GRAIN};
pub use patch::Patch;
