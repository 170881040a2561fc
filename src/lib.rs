//! Wealthscape - agent-based wealth distribution on a grain torus
//!
//! Turtles wander a toroidal grid of renewable grain, harvest what they find,
//! pay metabolism, age, die and are reborn in place. Pluggable policies change
//! how wealth is inherited, harvested and redistributed; the statistics module
//! measures the resulting inequality.

pub mod core;
pub mod entity;
pub mod policy;
pub mod simulation;
pub mod stats;
pub mod world;

pub use crate::core::{Result, RunConfig, SimError, WorldConfig};
pub use crate::policy::Policies;
pub use crate::simulation::World;
pub use crate::stats::Snapshot;
