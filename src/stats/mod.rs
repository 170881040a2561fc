//! Inequality metrics and statistics snapshots

pub mod classes;
pub mod gini;
pub mod snapshot;

pub use classes::{ClassCounts, WealthClass, WealthThresholds};
pub use gini::gini;
pub use snapshot::{vision_breakdown, vision_wealth_correlation, Snapshot, VisionBand};
