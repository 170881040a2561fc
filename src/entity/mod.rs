pub mod turtle;

pub use turtle::{DeathCause, Turtle, STARTING_WEALTH_SPREAD};
