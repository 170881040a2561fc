pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{RunConfig, VariantConfig, WorldConfig};
pub use error::{ConfigError, Result, SimError};
pub use rng::SimRng;
pub use types::{Direction, Position, Tick, Wealth};
