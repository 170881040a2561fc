//! World - the engine state container

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::error::{ConfigError, Result};
use crate::core::rng::SimRng;
use crate::core::types::{Tick, Wealth};
use crate::entity::turtle::{DeathCause, Turtle};
use crate::policy::{Policies, TaxReport};
use crate::simulation::tick::run_tick;
use crate::stats::snapshot::{self, Snapshot, VisionBand};
use crate::world::grid::Grid;

/// What happened during the most recent tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Index of the tick this outcome describes
    pub tick: Tick,
    pub bankruptcies: usize,
    pub old_age_deaths: usize,
    pub grain_grew: bool,
    /// Wealth left on patches by departing spreaders
    pub deposited: Wealth,
    pub tax: Option<TaxReport>,
}

impl TickOutcome {
    pub fn record_death(&mut self, cause: DeathCause) {
        match cause {
            DeathCause::Bankrupt => self.bankruptcies += 1,
            DeathCause::OldAge => self.old_age_deaths += 1,
        }
    }

    pub fn deaths(&self) -> usize {
        self.bankruptcies + self.old_age_deaths
    }
}

/// A single simulated world
///
/// Owns its grid, its turtles and its random stream, so any number of worlds
/// can run side by side in one process. A `World` only exists once setup has
/// run, which makes stepping an uninitialized world impossible.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) config: WorldConfig,
    pub(crate) policies: Policies,
    pub(crate) grid: Grid,
    pub(crate) turtles: Vec<Turtle>,
    /// Ticks completed; never reset
    pub(crate) tick: Tick,
    pub(crate) rng: SimRng,
    pub(crate) last_outcome: TickOutcome,
}

impl World {
    /// Validate the configuration, then build the grid and the population
    pub fn initialize(config: WorldConfig, policies: Policies, seed: u64) -> Result<Self> {
        config.validate()?;
        policies.validate(&config)?;

        let mut rng = SimRng::new(seed);
        let grid = Grid::generate(&config, &mut rng);
        let turtles = (0..config.population)
            .map(|_| Turtle::spawn(&config, &mut rng))
            .collect();

        let world = Self::assemble(config, policies, grid, turtles, rng);
        tracing::info!(
            width = world.config.width,
            height = world.config.height,
            population = world.turtles.len(),
            seed,
            total_grain = world.grid.total_grain(),
            "World initialized"
        );
        Ok(world)
    }

    /// Build a world around a hand-made grid and population
    ///
    /// `seed` drives only later rebirths. The grid must match the configured
    /// dimensions, the population size must match, and every turtle must
    /// stand on the grid.
    pub fn from_parts(
        config: WorldConfig,
        policies: Policies,
        grid: Grid,
        turtles: Vec<Turtle>,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        policies.validate(&config)?;

        if grid.width() != config.width || grid.height() != config.height {
            return Err(ConfigError::InconsistentState("grid dimensions").into());
        }
        if turtles.len() != config.population as usize {
            return Err(ConfigError::InconsistentState("population size").into());
        }
        if turtles
            .iter()
            .any(|t| t.position.x >= config.width || t.position.y >= config.height)
        {
            return Err(ConfigError::InconsistentState("turtle off the grid").into());
        }

        Ok(Self::assemble(config, policies, grid, turtles, SimRng::new(seed)))
    }

    fn assemble(
        config: WorldConfig,
        policies: Policies,
        grid: Grid,
        turtles: Vec<Turtle>,
        rng: SimRng,
    ) -> Self {
        Self {
            config,
            policies,
            grid,
            turtles,
            tick: 0,
            rng,
            last_outcome: TickOutcome::default(),
        }
    }

    /// Advance exactly one tick
    pub fn step(&mut self) {
        self.last_outcome = run_tick(self);
    }

    /// Advance `ticks` ticks
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Fresh statistics for the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.tick, &self.turtles, &self.grid)
    }

    pub fn wealths(&self) -> Vec<Wealth> {
        self.turtles.iter().map(|t| t.wealth).collect()
    }

    pub fn vision_breakdown(&self) -> Vec<VisionBand> {
        snapshot::vision_breakdown(&self.turtles)
    }

    pub fn vision_wealth_correlation(&self) -> f64 {
        snapshot::vision_wealth_correlation(&self.turtles)
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn policies(&self) -> Policies {
        self.policies
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turtles(&self) -> &[Turtle] {
        &self.turtles
    }

    pub fn last_outcome(&self) -> &TickOutcome {
        &self.last_outcome
    }
}
