//! Mobile agents that search, harvest, consume, age and die
//!
//! A turtle never holds a reference to the world. Each operation receives the
//! read-only grid or configuration it needs and mutates only its own slot.

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::rng::SimRng;
use crate::core::types::{Direction, Position, Wealth};
use crate::world::grid::Grid;

/// Exclusive upper bound of the random wealth bonus at setup
pub const STARTING_WEALTH_SPREAD: u32 = 50;

/// Why a turtle's life ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Wealth went negative after paying metabolism
    Bankrupt,
    /// Age reached life expectancy
    OldAge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turtle {
    pub position: Position,
    /// Direction chosen in the current tick's decide phase
    pub heading: Direction,
    pub age: u32,
    pub wealth: Wealth,
    /// Grain burned per tick
    pub metabolism: u32,
    /// How many cells ahead the turtle can see
    pub vision: u32,
    pub life_expectancy: u32,
    /// Ticks since this turtle last left wealth behind
    pub spread_counter: u32,
}

impl Turtle {
    pub fn new(
        position: Position,
        metabolism: u32,
        vision: u32,
        life_expectancy: u32,
        wealth: Wealth,
        age: u32,
    ) -> Self {
        Self {
            position,
            heading: Direction::default(),
            age,
            wealth,
            metabolism,
            vision,
            life_expectancy,
            spread_counter: 0,
        }
    }

    /// Create a turtle mid-life with fresh random attributes
    pub fn spawn(config: &WorldConfig, rng: &mut SimRng) -> Self {
        let mut turtle = Self::new(Position::default(), 1, 1, 1, 0, 0);
        turtle.reincarnate(config, rng, |metabolism, rng| {
            Wealth::from(metabolism) + Wealth::from(rng.next_int(STARTING_WEALTH_SPREAD))
        });
        turtle
    }

    /// Re-draw every attribute in place
    ///
    /// Draw order: metabolism, vision, life expectancy, x, y, then whatever
    /// `endow` draws to produce the new wealth, then age in
    /// `[0, life_expectancy)`. `endow` receives the new metabolism.
    pub fn reincarnate<F>(&mut self, config: &WorldConfig, rng: &mut SimRng, endow: F)
    where
        F: FnOnce(u32, &mut SimRng) -> Wealth,
    {
        self.metabolism = 1 + rng.next_int(config.max_metabolism);
        self.vision = 1 + rng.next_int(config.max_vision);
        self.life_expectancy =
            rng.next_in_range(config.min_life_expectancy, config.max_life_expectancy);
        let x = rng.next_int(config.width);
        let y = rng.next_int(config.height);
        self.position = Position::new(x, y);
        self.wealth = endow(self.metabolism, rng);
        self.age = rng.next_int(self.life_expectancy);
        self.spread_counter = 0;
    }

    /// Total grain visible from distance 1 to `vision` along `direction`
    pub fn grain_ahead(&self, grid: &Grid, direction: Direction) -> u64 {
        (1..=self.vision)
            .map(|distance| {
                let pos = self
                    .position
                    .ahead(direction, distance, grid.width(), grid.height());
                u64::from(grid.grain_at(pos))
            })
            .sum()
    }

    /// Face the direction with strictly the most grain ahead
    ///
    /// Ties keep the earlier direction in `Direction::ALL`.
    pub fn decide_direction(&mut self, grid: &Grid) {
        let mut best = Direction::ALL[0];
        let mut best_amount = self.grain_ahead(grid, best);

        for direction in Direction::ALL.into_iter().skip(1) {
            let amount = self.grain_ahead(grid, direction);
            if amount > best_amount {
                best = direction;
                best_amount = amount;
            }
        }

        self.heading = best;
    }

    /// Step exactly one cell along the current heading
    pub fn advance(&mut self, width: u32, height: u32) {
        self.position = self.position.ahead(self.heading, 1, width, height);
    }

    /// Pay metabolism and grow one tick older
    pub fn consume_and_age(&mut self) {
        self.wealth -= Wealth::from(self.metabolism);
        self.age += 1;
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        if self.wealth < 0 {
            Some(DeathCause::Bankrupt)
        } else if self.age >= self.life_expectancy {
            Some(DeathCause::OldAge)
        } else {
            None
        }
    }
}
