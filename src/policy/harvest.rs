//! How standing grain (and deposited wealth) reaches the turtles
//!
//! Harvest is two-phase: occupancy of every cell is counted first, then each
//! turtle takes an equal integer share of its cell, then every occupied cell is
//! emptied once. Division remainders are lost.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::error::ConfigError;
use crate::core::types::Wealth;
use crate::entity::turtle::Turtle;
use crate::stats::classes::{WealthClass, WealthThresholds};
use crate::world::grid::Grid;

/// Percentage of wealth a rich turtle leaves behind when it spreads
pub const SPREAD_RATE_PERCENT: Wealth = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvestPolicy {
    /// Split standing grain evenly among co-located turtles
    #[default]
    Even,
    /// `Even`, plus rich turtles periodically leave wealth on the patch they
    /// depart, which the next occupants split like grain
    Spreading,
}

impl HarvestPolicy {
    /// Configuration name of this policy
    pub fn name(self) -> &'static str {
        match self {
            HarvestPolicy::Even => "even",
            HarvestPolicy::Spreading => "spreading",
        }
    }
    pub fn harvest(self, grid: &mut Grid, turtles: &mut [Turtle]) {
        let mut occupants = vec![0_u32; grid.patches().len()];
        for turtle in turtles.iter() {
            occupants[grid.index(turtle.position)] += 1;
        }

        for turtle in turtles.iter_mut() {
            let idx = grid.index(turtle.position);
            // the turtle itself is counted, so the divisor is at least 1
            let sharers = occupants[idx];
            let patch = &grid.patches()[idx];
            turtle.wealth += Wealth::from(patch.grain / sharers);
            if self == HarvestPolicy::Spreading {
                turtle.wealth += patch.deposit / Wealth::from(sharers);
            }
        }

        for (patch, &count) in grid.patches_mut().iter_mut().zip(&occupants) {
            if count > 0 {
                patch.clear();
            }
        }
    }

    /// Wealth the turtle in `slot` leaves behind as it departs this tick
    ///
    /// Runs before the turtle moves. The returned amount has already been
    /// taken from the turtle and belongs on the cell it is leaving.
    pub fn prepare_departure(self, slot: usize, turtles: &mut [Turtle]) -> Wealth {
        if self == HarvestPolicy::Even {
            return 0;
        }

        let interval = (turtles[slot].life_expectancy / 2).max(1);
        turtles[slot].spread_counter += 1;
        if turtles[slot].spread_counter < interval {
            return 0;
        }

        // richness is judged against the population as it stands right now
        let Some(thresholds) = WealthThresholds::from_wealths(turtles.iter().map(|t| t.wealth))
        else {
            return 0;
        };
        let turtle = &mut turtles[slot];
        if thresholds.classify(turtle.wealth) != WealthClass::Rich {
            return 0;
        }

        let spread = turtle.wealth * SPREAD_RATE_PERCENT / 100;
        if spread <= 0 {
            return 0;
        }
        turtle.wealth -= spread;
        turtle.spread_counter = 0;
        spread
    }

    /// Per-policy state for a turtle that was just reborn
    ///
    /// Setup leaves the spread counter at 0, while a reborn spreader starts
    /// at `max_life_expectancy / 8`. The asymmetry is kept as-is.
    pub fn on_rebirth(self, turtle: &mut Turtle, config: &WorldConfig) {
        if self == HarvestPolicy::Spreading {
            turtle.spread_counter = config.max_life_expectancy / 8;
        }
    }
}

impl fmt::Display for HarvestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarvestPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "even" => Ok(HarvestPolicy::Even),
            "spreading" => Ok(HarvestPolicy::Spreading),
            _ => Err(ConfigError::UnknownPolicy {
                kind: "harvest",
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;
    use crate::world::patch::Patch;

    fn turtle_at(x: u32, y: u32, wealth: Wealth) -> Turtle {
        Turtle::new(Position::new(x, y), 1, 1, 10, wealth, 0)
    }

    #[test]
    fn test_even_split_loses_remainder() {
        let mut grid = Grid::new(4, 4);
        *grid.patch_mut(Position::new(1, 1)) = Patch::new(10, 20);
        *grid.patch_mut(Position::new(2, 2)) = Patch::new(7, 20);
        let mut turtles = vec![
            turtle_at(1, 1, 0),
            turtle_at(2, 2, 0),
            turtle_at(1, 1, 0),
            turtle_at(1, 1, 5),
        ];

        HarvestPolicy::Even.harvest(&mut grid, &mut turtles);

        assert_eq!(turtles[0].wealth, 3);
        assert_eq!(turtles[1].wealth, 7);
        assert_eq!(turtles[2].wealth, 3);
        assert_eq!(turtles[3].wealth, 8);
        assert_eq!(grid.grain_at(Position::new(1, 1)), 0);
        assert_eq!(grid.grain_at(Position::new(2, 2)), 0);
        assert_eq!(grid.patch(Position::new(1, 1)).capacity, 20);
    }

    #[test]
    fn test_unoccupied_cells_untouched() {
        let mut grid = Grid::new(3, 3);
        *grid.patch_mut(Position::new(0, 0)) = Patch::new(9, 9);
        let mut turtles = vec![turtle_at(2, 2, 0)];
        HarvestPolicy::Even.harvest(&mut grid, &mut turtles);
        assert_eq!(grid.grain_at(Position::new(0, 0)), 9);
    }

    #[test]
    fn test_spreading_shares_deposit() {
        let mut grid = Grid::new(3, 3);
        let mut patch = Patch::new(4, 10);
        patch.add_deposit(9);
        *grid.patch_mut(Position::new(1, 1)) = patch;
        let mut turtles = vec![turtle_at(1, 1, 0), turtle_at(1, 1, 0)];

        HarvestPolicy::Spreading.harvest(&mut grid, &mut turtles);

        assert_eq!(turtles[0].wealth, 2 + 4);
        assert_eq!(turtles[1].wealth, 2 + 4);
        assert_eq!(grid.patch(Position::new(1, 1)).deposit, 0);
    }

    #[test]
    fn test_even_ignores_deposit() {
        let mut grid = Grid::new(2, 2);
        grid.patch_mut(Position::new(0, 0)).add_deposit(9);
        let mut turtles = vec![turtle_at(0, 0, 0)];
        HarvestPolicy::Even.harvest(&mut grid, &mut turtles);
        assert_eq!(turtles[0].wealth, 0);
    }

    #[test]
    fn test_departure_waits_for_counter() {
        let mut turtles = vec![turtle_at(0, 0, 100), turtle_at(1, 1, 10)];
        turtles[0].life_expectancy = 6;

        assert_eq!(HarvestPolicy::Spreading.prepare_departure(0, &mut turtles), 0);
        assert_eq!(HarvestPolicy::Spreading.prepare_departure(0, &mut turtles), 0);
        assert_eq!(HarvestPolicy::Spreading.prepare_departure(0, &mut turtles), 20);
        assert_eq!(turtles[0].wealth, 80);
        assert_eq!(turtles[0].spread_counter, 0);
    }

    #[test]
    fn test_departure_only_for_rich() {
        let mut turtles = vec![turtle_at(0, 0, 50), turtle_at(1, 1, 100)];
        turtles[0].life_expectancy = 1;
        assert_eq!(HarvestPolicy::Spreading.prepare_departure(0, &mut turtles), 0);
        assert_eq!(turtles[0].wealth, 50);
        // counter keeps running until the turtle is rich
        assert_eq!(turtles[0].spread_counter, 1);
    }

    #[test]
    fn test_even_never_departs_with_wealth() {
        let mut turtles = vec![turtle_at(0, 0, 100)];
        assert_eq!(HarvestPolicy::Even.prepare_departure(0, &mut turtles), 0);
        assert_eq!(turtles[0].spread_counter, 0);
    }

    #[test]
    fn test_on_rebirth_sets_counter() {
        let config = WorldConfig {
            max_life_expectancy: 83,
            ..WorldConfig::default()
        };
        let mut turtle = turtle_at(0, 0, 1);
        HarvestPolicy::Spreading.on_rebirth(&mut turtle, &config);
        assert_eq!(turtle.spread_counter, 10);

        let mut turtle = turtle_at(0, 0, 1);
        HarvestPolicy::Even.on_rebirth(&mut turtle, &config);
        assert_eq!(turtle.spread_counter, 0);
    }
}
