//! Read-only statistics computed from world state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{Tick, Wealth};
use crate::entity::turtle::Turtle;
use crate::stats::classes::ClassCounts;
use crate::stats::gini::gini;
use crate::world::grid::Grid;

/// Aggregate statistics at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks completed so far
    pub tick: Tick,
    pub population: usize,
    pub min_wealth: Wealth,
    pub max_wealth: Wealth,
    pub mean_wealth: f64,
    pub gini: f64,
    pub classes: ClassCounts,
    /// Grain standing on the whole grid
    pub total_grain: u64,
    /// Wealth deposited on patches and not yet harvested
    pub total_deposits: Wealth,
}

impl Snapshot {
    pub fn capture(tick: Tick, turtles: &[Turtle], grid: &Grid) -> Self {
        let wealths: Vec<Wealth> = turtles.iter().map(|t| t.wealth).collect();
        let population = wealths.len();
        let min_wealth = wealths.iter().copied().min().unwrap_or(0);
        let max_wealth = wealths.iter().copied().max().unwrap_or(0);
        let mean_wealth = if population == 0 {
            0.0
        } else {
            wealths.iter().sum::<Wealth>() as f64 / population as f64
        };

        Self {
            tick,
            population,
            min_wealth,
            max_wealth,
            mean_wealth,
            gini: gini(&wealths),
            classes: ClassCounts::tally(&wealths),
            total_grain: grid.total_grain(),
            total_deposits: grid.total_deposits(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "tick {}: {} turtles, wealth min {} / mean {:.2} / max {}, gini {:.4}, classes {}/{}/{}",
            self.tick,
            self.population,
            self.min_wealth,
            self.mean_wealth,
            self.max_wealth,
            self.gini,
            self.classes.poor,
            self.classes.middle,
            self.classes.rich,
        )
    }
}

/// Wealth statistics for all turtles sharing one vision level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionBand {
    pub vision: u32,
    pub count: usize,
    pub mean_wealth: f64,
    pub min_wealth: Wealth,
    pub max_wealth: Wealth,
}

/// Per-vision breakdown, ascending by vision; empty levels are omitted
pub fn vision_breakdown(turtles: &[Turtle]) -> Vec<VisionBand> {
    let mut groups: BTreeMap<u32, Vec<Wealth>> = BTreeMap::new();
    for turtle in turtles {
        groups.entry(turtle.vision).or_default().push(turtle.wealth);
    }

    groups
        .into_iter()
        .map(|(vision, wealths)| VisionBand {
            vision,
            count: wealths.len(),
            mean_wealth: wealths.iter().sum::<Wealth>() as f64 / wealths.len() as f64,
            min_wealth: wealths.iter().copied().min().unwrap_or(0),
            max_wealth: wealths.iter().copied().max().unwrap_or(0),
        })
        .collect()
}

/// Pearson correlation between vision and wealth, 0.0 when undefined
pub fn vision_wealth_correlation(turtles: &[Turtle]) -> f64 {
    if turtles.is_empty() {
        return 0.0;
    }
    let n = turtles.len() as f64;
    let vision_mean = turtles.iter().map(|t| f64::from(t.vision)).sum::<f64>() / n;
    let wealth_mean = turtles.iter().map(|t| t.wealth as f64).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut vision_var = 0.0;
    let mut wealth_var = 0.0;
    for turtle in turtles {
        let dv = f64::from(turtle.vision) - vision_mean;
        let dw = turtle.wealth as f64 - wealth_mean;
        covariance += dv * dw;
        vision_var += dv * dv;
        wealth_var += dw * dw;
    }

    let denominator = (vision_var * wealth_var).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        covariance / denominator
    }
}
