//! Three-way wealth classes
//!
//! Class boundaries are thirds of the current maximum wealth, not quantiles
//! of the distribution: poor is `w <= max / 3`, middle is `w <= 2 * max / 3`,
//! rich is everything above. Both divisions truncate.

use serde::{Deserialize, Serialize};

use crate::core::types::Wealth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WealthClass {
    Poor,
    Middle,
    Rich,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WealthThresholds {
    /// Highest wealth still counted as poor
    pub poor: Wealth,
    /// Highest wealth still counted as middle class
    pub rich: Wealth,
}

impl WealthThresholds {
    pub fn from_max(max: Wealth) -> Self {
        Self {
            poor: max / 3,
            rich: max * 2 / 3,
        }
    }

    /// Thresholds for the given population, `None` when it is empty
    pub fn from_wealths<I>(wealths: I) -> Option<Self>
    where
        I: IntoIterator<Item = Wealth>,
    {
        wealths.into_iter().max().map(Self::from_max)
    }

    pub fn classify(&self, wealth: Wealth) -> WealthClass {
        if wealth <= self.poor {
            WealthClass::Poor
        } else if wealth <= self.rich {
            WealthClass::Middle
        } else {
            WealthClass::Rich
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub poor: usize,
    pub middle: usize,
    pub rich: usize,
}

impl ClassCounts {
    pub fn tally(wealths: &[Wealth]) -> Self {
        let mut counts = Self::default();
        let Some(thresholds) = WealthThresholds::from_wealths(wealths.iter().copied()) else {
            return counts;
        };
        for &wealth in wealths {
            match thresholds.classify(wealth) {
                WealthClass::Poor => counts.poor += 1,
                WealthClass::Middle => counts.middle += 1,
                WealthClass::Rich => counts.rich += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.poor + self.middle + self.rich
    }
}
