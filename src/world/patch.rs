//! A single land cell

use serde::{Deserialize, Serialize};

use crate::core::types::Wealth;

/// Grain-bearing cell
///
/// `grain <= capacity` holds at all times outside grid setup, where diffusion
/// temporarily lets grain spill onto cells that have no capacity yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    /// Grain currently standing on the cell
    pub grain: u32,
    /// Most grain the cell can hold; fixed once setup finishes
    pub capacity: u32,
    /// Wealth left behind by departing rich agents, harvested like grain
    pub deposit: Wealth,
}

impl Patch {
    pub fn new(grain: u32, capacity: u32) -> Self {
        Self {
            grain,
            capacity,
            deposit: 0,
        }
    }

    /// Barren land never grows
    pub fn is_barren(&self) -> bool {
        self.capacity == 0
    }

    /// Add `amount` grain, never exceeding capacity
    pub fn grow(&mut self, amount: u32) {
        if self.is_barren() {
            return;
        }
        self.grain = self.grain.saturating_add(amount).min(self.capacity);
    }

    pub fn add_deposit(&mut self, amount: Wealth) {
        self.deposit += amount;
    }

    /// Empty the cell after it has been harvested
    pub fn clear(&mut self) {
        self.grain = 0;
        self.deposit = 0;
    }
}
