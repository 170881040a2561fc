//! Economic rules that plug into fixed points of the tick
//!
//! Each hook is a plain enum chosen at configuration time. The tick code path
//! is the same for every variant; it asks the active policies what to do.

pub mod harvest;
pub mod rebirth;
pub mod redistribution;

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::error::ConfigError;

pub use harvest::{HarvestPolicy, SPREAD_RATE_PERCENT};
pub use rebirth::RebirthPolicy;
pub use redistribution::{redistribute, RedistributionPolicy, TaxReport, TAX_RATE_PERCENT};

/// The full set of hooks a world runs with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policies {
    pub rebirth: RebirthPolicy,
    pub harvest: HarvestPolicy,
    pub redistribution: RedistributionPolicy,
}

impl Policies {
    pub fn validate(&self, config: &WorldConfig) -> Result<(), ConfigError> {
        self.redistribution.validate(config)
    }

    /// The four models compared by default
    ///
    /// Tax and spreading run with wealth-retaining rebirth.
    pub fn standard_variants() -> Vec<(&'static str, Policies)> {
        vec![
            ("baseline", Policies::default()),
            (
                "inheritance",
                Policies {
                    rebirth: RebirthPolicy::Inheritance,
                    ..Policies::default()
                },
            ),
            (
                "tax",
                Policies {
                    rebirth: RebirthPolicy::RetainWealth,
                    redistribution: RedistributionPolicy::Tax,
                    ..Policies::default()
                },
            ),
            (
                "spreading",
                Policies {
                    rebirth: RebirthPolicy::RetainWealth,
                    harvest: HarvestPolicy::Spreading,
                    ..Policies::default()
                },
            ),
        ]
    }
}
