//! What a dead turtle comes back with

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::error::ConfigError;
use crate::core::rng::SimRng;
use crate::core::types::Wealth;
use crate::entity::turtle::{DeathCause, Turtle, STARTING_WEALTH_SPREAD};

/// Exclusive bound of the small random top-up used by the inheriting variants
pub const SUBSIDY_SPREAD: u32 = 3;

/// Lowest share of an estate passed on after a natural death
pub const MIN_INHERITANCE_SHARE: f64 = 0.7;

/// Width of the random band above `MIN_INHERITANCE_SHARE`
pub const INHERITANCE_SHARE_SPREAD: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebirthPolicy {
    /// Brand new turtle, same draws as setup
    #[default]
    Fresh,
    /// Heir keeps 70-90% of an estate left by old age; the bankrupt leave a
    /// flat subsidy
    Inheritance,
    /// Heir keeps the prior wealth, topped up to metabolism plus a small bonus
    RetainWealth,
}

impl RebirthPolicy {
    /// Configuration name of this policy
    pub fn name(self) -> &'static str {
        match self {
            RebirthPolicy::Fresh => "fresh",
            RebirthPolicy::Inheritance => "inheritance",
            RebirthPolicy::RetainWealth => "retain_wealth",
        }
    }
    /// Reset `turtle` in place after it died of `cause`
    ///
    /// `Inheritance` draws its estate share before the attribute draws; the
    /// other variants draw only through `Turtle::reincarnate`.
    pub fn reincarnate(
        self,
        turtle: &mut Turtle,
        cause: DeathCause,
        config: &WorldConfig,
        rng: &mut SimRng,
    ) {
        match self {
            RebirthPolicy::Fresh => {
                turtle.reincarnate(config, rng, |metabolism, rng| {
                    Wealth::from(metabolism) + Wealth::from(rng.next_int(STARTING_WEALTH_SPREAD))
                });
            }
            RebirthPolicy::Inheritance => {
                let estate = inherited_wealth(turtle, cause, rng);
                turtle.reincarnate(config, rng, |_, _| estate);
            }
            RebirthPolicy::RetainWealth => {
                let prior = turtle.wealth;
                turtle.reincarnate(config, rng, |metabolism, rng| {
                    let floor =
                        Wealth::from(metabolism) + Wealth::from(rng.next_int(SUBSIDY_SPREAD));
                    if prior <= 0 {
                        floor
                    } else {
                        floor.max(prior)
                    }
                });
            }
        }
    }
}

/// Estate passed to the heir, judged on the deceased's own attributes
fn inherited_wealth(deceased: &Turtle, cause: DeathCause, rng: &mut SimRng) -> Wealth {
    let metabolism = Wealth::from(deceased.metabolism);
    match cause {
        DeathCause::Bankrupt => metabolism + Wealth::from(rng.next_int(SUBSIDY_SPREAD)),
        DeathCause::OldAge => {
            let share = MIN_INHERITANCE_SHARE + rng.next_f64() * INHERITANCE_SHARE_SPREAD;
            let kept = (deceased.wealth as f64 * share).floor() as Wealth;
            kept.max(metabolism + 1)
        }
    }
}

impl fmt::Display for RebirthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RebirthPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fresh" => Ok(RebirthPolicy::Fresh),
            "inheritance" => Ok(RebirthPolicy::Inheritance),
            "retain_wealth" => Ok(RebirthPolicy::RetainWealth),
            _ => Err(ConfigError::UnknownPolicy {
                kind: "rebirth",
                name: s.to_string(),
            }),
        }
    }
}
