//! Periodic tax on the rich, paid out to the poor

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::error::ConfigError;
use crate::core::types::{Tick, Wealth};
use crate::stats::classes::{WealthClass, WealthThresholds};

/// Share of a rich turtle's wealth collected per redistribution
pub const TAX_RATE_PERCENT: Wealth = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedistributionPolicy {
    #[default]
    Disabled,
    /// Every `max_life_expectancy / 2` ticks, tax the rich class and share
    /// the pool among the poor class
    Tax,
}

impl RedistributionPolicy {
    /// Configuration name of this policy
    pub fn name(self) -> &'static str {
        match self {
            RedistributionPolicy::Disabled => "disabled",
            RedistributionPolicy::Tax => "tax",
        }
    }
    /// Ticks between redistributions, `None` when disabled
    pub fn interval(self, config: &WorldConfig) -> Option<Tick> {
        match self {
            RedistributionPolicy::Disabled => None,
            RedistributionPolicy::Tax => Some(Tick::from(config.max_life_expectancy / 2)),
        }
    }

    pub fn validate(self, config: &WorldConfig) -> Result<(), ConfigError> {
        if self.interval(config) == Some(0) {
            return Err(ConfigError::TaxIntervalZero(config.max_life_expectancy));
        }
        Ok(())
    }

    /// Whether the tick being completed triggers a redistribution
    ///
    /// Tick 0 never does.
    pub fn is_due(self, config: &WorldConfig, tick: Tick) -> bool {
        match self.interval(config) {
            Some(interval) if interval > 0 => tick > 0 && tick % interval == 0,
            _ => false,
        }
    }
}

/// Outcome of one redistribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReport {
    /// Total tax collected before the remainder was refunded
    pub collected: Wealth,
    /// Amount each poor turtle received
    pub share: Wealth,
    /// Division remainder handed back to the taxpayers
    pub refunded: Wealth,
    pub taxpayers: usize,
    pub recipients: usize,
}

/// Tax the rich class and split the pool evenly over the poor class
///
/// Classes use the current-max thirds rule. Nothing happens (`None`) when
/// either class is empty. The integer-division remainder goes back to the
/// taxpayers one unit at a time, so total wealth is conserved exactly.
pub fn redistribute(wealths: &mut [Wealth]) -> Option<TaxReport> {
    let thresholds = WealthThresholds::from_wealths(wealths.iter().copied())?;

    let mut rich = Vec::new();
    let mut poor = Vec::new();
    for (i, &wealth) in wealths.iter().enumerate() {
        match thresholds.classify(wealth) {
            WealthClass::Rich => rich.push(i),
            WealthClass::Poor => poor.push(i),
            WealthClass::Middle => {}
        }
    }
    if rich.is_empty() || poor.is_empty() {
        return None;
    }

    let mut collected = 0;
    for &i in &rich {
        let tax = wealths[i] * TAX_RATE_PERCENT / 100;
        wealths[i] -= tax;
        collected += tax;
    }

    let recipients = poor.len() as Wealth;
    let share = collected / recipients;
    for &i in &poor {
        wealths[i] += share;
    }

    let refunded = collected - share * recipients;
    for &i in rich.iter().cycle().take(refunded as usize) {
        wealths[i] += 1;
    }

    Some(TaxReport {
        collected,
        share,
        refunded,
        taxpayers: rich.len(),
        recipients: poor.len(),
    })
}

impl fmt::Display for RedistributionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RedistributionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(RedistributionPolicy::Disabled),
            "tax" => Ok(RedistributionPolicy::Tax),
            _ => Err(ConfigError::UnknownPolicy {
                kind: "redistribution",
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_scenario_conserves_wealth() {
        let mut wealths = vec![10, 10, 10, 90, 90];
        let before: Wealth = wealths.iter().sum();
        let report = redistribute(&mut wealths).unwrap();

        assert_eq!(wealths, vec![22, 22, 22, 72, 72]);
        assert_eq!(wealths.iter().sum::<Wealth>(), before);
        assert_eq!(report.collected, 36);
        assert_eq!(report.share, 12);
        assert_eq!(report.refunded, 0);
        assert_eq!(report.taxpayers, 2);
        assert_eq!(report.recipients, 3);
    }

    #[test]
    fn test_remainder_returns_to_taxpayers() {
        let mut wealths = vec![0, 0, 0, 100, 50];
        let report = redistribute(&mut wealths).unwrap();

        assert_eq!(report.collected, 20);
        assert_eq!(report.share, 6);
        assert_eq!(report.refunded, 2);
        assert_eq!(wealths, vec![6, 6, 6, 82, 50]);
        assert_eq!(wealths.iter().sum::<Wealth>(), 150);
    }

    #[test]
    fn test_skips_without_both_classes() {
        let mut uniform = vec![40, 40, 40];
        assert!(redistribute(&mut uniform).is_none());
        assert_eq!(uniform, vec![40, 40, 40]);

        // max 90: 40 and 50 are middle class, so nobody is poor
        let mut no_poor = vec![40, 50, 90];
        assert!(redistribute(&mut no_poor).is_none());

        assert!(redistribute(&mut []).is_none());
    }

    #[test]
    fn test_schedule() {
        let config = WorldConfig {
            max_life_expectancy: 83,
            ..WorldConfig::default()
        };
        assert_eq!(RedistributionPolicy::Tax.interval(&config), Some(41));
        assert!(!RedistributionPolicy::Tax.is_due(&config, 0));
        assert!(!RedistributionPolicy::Tax.is_due(&config, 40));
        assert!(RedistributionPolicy::Tax.is_due(&config, 41));
        assert!(RedistributionPolicy::Tax.is_due(&config, 82));
        assert!(!RedistributionPolicy::Disabled.is_due(&config, 41));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = WorldConfig {
            min_life_expectancy: 1,
            max_life_expectancy: 1,
            ..WorldConfig::default()
        };
        assert_eq!(
            RedistributionPolicy::Tax.validate(&config),
            Err(ConfigError::TaxIntervalZero(1))
        );
        assert!(RedistributionPolicy::Disabled.validate(&config).is_ok());
    }
}
