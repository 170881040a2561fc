//! World and run configuration
//!
//! `WorldConfig` is immutable once a world is initialized. `RunConfig` wraps it
//! with the driver-level settings (seed, tick count, reporting cadence) and can
//! be read from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Result};
use crate::policy::Policies;

/// Largest supported grid side
pub const MAX_GRID_SIDE: u32 = 4096;
/// Largest supported population
pub const MAX_POPULATION: u32 = 1_000_000;
/// Upper bound for vision, metabolism, life expectancy and growth amount
///
/// Keeps every per-agent quantity well inside `i64` wealth arithmetic.
pub const MAX_ATTRIBUTE: u32 = 1_000_000;

/// Parameters of a single world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    /// Number of agents; constant for the lifetime of the world
    pub population: u32,
    pub max_vision: u32,
    pub max_metabolism: u32,
    pub min_life_expectancy: u32,
    pub max_life_expectancy: u32,
    /// Chance (in percent) that a cell starts as best land
    pub percent_best_land: u32,
    /// Ticks between grain growth events
    pub growth_interval: u32,
    /// Grain added to each productive cell per growth event
    pub growth_amount: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            population: 250,
            max_vision: 5,
            max_metabolism: 15,
            min_life_expectancy: 1,
            max_life_expectancy: 83,
            percent_best_land: 10,
            growth_interval: 1,
            growth_amount: 4,
        }
    }
}

impl WorldConfig {
    /// Check every field before any state is built
    ///
    /// Every field must be positive except `percent_best_land`, which only has
    /// to lie in `0..=100`. Zero percent is accepted and yields a barren world.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("population", self.population),
            ("max_vision", self.max_vision),
            ("max_metabolism", self.max_metabolism),
            ("min_life_expectancy", self.min_life_expectancy),
            ("max_life_expectancy", self.max_life_expectancy),
            ("growth_interval", self.growth_interval),
            ("growth_amount", self.growth_amount),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::NotPositive { field });
            }
        }

        let limits = [
            ("width", self.width, MAX_GRID_SIDE),
            ("height", self.height, MAX_GRID_SIDE),
            ("population", self.population, MAX_POPULATION),
            ("max_vision", self.max_vision, MAX_ATTRIBUTE),
            ("max_metabolism", self.max_metabolism, MAX_ATTRIBUTE),
            ("max_life_expectancy", self.max_life_expectancy, MAX_ATTRIBUTE),
            ("growth_amount", self.growth_amount, MAX_ATTRIBUTE),
        ];
        for (field, value, limit) in limits {
            if value > limit {
                return Err(ConfigError::AboveLimit { field, value, limit });
            }
        }

        if self.min_life_expectancy > self.max_life_expectancy {
            return Err(ConfigError::InvertedLifeExpectancy {
                min: self.min_life_expectancy,
                max: self.max_life_expectancy,
            });
        }

        if self.percent_best_land > 100 {
            return Err(ConfigError::PercentOutOfRange(self.percent_best_land));
        }

        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A named policy combination for side-by-side comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    #[serde(flatten)]
    pub policies: Policies,
}

/// Everything a driver needs to run one or more worlds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub seed: u64,
    pub ticks: u64,
    /// Emit a report every this many ticks (0 disables periodic reports)
    pub report_every: u64,
    pub world: WorldConfig,
    pub policies: Policies,
    /// Variants for `compare`; the standard four when empty
    pub variants: Vec<VariantConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 500,
            report_every: 10,
            world: WorldConfig::default(),
            policies: Policies::default(),
            variants: Vec::new(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(content)?;
        config.world.validate()?;
        config.policies.validate(&config.world)?;
        for variant in &config.variants {
            variant.policies.validate(&config.world)?;
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Variants to compare, falling back to the standard set
    pub fn comparison_variants(&self) -> Vec<VariantConfig> {
        if self.variants.is_empty() {
            Policies::standard_variants()
                .into_iter()
                .map(|(name, policies)| VariantConfig {
                    name: name.to_string(),
                    policies,
                })
                .collect()
        } else {
            self.variants.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{HarvestPolicy, RebirthPolicy, RedistributionPolicy};

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_fields_rejected() {
        let config = WorldConfig {
            growth_interval: 0,
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "growth_interval"
            })
        );

        let config = WorldConfig {
            width: 0,
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "width" })
        );
    }

    #[test]
    fn test_inverted_life_expectancy_rejected() {
        let config = WorldConfig {
            min_life_expectancy: 30,
            max_life_expectancy: 20,
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedLifeExpectancy { min: 30, max: 20 })
        );
    }

    #[test]
    fn test_percent_and_limits() {
        let config = WorldConfig {
            percent_best_land: 101,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PercentOutOfRange(101)));

        let config = WorldConfig {
            width: MAX_GRID_SIDE + 1,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AboveLimit { field: "width", .. })
        ));

        let barren = WorldConfig {
            percent_best_land: 0,
            ..WorldConfig::default()
        };
        assert!(barren.validate().is_ok());
    }

    #[test]
    fn test_run_config_from_toml() {
        let content = r#"
            seed = 7
            ticks = 120

            [world]
            width = 20
            height = 10
            population = 40

            [policies]
            rebirth = "inheritance"
            redistribution = "tax"

            [[variants]]
            name = "spread"
            harvest = "spreading"
        "#;
        let config = RunConfig::from_toml_str(content).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.ticks, 120);
        assert_eq!(config.report_every, 10);
        assert_eq!(config.world.width, 20);
        assert_eq!(config.world.max_vision, 5);
        assert_eq!(config.policies.rebirth, RebirthPolicy::Inheritance);
        assert_eq!(config.policies.harvest, HarvestPolicy::Even);
        assert_eq!(config.policies.redistribution, RedistributionPolicy::Tax);
        assert_eq!(config.variants.len(), 1);
        assert_eq!(config.variants[0].policies.harvest, HarvestPolicy::Spreading);
        assert_eq!(config.variants[0].policies.rebirth, RebirthPolicy::Fresh);
    }

    #[test]
    fn test_run_config_rejects_invalid_world() {
        let content = r#"
            [world]
            min_life_expectancy = 90
            max_life_expectancy = 10
        "#;
        assert!(RunConfig::from_toml_str(content).is_err());
    }

    #[test]
    fn test_standard_variants_when_none_configured() {
        let config = RunConfig::default();
        let names: Vec<String> = config
            .comparison_variants()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["baseline", "inheritance", "tax", "spreading"]);
    }
}
