use thiserror::Error;

/// Rejected world or policy configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("min_life_expectancy ({min}) exceeds max_life_expectancy ({max})")]
    InvertedLifeExpectancy { min: u32, max: u32 },

    #[error("percent_best_land must be within 0..=100, got {0}")]
    PercentOutOfRange(u32),

    #[error("{field} is {value}, above the supported limit of {limit}")]
    AboveLimit {
        field: &'static str,
        value: u32,
        limit: u32,
    },

    #[error("supplied state does not match the configuration: {0}")]
    InconsistentState(&'static str),

    #[error("unknown {kind} policy '{name}'")]
    UnknownPolicy { kind: &'static str, name: String },

    #[error("tax redistribution needs max_life_expectancy >= 2 for a non-zero interval, got {0}")]
    TaxIntervalZero(u32),
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Config encoding error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Row does not match the {expected} CSV layout")]
    LayoutMismatch { expected: &'static str },
}

pub type Result<T> = std::result::Result<T, SimError>;
