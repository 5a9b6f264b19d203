use crate::checks::ConfigError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How grid intensity readings are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize, Serialize, Display, EnumString, EnumIter)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntensityMode {
    /// Report the provider's low/moderate/high level without a verdict
    Level,

    /// Compare against the country's average carbon intensity
    #[default]
    Average,

    /// Compare against a fixed carbon intensity ceiling
    Limit,
}

impl IntensityMode {
    pub fn parse(mode: &str) -> Result<Self, ConfigError> {
        mode.parse().ok().ok_or_else(|| ConfigError::InvalidMode {
            value: mode.to_string(),
            expected: "'level', 'average' or 'limit'",
        })
    }
}

/// How power breakdown readings are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize, Serialize, Display, EnumString, EnumIter)]
#[value(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PowerMode {
    /// Compare the renewable share against a floor
    #[default]
    Renewable,

    /// Compare the fossil-free share against a floor
    LowCarbon,
}

impl PowerMode {
    pub fn parse(mode: &str) -> Result<Self, ConfigError> {
        mode.parse().ok().ok_or_else(|| ConfigError::InvalidMode {
            value: mode.to_string(),
            expected: "'renewable' or 'low-carbon'",
        })
    }
}
