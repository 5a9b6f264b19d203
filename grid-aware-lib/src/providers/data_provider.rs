use crate::checks::ConfigError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// The registry of supported data providers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize, Serialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum DataProvider {
    /// Electricity Maps (<https://www.electricitymaps.com>)
    #[default]
    #[value(name = "electricityMaps")]
    #[serde(rename = "electricityMaps")]
    #[strum(serialize = "electricityMaps")]
    ElectricityMaps,
}

impl DataProvider {
    /// Look up a provider by its configuration key.
    pub fn parse(key: &str) -> Result<Self, ConfigError> {
        key.parse().ok().ok_or_else(|| ConfigError::InvalidProvider {
            value: key.to_string(),
            accepted: Self::accepted(),
        })
    }

    /// Comma-separated list of every accepted configuration key.
    #[must_use]
    pub fn accepted() -> String {
        Self::iter().map(|p| p.as_ref().to_string()).collect::<Vec<_>>().join(", ")
    }
}
