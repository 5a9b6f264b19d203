use super::{ConfigError, PowerOptions};
use crate::evaluation::PowerMode;
use crate::providers::{ApiKey, DataProvider};

/// The percentage floor used when none is configured.
pub const DEFAULT_MINIMUM_PERCENTAGE: f64 = 50.0;

pub(super) const MINIMUM_PERCENTAGE_REQUIREMENT: &str = "a number between 0 and 100";

/// Validated configuration for power breakdown checks.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerConfig {
    mode: PowerMode,
    minimum_percentage: f64,
    data_provider: DataProvider,
    api_key: Option<ApiKey>,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            mode: PowerMode::default(),
            minimum_percentage: DEFAULT_MINIMUM_PERCENTAGE,
            data_provider: DataProvider::default(),
            api_key: None,
        }
    }
}

impl PowerConfig {
    /// Defaults overridden by every option that is set.
    pub fn from_options(options: &PowerOptions) -> Result<Self, ConfigError> {
        Self::default().merge(options)
    }

    /// A copy of this configuration with every set option applied, or the first validation error.
    pub fn merge(&self, options: &PowerOptions) -> Result<Self, ConfigError> {
        let mut config = self.clone();

        if let Some(mode) = &options.mode {
            config.mode = PowerMode::parse(mode)?;
        }

        if let Some(minimum_percentage) = options.minimum_percentage {
            config.minimum_percentage = validate_minimum_percentage(minimum_percentage)?;
        }

        if let Some(data_provider) = &options.data_provider {
            config.data_provider = DataProvider::parse(data_provider)?;
        }

        if let Some(api_key) = &options.api_key {
            config.api_key = ApiKey::new(api_key);
        }

        Ok(config)
    }

    pub fn with_mode(self, mode: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            mode: PowerMode::parse(mode)?,
            ..self
        })
    }

    pub fn with_minimum_percentage(self, minimum_percentage: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            minimum_percentage: validate_minimum_percentage(minimum_percentage)?,
            ..self
        })
    }

    pub fn with_data_provider(self, data_provider: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            data_provider: DataProvider::parse(data_provider)?,
            ..self
        })
    }

    #[must_use]
    pub fn with_api_key(self, api_key: Option<ApiKey>) -> Self {
        Self { api_key, ..self }
    }

    #[must_use]
    pub const fn mode(&self) -> PowerMode {
        self.mode
    }

    #[must_use]
    pub const fn minimum_percentage(&self) -> f64 {
        self.minimum_percentage
    }

    #[must_use]
    pub const fn data_provider(&self) -> DataProvider {
        self.data_provider
    }

    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }
}

fn validate_minimum_percentage(value: f64) -> Result<f64, ConfigError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidThreshold {
            name: "minimumPercentage",
            requirement: MINIMUM_PERCENTAGE_REQUIREMENT,
        })
    }
}
