use super::{ConfigError, IntensityOptions};
use crate::evaluation::IntensityMode;
use crate::providers::{ApiKey, DataProvider};

/// The carbon intensity ceiling used by `limit` mode when none is configured, in gCO2eq/kWh.
pub const DEFAULT_MINIMUM_INTENSITY: f64 = 400.0;

pub(super) const MINIMUM_INTENSITY_REQUIREMENT: &str = "a number";

/// Validated configuration for grid intensity checks.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityConfig {
    mode: IntensityMode,
    minimum_intensity: f64,
    data_provider: DataProvider,
    api_key: Option<ApiKey>,
}

impl Default for IntensityConfig {
    fn default() -> Self {
        Self {
            mode: IntensityMode::default(),
            minimum_intensity: DEFAULT_MINIMUM_INTENSITY,
            data_provider: DataProvider::default(),
            api_key: None,
        }
    }
}

impl IntensityConfig {
    /// Defaults overridden by every option that is set.
    pub fn from_options(options: &IntensityOptions) -> Result<Self, ConfigError> {
        Self::default().merge(options)
    }

    /// A copy of this configuration with every set option applied, or the first validation error.
    pub fn merge(&self, options: &IntensityOptions) -> Result<Self, ConfigError> {
        let mut config = self.clone();

        if let Some(mode) = &options.mode {
            config.mode = IntensityMode::parse(mode)?;
        }

        if let Some(minimum_intensity) = options.minimum_intensity {
            config.minimum_intensity = validate_minimum_intensity(minimum_intensity)?;
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
            mode: IntensityMode::parse(mode)?,
            ..self
        })
    }

    pub fn with_minimum_intensity(self, minimum_intensity: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            minimum_intensity: validate_minimum_intensity(minimum_intensity)?,
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
    pub const fn mode(&self) -> IntensityMode {
        self.mode
    }

    #[must_use]
    pub const fn minimum_intensity(&self) -> f64 {
        self.minimum_intensity
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

fn validate_minimum_intensity(value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidThreshold {
            name: "minimumIntensity",
            requirement: MINIMUM_INTENSITY_REQUIREMENT,
        })
    }
}
