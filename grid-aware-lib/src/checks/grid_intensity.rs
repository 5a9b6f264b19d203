use super::{ConfigError, IntensityConfig, IntensityOptions};
use crate::Result;
use crate::evaluation::{CheckError, Verdict, evaluate_intensity};
use crate::location::{Location, normalize};
use crate::providers::{ApiKey, MetricsProvider, ProviderClient};
use crate::reference::ReferenceTables;
use serde_json::Value;
use std::sync::Arc;

const LOG_TARGET: &str = "     check";

/// Checks whether the carbon intensity of a zone makes it a poor time to run deferrable work.
#[derive(Debug, Clone)]
pub struct GridIntensity<P = ProviderClient> {
    config: IntensityConfig,
    provider: P,
    tables: Arc<ReferenceTables>,
}

impl GridIntensity<ProviderClient> {
    /// A checker talking to the provider named in `config`, using the built-in reference tables.
    pub fn new(config: IntensityConfig) -> Result<Self> {
        let provider = ProviderClient::new(config.data_provider(), None)?;
        Ok(Self::with_provider(config, provider, ReferenceTables::builtin()))
    }

    /// A checker configured from defaults overridden by `options`.
    pub fn from_options(options: &IntensityOptions) -> Result<Self> {
        Self::new(IntensityConfig::from_options(options)?)
    }
}

impl<P: MetricsProvider> GridIntensity<P> {
    /// A checker using an explicit provider and reference tables.
    pub const fn with_provider(config: IntensityConfig, provider: P, tables: Arc<ReferenceTables>) -> Self {
        Self { config, provider, tables }
    }

    #[must_use]
    pub const fn config(&self) -> &IntensityConfig {
        &self.config
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<(), ConfigError> {
        self.config = self.config.clone().with_mode(mode)?;
        Ok(())
    }

    pub fn set_minimum_intensity(&mut self, minimum_intensity: f64) -> Result<(), ConfigError> {
        self.config = self.config.clone().with_minimum_intensity(minimum_intensity)?;
        Ok(())
    }

    /// Select a different data provider by its configuration key.
    pub fn set_data_provider(&mut self, data_provider: &str) -> Result<(), ConfigError> {
        let config = self.config.clone().with_data_provider(data_provider)?;
        self.apply(config);
        Ok(())
    }

    /// Apply several options at once. Either all of them take effect or none do.
    pub fn set_options(&mut self, options: &IntensityOptions) -> Result<(), ConfigError> {
        let config = self.config.merge(options)?;
        self.apply(config);
        Ok(())
    }

    fn apply(&mut self, config: IntensityConfig) {
        self.provider.select(config.data_provider());
        self.config = config;
    }

    /// Set the provider access token. `None`, or an empty token, removes it.
    pub fn set_api_key(&mut self, api_key: Option<&str>) {
        self.config = self.config.clone().with_api_key(api_key.and_then(ApiKey::new));
    }

    /// Check a loosely-typed location: a zone string or a `{lat, lon}` object.
    pub async fn check(&self, location: &Value) -> Result<Verdict, CheckError> {
        let api_key = self.config.api_key().ok_or(CheckError::MissingCredentials)?;
        let location = normalize(location)?;

        log::debug!(target: LOG_TARGET, "Checking grid intensity of '{location}' in {} mode", self.config.mode());

        let bundle = self.provider.fetch_grid_intensity(&location, self.config.mode(), api_key).await?;
        Ok(evaluate_intensity(
            &bundle,
            self.config.mode(),
            self.config.minimum_intensity(),
            &self.tables,
        )?)
    }

    /// Check an already-typed location.
    pub async fn check_location(&self, location: &Location) -> Result<Verdict, CheckError> {
        self.check(&location.to_value()).await
    }
}
