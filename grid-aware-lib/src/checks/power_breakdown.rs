use super::{ConfigError, PowerConfig, PowerOptions};
use crate::Result;
use crate::evaluation::{CheckError, Verdict, evaluate_power};
use crate::location::{Location, normalize};
use crate::providers::{ApiKey, MetricsProvider, ProviderClient};
use serde_json::Value;

const LOG_TARGET: &str = "     check";

/// Checks whether the generation mix of a zone makes it a poor time to run deferrable work.
#[derive(Debug, Clone)]
pub struct PowerBreakdown<P = ProviderClient> {
    config: PowerConfig,
    provider: P,
}

impl PowerBreakdown<ProviderClient> {
    /// A checker talking to the provider named in `config`.
    pub fn new(config: PowerConfig) -> Result<Self> {
        let provider = ProviderClient::new(config.data_provider(), None)?;
        Ok(Self::with_provider(config, provider))
    }

    /// A checker configured from defaults overridden by `options`.
    pub fn from_options(options: &PowerOptions) -> Result<Self> {
        Self::new(PowerConfig::from_options(options)?)
    }
}

impl<P: MetricsProvider> PowerBreakdown<P> {
    /// A checker using an explicit provider.
    pub const fn with_provider(config: PowerConfig, provider: P) -> Self {
        Self { config, provider }
    }

    #[must_use]
    pub const fn config(&self) -> &PowerConfig {
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

    pub fn set_minimum_percentage(&mut self, minimum_percentage: f64) -> Result<(), ConfigError> {
        self.config = self.config.clone().with_minimum_percentage(minimum_percentage)?;
        Ok(())
    }

    /// Select a different data provider by its configuration key.
    pub fn set_data_provider(&mut self, data_provider: &str) -> Result<(), ConfigError> {
        let config = self.config.clone().with_data_provider(data_provider)?;
        self.apply(config);
        Ok(())
    }

    /// Apply several options at once. Either all of them take effect or none do.
    pub fn set_options(&mut self, options: &PowerOptions) -> Result<(), ConfigError> {
        let config = self.config.merge(options)?;
        self.apply(config);
        Ok(())
    }

    fn apply(&mut self, config: PowerConfig) {
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

        log::debug!(target: LOG_TARGET, "Checking power breakdown of '{location}' in {} mode", self.config.mode());

        let bundle = self.provider.fetch_power_breakdown(&location, api_key).await?;
        Ok(evaluate_power(&bundle, self.config.mode(), self.config.minimum_percentage())?)
    }

    /// Check an already-typed location.
    pub async fn check_location(&self, location: &Location) -> Result<Verdict, CheckError> {
        self.check(&location.to_value()).await
    }
}
