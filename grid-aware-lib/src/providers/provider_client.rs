use super::electricity_maps;
use super::{ApiKey, DataProvider, MetricBundle, MetricsProvider, ProviderError};
use crate::Result;
use crate::evaluation::IntensityMode;
use crate::location::Location;

/// The adapter for the currently selected [`DataProvider`].
#[derive(Debug, Clone)]
pub enum ProviderClient {
    ElectricityMaps(electricity_maps::Provider),
}

impl ProviderClient {
    /// Create the adapter for `provider`, optionally pointed at a non-default `base_url`.
    pub fn new(provider: DataProvider, base_url: Option<&str>) -> Result<Self> {
        match provider {
            DataProvider::ElectricityMaps => Ok(Self::ElectricityMaps(electricity_maps::Provider::new(base_url)?)),
        }
    }

    #[must_use]
    pub const fn data_provider(&self) -> DataProvider {
        match self {
            Self::ElectricityMaps(_) => DataProvider::ElectricityMaps,
        }
    }

    /// Switch to the adapter for `provider`, keeping the current one if it is already selected.
    #[must_use]
    pub fn switch_to(self, provider: DataProvider) -> Self {
        match (self, provider) {
            (current @ Self::ElectricityMaps(_), DataProvider::ElectricityMaps) => current,
        }
    }
}

impl MetricsProvider for ProviderClient {
    async fn fetch_grid_intensity(&self, location: &Location, mode: IntensityMode, api_key: &ApiKey) -> Result<MetricBundle, ProviderError> {
        match self {
            Self::ElectricityMaps(provider) => provider.fetch_grid_intensity(location, mode, api_key).await,
        }
    }

    async fn fetch_power_breakdown(&self, location: &Location, api_key: &ApiKey) -> Result<MetricBundle, ProviderError> {
        match self {
            Self::ElectricityMaps(provider) => provider.fetch_power_breakdown(location, api_key).await,
        }
    }

    fn select(&mut self, data_provider: DataProvider) {
        if data_provider != self.data_provider() {
            *self = self.clone().switch_to(data_provider);
        }
    }
}
