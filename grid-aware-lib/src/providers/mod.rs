//! Electricity data providers
//!
//! A provider turns a [`Location`] and an [`ApiKey`] into a request against a specific
//! remote service and maps the service's response into a provider-agnostic [`MetricBundle`].
//!
//! # Implementation Model
//!
//! Every provider implements [`MetricsProvider`], which exposes two operations:
//!
//! - **Grid intensity**: either a continuous carbon intensity reading or, for
//!   [`IntensityMode::Level`], a discretized low/moderate/high level
//! - **Power breakdown**: renewable and fossil-free shares of the current generation mix
//!
//! The set of providers is closed. [`DataProvider`] names each one and is what users put in
//! configuration, while [`ProviderClient`] holds the concrete adapter for the selected provider
//! and forwards calls to it. Adding a provider means adding an adapter module, a
//! [`DataProvider`] variant, and a [`ProviderClient`] variant.
//!
//! Providers never retry, never cache, and issue exactly one HTTP request per call.

mod api_key;
mod data_provider;
pub mod electricity_maps;
mod metric_bundle;
mod provider_client;
mod provider_error;

pub use api_key::ApiKey;
pub use data_provider::DataProvider;
pub use metric_bundle::{IntensityLevel, MetricBundle};
pub use provider_client::ProviderClient;
pub use provider_error::ProviderError;

use crate::evaluation::IntensityMode;
use crate::location::Location;

/// The capability every electricity data provider offers.
pub trait MetricsProvider: Send + Sync {
    /// Fetch the latest carbon intensity reading for a location.
    ///
    /// With [`IntensityMode::Level`] the bundle carries a discretized `level`; with every other
    /// mode it carries a numeric `carbon_intensity`.
    fn fetch_grid_intensity(
        &self,
        location: &Location,
        mode: IntensityMode,
        api_key: &ApiKey,
    ) -> impl Future<Output = Result<MetricBundle, ProviderError>> + Send;

    /// Fetch the latest power breakdown for a location.
    fn fetch_power_breakdown(
        &self,
        location: &Location,
        api_key: &ApiKey,
    ) -> impl Future<Output = Result<MetricBundle, ProviderError>> + Send;

    /// Point the provider at another data source. Providers bound to a single source keep serving it.
    fn select(&mut self, _data_provider: DataProvider) {}
}
