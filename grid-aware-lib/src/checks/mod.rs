//! Configurable grid checks
//!
//! [`GridIntensity`] and [`PowerBreakdown`] are the entry points most callers want. Each owns
//! one validated configuration ([`IntensityConfig`] or [`PowerConfig`]) and a data provider,
//! and turns a location into a [`Verdict`](crate::evaluation::Verdict).
//!
//! # Configuration
//!
//! Configurations are immutable values. Every setter on a facade validates its input against a
//! copy of the current configuration and only swaps the copy in on success, so a rejected value
//! never leaves a half-applied configuration behind.
//!
//! Options can come from typed [`IntensityOptions`]/[`PowerOptions`] or from a loose JSON
//! object using the camelCase keys `mode`, `minimumIntensity`/`minimumPercentage`,
//! `dataProvider`, and `apiKey`.
//!
//! # Checking
//!
//! A check runs these steps and stops at the first failure:
//!
//! 1. Confirm an API key is configured
//! 2. Normalize the location
//! 3. Fetch metrics from the provider
//! 4. Evaluate them according to the configured mode
//!
//! No step before the fetch touches the network.

mod config_error;
mod grid_intensity;
mod intensity_config;
mod options;
mod power_breakdown;
mod power_config;

pub use config_error::ConfigError;
pub use grid_intensity::GridIntensity;
pub use intensity_config::{DEFAULT_MINIMUM_INTENSITY, IntensityConfig};
pub use options::{IntensityOptions, PowerOptions};
pub use power_breakdown::PowerBreakdown;
pub use power_config::{DEFAULT_MINIMUM_PERCENTAGE, PowerConfig};

#[cfg(test)]
pub(crate) mod stub {
    use crate::evaluation::IntensityMode;
    use crate::location::Location;
    use crate::providers::{ApiKey, MetricBundle, MetricsProvider, ProviderError};
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// A provider that answers every call with a canned result and records what it was asked.
    #[derive(Debug)]
    pub struct StubProvider {
        result: Result<MetricBundle, ProviderError>,
        calls: AtomicUsize,
        last_location: Mutex<Option<Location>>,
        last_mode: Mutex<Option<IntensityMode>>,
    }

    impl StubProvider {
        pub fn returning(result: Result<MetricBundle, ProviderError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
                last_location: Mutex::new(None),
                last_mode: Mutex::new(None),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_location(&self) -> Option<Location> {
            self.last_location.lock().unwrap().clone()
        }

        pub fn last_mode(&self) -> Option<IntensityMode> {
            *self.last_mode.lock().unwrap()
        }

        fn record(&self, location: &Location) -> Result<MetricBundle, ProviderError> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_location.lock().unwrap() = Some(location.clone());
            self.result.clone()
        }
    }

    impl MetricsProvider for StubProvider {
        async fn fetch_grid_intensity(&self, location: &Location, mode: IntensityMode, _api_key: &ApiKey) -> Result<MetricBundle, ProviderError> {
            *self.last_mode.lock().unwrap() = Some(mode);
            self.record(location)
        }

        async fn fetch_power_breakdown(&self, location: &Location, _api_key: &ApiKey) -> Result<MetricBundle, ProviderError> {
            self.record(location)
        }
    }
}
