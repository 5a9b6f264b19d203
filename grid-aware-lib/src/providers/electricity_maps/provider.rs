use super::wire::{CarbonIntensityLevelResponse, CarbonIntensityResponse, PowerBreakdownResponse};
use crate::Result;
use crate::evaluation::IntensityMode;
use crate::location::Location;
use crate::providers::{ApiKey, MetricBundle, MetricsProvider, ProviderError};
use ohno::IntoAppError;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use url::Url;

const LOG_TARGET: &str = "  provider";

pub const ELECTRICITY_MAPS_BASE_URL: &str = "https://api.electricitymap.org/v3";

/// Header carrying the access token.
const AUTH_TOKEN_HEADER: &str = "auth-token";

/// The Electricity Maps endpoints we query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CarbonIntensity,
    CarbonIntensityLevel,
    PowerBreakdown,
}

impl Endpoint {
    /// The endpoint that serves readings for an intensity mode.
    #[must_use]
    pub const fn for_intensity_mode(mode: IntensityMode) -> Self {
        match mode {
            IntensityMode::Level => Self::CarbonIntensityLevel,
            IntensityMode::Average | IntensityMode::Limit => Self::CarbonIntensity,
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CarbonIntensity => "carbon-intensity/latest",
            Self::CarbonIntensityLevel => "carbon-intensity-level/latest",
            Self::PowerBreakdown => "power-breakdown/latest",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Provider {
    client: reqwest::Client,
    base_url: String,
}

impl Provider {
    /// Create a provider talking to `base_url`, or to the public API when `None`.
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("grid-aware")
            .build()
            .into_app_err("creating HTTP client")?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a provider that shares an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.unwrap_or(ELECTRICITY_MAPS_BASE_URL).trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for an endpoint. Coordinates are sent as `lat`/`lon`, zones as `zone`.
    pub fn endpoint_url(&self, endpoint: Endpoint, location: &Location) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint.path())).map_err(|e| ProviderError::fetch(&e))?;

        {
            let mut query = url.query_pairs_mut();
            match location {
                Location::Coordinates { lat, lon } => {
                    let _ = query.append_pair("lat", &lat.to_string());
                    let _ = query.append_pair("lon", &lon.to_string());
                }
                Location::Zone(zone) => {
                    let _ = query.append_pair("zone", zone);
                }
            }
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, api_key: &ApiKey) -> Result<T, ProviderError> {
        let mut token = HeaderValue::from_str(api_key.expose()).map_err(|e| ProviderError::fetch(&e))?;
        token.set_sensitive(true);

        let response = self
            .client
            .get(url.clone())
            .header(AUTH_TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|e| ProviderError::fetch(&e))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!(target: LOG_TARGET, "Electricity Maps answered {status} for '{url}'");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_else(|| status.as_str()).to_string(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            log::debug!(target: LOG_TARGET, "Could not parse Electricity Maps response from '{url}': {e}");
            ProviderError::fetch(&e)
        })
    }
}

impl MetricsProvider for Provider {
    async fn fetch_grid_intensity(&self, location: &Location, mode: IntensityMode, api_key: &ApiKey) -> Result<MetricBundle, ProviderError> {
        let endpoint = Endpoint::for_intensity_mode(mode);
        let url = self.endpoint_url(endpoint, location)?;
        log::info!(target: LOG_TARGET, "Querying '{}' for the carbon intensity of '{location}'", self.base_url);

        let bundle = match endpoint {
            Endpoint::CarbonIntensityLevel => MetricBundle::from(self.get_json::<CarbonIntensityLevelResponse>(url, api_key).await?),
            _ => MetricBundle::from(self.get_json::<CarbonIntensityResponse>(url, api_key).await?),
        };

        log::debug!(target: LOG_TARGET, "Carbon intensity for '{}': {:?} gCO2eq/kWh, level {:?}", bundle.region, bundle.carbon_intensity, bundle.level);
        Ok(bundle)
    }

    async fn fetch_power_breakdown(&self, location: &Location, api_key: &ApiKey) -> Result<MetricBundle, ProviderError> {
        let url = self.endpoint_url(Endpoint::PowerBreakdown, location)?;
        log::info!(target: LOG_TARGET, "Querying '{}' for the power breakdown of '{location}'", self.base_url);

        let bundle = MetricBundle::from(self.get_json::<PowerBreakdownResponse>(url, api_key).await?);

        log::debug!(
            target: LOG_TARGET,
            "Power breakdown for '{}': renewable {:?}%, fossil-free {:?}%",
            bundle.region,
            bundle.renewable_percentage,
            bundle.fossil_free_percentage
        );
        Ok(bundle)
    }
}
