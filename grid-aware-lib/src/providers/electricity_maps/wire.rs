//! Response payloads of the Electricity Maps v3 API, with only the fields we need.

use crate::providers::{IntensityLevel, MetricBundle};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /carbon-intensity/latest`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonIntensityResponse {
    pub zone: String,
    #[serde(default)]
    pub carbon_intensity: Option<f64>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `GET /carbon-intensity-level/latest`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonIntensityLevelResponse {
    pub zone: String,
    #[serde(default)]
    pub data: Vec<LevelEntry>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct LevelEntry {
    pub level: IntensityLevel,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
}

/// `GET /power-breakdown/latest`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBreakdownResponse {
    pub zone: String,
    #[serde(default)]
    pub renewable_percentage: Option<f64>,
    #[serde(default)]
    pub fossil_free_percentage: Option<f64>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<CarbonIntensityResponse> for MetricBundle {
    fn from(response: CarbonIntensityResponse) -> Self {
        Self {
            carbon_intensity: response.carbon_intensity,
            timestamp: response.created_at.or(response.datetime),
            ..Self::new(response.zone)
        }
    }
}

impl From<CarbonIntensityLevelResponse> for MetricBundle {
    fn from(response: CarbonIntensityLevelResponse) -> Self {
        let first = response.data.into_iter().next();
        let reading_time = first.as_ref().and_then(|entry| entry.datetime);

        Self {
            level: first.map(|entry| entry.level),
            timestamp: response.created_at.or(reading_time),
            ..Self::new(response.zone)
        }
    }
}

impl From<PowerBreakdownResponse> for MetricBundle {
    fn from(response: PowerBreakdownResponse) -> Self {
        Self {
            renewable_percentage: response.renewable_percentage,
            fossil_free_percentage: response.fossil_free_percentage,
            timestamp: response.created_at.or(response.datetime),
            ..Self::new(response.zone)
        }
    }
}
