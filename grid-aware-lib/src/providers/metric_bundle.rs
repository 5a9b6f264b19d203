use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Discretized carbon intensity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntensityLevel {
    Low,
    Moderate,
    High,
}

/// The provider-agnostic result of a fetch.
///
/// Which fields are populated depends on the endpoint that produced the bundle. Evaluation only
/// reads the fields relevant to its mode.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBundle {
    /// The provider's zone identifier for the reading.
    pub region: String,

    /// Carbon intensity in gCO2eq/kWh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_intensity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<IntensityLevel>,

    /// Share of renewable generation, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewable_percentage: Option<f64>,

    /// Share of fossil-free generation, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fossil_free_percentage: Option<f64>,

    /// When the provider created the reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MetricBundle {
    /// An empty bundle for a region; fill in the fields you have.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            carbon_intensity: None,
            level: None,
            renewable_percentage: None,
            fossil_free_percentage: None,
            timestamp: None,
        }
    }
}
