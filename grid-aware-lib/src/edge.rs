//! Location extraction from edge-platform request metadata
//!
//! Edge platforms attach geolocation data to every incoming request, for example Cloudflare's
//! `request.cf` object:
//!
//! ```json
//! { "country": "DE", "latitude": "52.52", "longitude": "13.40", "city": "Berlin" }
//! ```
//!
//! [`EdgeLocator`] turns that metadata into a [`Location`] that can be handed straight to
//! [`GridIntensity::check_location`](crate::GridIntensity::check_location) or
//! [`PowerBreakdown::check_location`](crate::PowerBreakdown::check_location).

use crate::location::Location;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const LOG_TARGET: &str = "      edge";

/// Which part of the request metadata to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EdgeMode {
    /// Use the visitor's country code
    #[default]
    Country,

    /// Use the visitor's coordinates, falling back to the country code
    #[serde(rename = "latlon")]
    #[strum(serialize = "latlon")]
    LatLon,
}

/// The geolocation fields an edge platform attaches to a request. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EdgeRequest {
    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub latitude: Option<String>,

    #[serde(default)]
    pub longitude: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeLocator {
    pub mode: EdgeMode,
}

impl EdgeLocator {
    #[must_use]
    pub const fn new(mode: EdgeMode) -> Self {
        Self { mode }
    }

    /// The location of the client that sent `request`, or `None` when the metadata has none.
    #[must_use]
    pub fn locate(&self, request: &EdgeRequest) -> Option<Location> {
        if self.mode == EdgeMode::LatLon {
            if let Some(location) = coordinates(request) {
                return Some(location);
            }

            log::debug!(target: LOG_TARGET, "Request has no usable coordinates, falling back to its country");
        }

        let country = request.country.as_deref().map(str::trim).filter(|c| !c.is_empty());
        if country.is_none() {
            log::debug!(target: LOG_TARGET, "Request has no country");
        }

        country.map(Location::zone)
    }
}

fn coordinates(request: &EdgeRequest) -> Option<Location> {
    let lat = parse(request.latitude.as_deref()?)?;
    let lon = parse(request.longitude.as_deref()?)?;
    Some(Location::coordinates(lat, lon))
}

fn parse(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn berlin() -> EdgeRequest {
        serde_json::from_value(json!({
            "country": "DE",
            "latitude": "52.52",
            "longitude": "13.40",
            "city": "Berlin",
            "colo": "FRA"
        }))
        .unwrap()
    }

    #[test]
    fn test_country_mode() {
        assert_eq!(EdgeLocator::default().locate(&berlin()), Some(Location::zone("DE")));
    }

    #[test]
    fn test_latlon_mode() {
        let locator = EdgeLocator::new(EdgeMode::LatLon);
        assert_eq!(locator.locate(&berlin()), Some(Location::coordinates(52.52, 13.40)));
    }

    #[test]
    fn test_latlon_mode_falls_back_to_country() {
        let request = EdgeRequest {
            latitude: Some("52.52".to_string()),
            longitude: Some("east".to_string()),
            ..berlin()
        };

        let locator = EdgeLocator::new(EdgeMode::LatLon);
        assert_eq!(locator.locate(&request), Some(Location::zone("DE")));
    }

    #[test]
    fn test_no_location() {
        assert_eq!(EdgeLocator::default().locate(&EdgeRequest::default()), None);
        assert_eq!(EdgeLocator::new(EdgeMode::LatLon).locate(&EdgeRequest::default()), None);

        let blank = EdgeRequest {
            country: Some(" ".to_string()),
            ..EdgeRequest::default()
        };
        assert_eq!(EdgeLocator::default().locate(&blank), None);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(EdgeMode::LatLon.to_string(), "latlon");
        assert_eq!("country".parse::<EdgeMode>().unwrap(), EdgeMode::Country);
    }

    #[test]
    fn test_mode_from_plugin_options() {
        let mode: EdgeMode = serde_json::from_value(json!("latlon")).unwrap();
        assert_eq!(mode, EdgeMode::LatLon);
        let _ = serde_json::from_value::<EdgeMode>(json!("city")).unwrap_err();
    }
}
