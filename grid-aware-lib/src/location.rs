//! Normalization of caller-supplied locations.
//!
//! Callers hand us loosely-typed input (a zone string, a `{lat, lon}` object, or something
//! else entirely when wired up from untyped sources such as request metadata). [`normalize`]
//! turns that into a [`Location`] or rejects it before any network access happens.

use crate::evaluation::{CheckError, InvalidZone};
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde_json::{Map, Value, json};

/// A validated location understood by every data provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// A provider zone identifier, typically a 2- or 3-letter country or region code.
    Zone(String),

    /// A latitude/longitude pair.
    Coordinates { lat: f64, lon: f64 },
}

impl Location {
    #[must_use]
    pub fn zone(zone: impl Into<String>) -> Self {
        Self::Zone(zone.into())
    }

    #[must_use]
    pub const fn coordinates(lat: f64, lon: f64) -> Self {
        Self::Coordinates { lat, lon }
    }

    /// Returns the JSON form of this location, as accepted by [`normalize`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Zone(zone) => json!(zone),
            Self::Coordinates { lat, lon } => json!({ "lat": lat, "lon": lon }),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Zone(zone) => write!(f, "{zone}"),
            Self::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}

impl FromStr for Location {
    type Err = String;

    /// Parses `DE` as a zone and `51.1,0.1` as a coordinate pair.
    fn from_str(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("location must not be empty".to_string());
        }

        if let Some((lat, lon)) = s.split_once(',') {
            let lat = parse_coordinate(lat).ok_or_else(|| format!("invalid latitude in location '{s}'"))?;
            let lon = parse_coordinate(lon).ok_or_else(|| format!("invalid longitude in location '{s}'"))?;
            return Ok(Self::Coordinates { lat, lon });
        }

        Ok(Self::Zone(s.to_string()))
    }
}

/// Validate a caller-supplied location.
///
/// - A non-empty string is a zone code. It is not checked against any zone registry; unknown
///   zones surface later as provider errors.
/// - An object with numeric (or numeric-string) `lat` and `lon` is a coordinate pair.
/// - `null` and the empty string mean no location was supplied.
/// - Anything else is rejected.
pub fn normalize(input: &Value) -> Result<Location, CheckError> {
    match input {
        Value::Null => Err(CheckError::MissingLocation),
        Value::String(zone) if zone.trim().is_empty() => Err(CheckError::MissingLocation),
        Value::String(zone) => Ok(Location::Zone(zone.trim().to_string())),
        Value::Object(fields) => coordinates_from(fields),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) => Err(CheckError::InvalidZoneShape(InvalidZone::WrongType)),
    }
}

fn coordinates_from(fields: &Map<String, Value>) -> Result<Location, CheckError> {
    let lat = fields.get("lat").and_then(coerce_coordinate);
    let lon = fields.get("lon").and_then(coerce_coordinate);

    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Location::Coordinates { lat, lon }),
        _ => Err(CheckError::InvalidZoneShape(InvalidZone::MissingCoordinates)),
    }
}

fn coerce_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_coordinate(s),
        _ => None,
    }
}

fn parse_coordinate(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_zone() {
        assert_eq!(normalize(&json!("DE")).unwrap(), Location::zone("DE"));
    }

    #[test]
    fn test_zone_is_trimmed() {
        assert_eq!(normalize(&json!("  FR ")).unwrap(), Location::zone("FR"));
    }

    #[test]
    fn test_numeric_coordinates() {
        let location = normalize(&json!({ "lat": 51.1, "lon": 0.1 })).unwrap();
        assert_eq!(location, Location::coordinates(51.1, 0.1));
    }

    #[test]
    fn test_string_coordinates_are_coerced() {
        let location = normalize(&json!({ "lat": "51.1", "lon": "0.1" })).unwrap();
        assert_eq!(location, Location::coordinates(51.1, 0.1));
    }

    #[test]
    fn test_zero_coordinates_are_accepted() {
        let location = normalize(&json!({ "lat": 0, "lon": 0 })).unwrap();
        assert_eq!(location, Location::coordinates(0.0, 0.0));
    }

    #[test]
    fn test_number_is_rejected() {
        let err = normalize(&json!(123)).unwrap_err();
        assert_eq!(err, CheckError::InvalidZoneShape(InvalidZone::WrongType));
        assert!(err.to_string().starts_with("Invalid zone."));
    }

    #[test]
    fn test_bool_and_array_are_rejected() {
        assert!(matches!(normalize(&json!(true)), Err(CheckError::InvalidZoneShape(_))));
        assert!(matches!(normalize(&json!(["DE"])), Err(CheckError::InvalidZoneShape(_))));
    }

    #[test]
    fn test_object_without_coordinates_is_rejected() {
        let err = normalize(&json!({ "region": "DE" })).unwrap_err();
        assert_eq!(err, CheckError::InvalidZoneShape(InvalidZone::MissingCoordinates));
        assert_eq!(err.to_string(), "Invalid zone. Zone object must contain lat and lon properties.");
    }

    #[test]
    fn test_object_with_one_coordinate_is_rejected() {
        assert!(normalize(&json!({ "lat": 51.1 })).is_err());
        assert!(normalize(&json!({ "lon": 0.1 })).is_err());
    }

    #[test]
    fn test_non_numeric_coordinates_are_rejected() {
        assert!(normalize(&json!({ "lat": "north", "lon": "0.1" })).is_err());
        assert!(normalize(&json!({ "lat": null, "lon": 0.1 })).is_err());
    }

    #[test]
    fn test_missing_location() {
        assert_eq!(normalize(&Value::Null).unwrap_err(), CheckError::MissingLocation);
        assert_eq!(normalize(&json!("")).unwrap_err(), CheckError::MissingLocation);
    }

    #[test]
    fn test_from_str_zone() {
        assert_eq!("GB".parse::<Location>().unwrap(), Location::zone("GB"));
    }

    #[test]
    fn test_from_str_coordinates() {
        assert_eq!("51.1, -0.1".parse::<Location>().unwrap(), Location::coordinates(51.1, -0.1));
    }

    #[test]
    fn test_from_str_rejects_bad_coordinates() {
        assert!("51.1,west".parse::<Location>().is_err());
        assert!("".parse::<Location>().is_err());
    }

    #[test]
    fn test_to_value_round_trips_through_normalize() {
        for location in [Location::zone("DE"), Location::coordinates(48.85, 2.35)] {
            assert_eq!(normalize(&location.to_value()).unwrap(), location);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::zone("DE").to_string(), "DE");
        assert_eq!(Location::coordinates(51.1, 0.1).to_string(), "51.1,0.1");
    }
}
