use super::ConfigError;
use super::intensity_config::MINIMUM_INTENSITY_REQUIREMENT;
use super::power_config::MINIMUM_PERCENTAGE_REQUIREMENT;
use crate::providers::DataProvider;
use serde_json::{Map, Value};

/// Options for a [`GridIntensity`](super::GridIntensity) check. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntensityOptions {
    /// `level`, `average`, or `limit`
    pub mode: Option<String>,
    pub minimum_intensity: Option<f64>,
    pub data_provider: Option<String>,
    pub api_key: Option<String>,
}

/// Options for a [`PowerBreakdown`](super::PowerBreakdown) check. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerOptions {
    /// `renewable` or `low-carbon`
    pub mode: Option<String>,
    pub minimum_percentage: Option<f64>,
    pub data_provider: Option<String>,
    pub api_key: Option<String>,
}

impl IntensityOptions {
    /// Read options from a JSON object with `mode`, `minimumIntensity`, `dataProvider`, and `apiKey` keys.
    ///
    /// Numeric strings are accepted for `minimumIntensity`. Anything other than an object yields empty options.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let Some(fields) = value.as_object() else {
            return Ok(Self::default());
        };

        Ok(Self {
            mode: mode_field(fields, "'level', 'average' or 'limit'")?,
            minimum_intensity: number_field(fields, "minimumIntensity", MINIMUM_INTENSITY_REQUIREMENT)?,
            data_provider: provider_field(fields)?,
            api_key: api_key_field(fields),
        })
    }
}

impl PowerOptions {
    /// Read options from a JSON object with `mode`, `minimumPercentage`, `dataProvider`, and `apiKey` keys.
    ///
    /// Numeric strings are accepted for `minimumPercentage`. Anything other than an object yields empty options.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let Some(fields) = value.as_object() else {
            return Ok(Self::default());
        };

        Ok(Self {
            mode: mode_field(fields, "'renewable' or 'low-carbon'")?,
            minimum_percentage: number_field(fields, "minimumPercentage", MINIMUM_PERCENTAGE_REQUIREMENT)?,
            data_provider: provider_field(fields)?,
            api_key: api_key_field(fields),
        })
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn mode_field(fields: &Map<String, Value>, expected: &'static str) -> Result<Option<String>, ConfigError> {
    present(fields, "mode")
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| ConfigError::InvalidMode {
                value: v.to_string(),
                expected,
            })
        })
        .transpose()
}

fn number_field(fields: &Map<String, Value>, key: &'static str, requirement: &'static str) -> Result<Option<f64>, ConfigError> {
    present(fields, key)
        .map(|v| {
            let number = match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };

            number.ok_or(ConfigError::InvalidThreshold { name: key, requirement })
        })
        .transpose()
}

fn provider_field(fields: &Map<String, Value>) -> Result<Option<String>, ConfigError> {
    present(fields, "dataProvider")
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| ConfigError::InvalidProvider {
                value: v.to_string(),
                accepted: DataProvider::accepted(),
            })
        })
        .transpose()
}

fn api_key_field(fields: &Map<String, Value>) -> Option<String> {
    present(fields, "apiKey").and_then(Value::as_str).map(str::to_string)
}
