use super::CheckError;
use crate::providers::IntensityLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The successful result of a check.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// The region the provider reported the reading for.
    pub region: String,

    /// `Some(true)` when grid conditions are unfavorable. `None` in `level` mode, which makes no judgment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_aware: Option<bool>,

    pub data: VerdictData,
}

/// The metrics that led to a verdict, tagged by the mode that produced them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum VerdictData {
    Level {
        level: IntensityLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        created_at: Option<DateTime<Utc>>,
    },

    Average {
        carbon_intensity: f64,
        /// Absent when the region has no known average.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        average_intensity: Option<f64>,
    },

    Limit {
        carbon_intensity: f64,
        minimum_intensity: f64,
    },

    Renewable {
        minimum_percentage: f64,
        renewable_percentage: f64,
    },

    LowCarbon {
        minimum_percentage: f64,
        low_carbon_percentage: f64,
    },
}

impl VerdictData {
    /// The name of the mode that produced this data.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Level { .. } => "level",
            Self::Average { .. } => "average",
            Self::Limit { .. } => "limit",
            Self::Renewable { .. } => "renewable",
            Self::LowCarbon { .. } => "low-carbon",
        }
    }
}

/// The uniform shape of a check result at the data boundary.
///
/// ```json
/// {"status":"success","region":"DE","gridAware":true,"data":{"mode":"limit","carbonIntensity":450.0,"minimumIntensity":400.0}}
/// {"status":"error","message":"Network response was not ok","details":"Not Found"}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckOutcome {
    Success(Verdict),
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl CheckOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the outcome is a success that found grid conditions unfavorable.
    #[must_use]
    pub const fn is_grid_aware(&self) -> bool {
        matches!(
            self,
            Self::Success(Verdict {
                grid_aware: Some(true),
                ..
            })
        )
    }
}

impl From<&CheckError> for CheckOutcome {
    fn from(error: &CheckError) -> Self {
        Self::Error {
            message: error.to_string(),
            details: error.details(),
        }
    }
}

impl From<Result<Verdict, CheckError>> for CheckOutcome {
    fn from(result: Result<Verdict, CheckError>) -> Self {
        match result {
            Ok(verdict) => Self::Success(verdict),
            Err(e) => Self::from(&e),
        }
    }
}
