use super::{IntensityMode, PowerMode, Verdict, VerdictData};
use crate::providers::{MetricBundle, ProviderError};
use crate::reference::ReferenceTables;

const LOG_TARGET: &str = "  evaluate";

/// Evaluate a grid intensity reading.
///
/// - `level` reports the provider's level and makes no judgment.
/// - `average` is unfavorable when the reading is above the region's average. A region without
///   a known average is never unfavorable.
/// - `limit` is unfavorable when the reading is strictly above `minimum_intensity`.
pub fn evaluate_intensity(
    bundle: &MetricBundle,
    mode: IntensityMode,
    minimum_intensity: f64,
    tables: &ReferenceTables,
) -> Result<Verdict, ProviderError> {
    let (grid_aware, data) = match mode {
        IntensityMode::Level => {
            let level = bundle.level.ok_or(ProviderError::MissingMetric { field: "level" })?;
            (
                None,
                VerdictData::Level {
                    level,
                    created_at: bundle.timestamp,
                },
            )
        }

        IntensityMode::Average => {
            let carbon_intensity = carbon_intensity(bundle)?;
            let average_intensity = tables.resolve_average(&bundle.region);

            let grid_aware = match average_intensity {
                Some(average) => carbon_intensity > average,
                None => {
                    log::warn!(target: LOG_TARGET, "No average carbon intensity known for '{}', treating the grid as favorable", bundle.region);
                    false
                }
            };

            (
                Some(grid_aware),
                VerdictData::Average {
                    carbon_intensity,
                    average_intensity,
                },
            )
        }

        IntensityMode::Limit => {
            let carbon_intensity = carbon_intensity(bundle)?;
            (
                Some(carbon_intensity > minimum_intensity),
                VerdictData::Limit {
                    carbon_intensity,
                    minimum_intensity,
                },
            )
        }
    };

    log::debug!(target: LOG_TARGET, "Intensity verdict for '{}' in {mode} mode: {grid_aware:?}", bundle.region);

    Ok(Verdict {
        region: bundle.region.clone(),
        grid_aware,
        data,
    })
}

/// Evaluate a power breakdown reading.
///
/// Unfavorable when the share selected by `mode` is at or below `minimum_percentage`.
pub fn evaluate_power(bundle: &MetricBundle, mode: PowerMode, minimum_percentage: f64) -> Result<Verdict, ProviderError> {
    let (grid_aware, data) = match mode {
        PowerMode::Renewable => {
            let renewable_percentage = bundle
                .renewable_percentage
                .ok_or(ProviderError::MissingMetric { field: "renewablePercentage" })?;
            (
                renewable_percentage <= minimum_percentage,
                VerdictData::Renewable {
                    minimum_percentage,
                    renewable_percentage,
                },
            )
        }

        PowerMode::LowCarbon => {
            let low_carbon_percentage = bundle
                .fossil_free_percentage
                .ok_or(ProviderError::MissingMetric { field: "fossilFreePercentage" })?;
            (
                low_carbon_percentage <= minimum_percentage,
                VerdictData::LowCarbon {
                    minimum_percentage,
                    low_carbon_percentage,
                },
            )
        }
    };

    log::debug!(target: LOG_TARGET, "Power verdict for '{}' in {mode} mode: {grid_aware}", bundle.region);

    Ok(Verdict {
        region: bundle.region.clone(),
        grid_aware: Some(grid_aware),
        data,
    })
}

fn carbon_intensity(bundle: &MetricBundle) -> Result<f64, ProviderError> {
    bundle.carbon_intensity.ok_or(ProviderError::MissingMetric { field: "carbonIntensity" })
}
