use crate::Result;
use crate::evaluation::{CheckOutcome, Verdict, VerdictData};
use crate::providers::IntensityLevel;
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(outcome: &CheckOutcome, use_colors: bool, writer: &mut W) -> Result<()> {
    match outcome {
        CheckOutcome::Success(verdict) => write_verdict(verdict, use_colors, writer),
        CheckOutcome::Error { message, details } => {
            if use_colors {
                writeln!(writer, "❌ {}", message.red().bold())?;
            } else {
                writeln!(writer, "❌ {message}")?;
            }

            if let Some(details) = details {
                writeln!(writer, "   {details}")?;
            }

            Ok(())
        }
    }
}

fn write_verdict<W: Write>(verdict: &Verdict, use_colors: bool, writer: &mut W) -> Result<()> {
    match (&verdict.data, verdict.grid_aware) {
        (VerdictData::Level { level, .. }, _) => {
            let status = level.to_string().to_uppercase();
            let status = if use_colors {
                match level {
                    IntensityLevel::Low => status.green().bold().to_string(),
                    IntensityLevel::Moderate => status.yellow().bold().to_string(),
                    IntensityLevel::High => status.red().bold().to_string(),
                }
            } else {
                status
            };
            writeln!(writer, "Carbon intensity in {} is {status}", verdict.region)?;
        }

        (_, grid_aware) => {
            let unfavorable = grid_aware == Some(true);
            let status = if unfavorable { "UNFAVORABLE" } else { "FAVORABLE" };
            let status = match (use_colors, unfavorable) {
                (true, true) => status.red().bold().to_string(),
                (true, false) => status.green().bold().to_string(),
                (false, _) => status.to_string(),
            };
            writeln!(writer, "Grid conditions in {} are {status}", verdict.region)?;
        }
    }

    let rows = rows(&verdict.data);
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        writeln!(writer, "  {label:<width$} : {value}")?;
    }

    Ok(())
}

fn rows(data: &VerdictData) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Mode", data.mode().to_string())];

    match data {
        VerdictData::Level { level, created_at } => {
            rows.push(("Level", level.to_string()));
            if let Some(created_at) = created_at {
                rows.push(("Created at", created_at.format("%Y-%m-%d %H:%M UTC").to_string()));
            }
        }
        VerdictData::Average {
            carbon_intensity,
            average_intensity,
        } => {
            rows.push(("Carbon intensity", intensity(*carbon_intensity)));
            rows.push(("Average intensity", average_intensity.map_or_else(|| "n/a".to_string(), intensity)));
        }
        VerdictData::Limit {
            carbon_intensity,
            minimum_intensity,
        } => {
            rows.push(("Carbon intensity", intensity(*carbon_intensity)));
            rows.push(("Minimum intensity", intensity(*minimum_intensity)));
        }
        VerdictData::Renewable {
            minimum_percentage,
            renewable_percentage,
        } => {
            rows.push(("Renewable percentage", format!("{renewable_percentage}%")));
            rows.push(("Minimum percentage", format!("{minimum_percentage}%")));
        }
        VerdictData::LowCarbon {
            minimum_percentage,
            low_carbon_percentage,
        } => {
            rows.push(("Low-carbon percentage", format!("{low_carbon_percentage}%")));
            rows.push(("Minimum percentage", format!("{minimum_percentage}%")));
        }
    }

    rows
}

fn intensity(value: f64) -> String {
    format!("{value} gCO2eq/kWh")
}
