#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for grid-aware
//!
//! This library decides whether current electricity grid conditions in a zone are favorable
//! for running deferrable, energy-intensive work. It fetches live metrics from an electricity
//! data provider and compares them against a threshold using one of several evaluation modes.
//!
//! # Module Organization
//!
//! - [`location`]: Normalization of caller-supplied locations (zone codes or coordinates)
//! - [`providers`]: Provider capability trait, provider registry, and the Electricity Maps adapter
//! - [`reference`]: Static lookup tables used by the regional-average mode
//! - [`evaluation`]: Mode-specific evaluation of metric bundles into verdicts
//! - [`checks`]: The configurable [`GridIntensity`] and [`PowerBreakdown`] facades
//! - [`edge`]: Extraction of a location from edge-platform request metadata
//! - [`reports`]: Console and JSON rendering of check outcomes
//!
//! # Example
//!
//! ```no_run
//! use grid_aware_lib::{GridIntensity, IntensityOptions};
//! use serde_json::json;
//!
//! # async fn demo() -> grid_aware_lib::Result<()> {
//! let checker = GridIntensity::from_options(&IntensityOptions {
//!     mode: Some("limit".to_string()),
//!     minimum_intensity: Some(300.0),
//!     api_key: Some("my-api-key".to_string()),
//!     ..IntensityOptions::default()
//! })?;
//!
//! match checker.check(&json!("DE")).await {
//!     Ok(verdict) if verdict.grid_aware == Some(true) => println!("defer the work"),
//!     Ok(_) => println!("go ahead"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok(())
//! # }
//! ```

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod checks;
pub mod edge;
pub mod evaluation;
pub mod location;
pub mod providers;
pub mod reference;
pub mod reports;

mod commands;

pub use checks::{ConfigError, GridIntensity, IntensityConfig, IntensityOptions, PowerBreakdown, PowerConfig, PowerOptions};
pub use commands::{Host, run};
pub use evaluation::{CheckError, CheckOutcome, IntensityMode, PowerMode, Verdict, VerdictData};
pub use location::Location;
pub use providers::{ApiKey, DataProvider, MetricBundle, MetricsProvider, ProviderClient, ProviderError};
pub use reference::ReferenceTables;
