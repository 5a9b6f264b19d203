//! Mode-specific evaluation of metric bundles
//!
//! This module turns a [`MetricBundle`](crate::providers::MetricBundle) into a [`Verdict`]
//! describing whether grid conditions are unfavorable for deferrable work.
//!
//! # Implementation Model
//!
//! There are two verticals, each with its own set of modes:
//!
//! - **Grid intensity** ([`IntensityMode`]):
//!   - `level` passes the provider's discretized level through without a verdict
//!   - `average` compares the reading against the country's average intensity, resolved
//!     through injected [`ReferenceTables`](crate::reference::ReferenceTables)
//!   - `limit` compares the reading against a fixed ceiling (strict `>`)
//! - **Power breakdown** ([`PowerMode`]):
//!   - `renewable` compares the renewable share against a floor (inclusive `<=`)
//!   - `low-carbon` compares the fossil-free share against a floor (inclusive `<=`)
//!
//! `grid_aware == Some(true)` always means conditions are unfavorable. Note the inverted sense
//! of the comparisons between the verticals: intensity is bad when high, percentages are bad
//! when low.
//!
//! Evaluation is pure. It never performs I/O, and it only reads the bundle fields its mode
//! needs. A bundle that lacks that field is an error rather than a degraded success.

mod check_error;
mod evaluator;
mod modes;
mod verdict;

pub use check_error::{CheckError, InvalidZone};
pub use evaluator::{evaluate_intensity, evaluate_power};
pub use modes::{IntensityMode, PowerMode};
pub use verdict::{CheckOutcome, Verdict, VerdictData};
