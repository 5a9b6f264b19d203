//! Rendering of check outcomes
//!
//! Two renderers are provided, each accessed through a `generate` function:
//!
//! - **Console**: a one-line colored verdict followed by the metrics that produced it
//! - **JSON**: the [`CheckOutcome`](crate::evaluation::CheckOutcome) data shape, pretty-printed
//!
//! Both write into any [`core::fmt::Write`] so callers decide where the text ends up.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
