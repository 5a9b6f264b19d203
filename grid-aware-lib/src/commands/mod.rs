//! Command-line interface and orchestration for grid-aware
//!
//! This module implements the CLI commands on top of the library's checkers. It handles
//! argument parsing, configuration management, and rendering of check outcomes.
//!
//! # Implementation Model
//!
//! The module is organized around four commands:
//!
//! ## Commands
//!
//! - **intensity**: Check the carbon intensity of a zone using the `level`, `average`, or
//!   `limit` mode
//! - **power**: Check the renewable or low-carbon share of a zone's power
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and values
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. Both check commands follow the same pattern:
//!
//! 1. Initialize logging and load the configuration file
//! 2. Merge command-line options over the configured ones
//! 3. Run the check against the selected data provider
//! 4. Render the outcome as console text or JSON
//!
//! The `common` module provides shared functionality like logging setup,
//! color mode handling, and outcome reporting.
//!
//! Configuration is managed through a `grid-aware.toml` file holding the data provider
//! settings and one section per check.

mod common;
mod config;
mod host;
mod init;
mod intensity;
mod power;
mod run;
mod validate;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use intensity::{IntensityArgs, check_intensity};
pub use power::{PowerArgs, check_power};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
