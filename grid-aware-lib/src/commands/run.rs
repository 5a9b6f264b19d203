//! Command dispatch logic for grid-aware

use super::{
    InitArgs, IntensityArgs, PowerArgs, ValidateArgs, check_intensity, check_power, init_config, validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "grid-aware", author, version, long_about = None)]
#[command(about = "Check whether the electricity grid is favorable for deferrable work")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: GridAwareSubcommand,
}

#[derive(Subcommand, Debug)]
enum GridAwareSubcommand {
    /// Check the carbon intensity of a zone
    Intensity(Box<IntensityArgs>),
    /// Check the renewable or low-carbon share of a zone's power
    Power(Box<PowerArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        GridAwareSubcommand::Intensity(intensity_args) => check_intensity(host, intensity_args).await,
        GridAwareSubcommand::Power(power_args) => check_power(host, power_args).await,
        GridAwareSubcommand::Init(init_args) => init_config(host, init_args),
        GridAwareSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
