//! Common processing logic shared between the intensity and power commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::evaluation::CheckOutcome;
use crate::location::Location;
use crate::providers::{DataProvider, ProviderClient};
use crate::reference::ReferenceTables;
use crate::reports::{generate_console, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use clap::ValueEnum;
use ohno::app_err;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the intensity and power commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Zone code (e.g. `DE`, `US-CAL-CISO`) or a `LAT,LON` pair
    #[arg(value_name = "LOCATION", allow_hyphen_values = true, conflicts_with_all = ["lat", "lon"])]
    pub location: Option<Location>,

    /// Latitude of the location to check
    #[arg(long, value_name = "LAT", allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude of the location to check
    #[arg(long, value_name = "LON", allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Access token for the data provider
    #[arg(long, value_name = "TOKEN", env = "ELECTRICITY_MAPS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Data provider to query (overrides the configuration file)
    #[arg(long, value_name = "PROVIDER")]
    pub data_provider: Option<DataProvider>,

    /// Path to configuration file (default is `grid-aware.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Print the check outcome as JSON instead of console text
    #[arg(long)]
    pub json: bool,

    /// Exit with status code 1 if grid conditions are unfavorable
    #[arg(long)]
    pub error_if_grid_aware: bool,
}

impl CommonArgs {
    /// The requested location in the loose form accepted by the checkers, `null` when none was given.
    #[must_use]
    pub fn location_value(&self) -> Value {
        match (&self.location, self.lat, self.lon) {
            (Some(location), _, _) => location.to_value(),
            (None, Some(lat), Some(lon)) => Location::coordinates(lat, lon).to_value(),
            _ => Value::Null,
        }
    }

    /// The `--data-provider` override as a configuration key.
    #[must_use]
    pub fn data_provider_key(&self) -> Option<String> {
        self.data_provider.map(|p| p.to_string())
    }
}

pub struct Common<'a, H: Host> {
    pub config: Config,
    pub tables: Arc<ReferenceTables>,
    host: &'a mut H,
    color: ColorMode,
    json: bool,
    error_if_grid_aware: bool,
}

impl<'a, H: Host> Common<'a, H> {
    /// Create a new Common processor with logger and config
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or is invalid
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let (config, tables) = Config::load_with_tables(Utf8Path::new("."), args.config.as_ref())?;

        Ok(Self {
            config,
            tables,
            host,
            color: args.color,
            json: args.json,
            error_if_grid_aware: args.error_if_grid_aware,
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // A logger may already be installed when several commands run in one process
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    /// The client for `data_provider`, honoring the configured base URL.
    pub fn provider_client(&self, data_provider: DataProvider) -> Result<ProviderClient> {
        ProviderClient::new(data_provider, self.config.base_url.as_deref())
    }

    /// Render the outcome of a check and turn failures into an error exit.
    pub fn report(&mut self, outcome: &CheckOutcome) -> Result<()> {
        let mut text = String::new();
        if self.json {
            generate_json(outcome, &mut text)?;
        } else {
            let use_colors = match self.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => {
                    use std::io::{IsTerminal, stdout};
                    stdout().is_terminal()
                }
            };
            generate_console(outcome, use_colors, &mut text)?;
        }

        if outcome.is_success() || self.json {
            let _ = write!(self.host.output(), "{text}");
        } else {
            let _ = write!(self.host.error(), "{text}");
        }

        if let CheckOutcome::Error { message, .. } = outcome {
            self.host.exit(1);
            return Err(app_err!("{message}"));
        }

        if self.error_if_grid_aware && outcome.is_grid_aware() {
            self.host.exit(1);
            return Err(app_err!("grid conditions are unfavorable"));
        }

        Ok(())
    }
}
