use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::checks::{PowerBreakdown, PowerConfig, PowerOptions};
use crate::evaluation::{CheckOutcome, PowerMode};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct PowerArgs {
    /// How to judge the reading (overrides the configuration file)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<PowerMode>,

    /// Percentage (0-100) at or below which the grid is unfavorable
    #[arg(long, value_name = "N")]
    pub minimum_percentage: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl PowerArgs {
    fn options(&self) -> PowerOptions {
        PowerOptions {
            mode: self.mode.map(|m| m.to_string()),
            minimum_percentage: self.minimum_percentage,
            data_provider: self.common.data_provider_key(),
            api_key: self.common.api_key.clone(),
        }
    }
}

pub async fn check_power<H: Host>(host: &mut H, args: &PowerArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let config = PowerConfig::from_options(&common.config.power_options())?.merge(&args.options())?;
    let provider = common.provider_client(config.data_provider())?;

    let checker = PowerBreakdown::with_provider(config, provider);
    let outcome = CheckOutcome::from(checker.check(&args.common.location_value()).await);

    common.report(&outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    fn parse(args: &[&str]) -> PowerArgs {
        PowerArgs::try_parse_from(core::iter::once("power").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_options_override_nothing_when_absent() {
        let mut args = parse(&[]);
        args.common.api_key = None;
        assert_eq!(args.options(), PowerOptions::default());
    }

    #[test]
    fn test_cli_options() {
        let args = parse(&["DE", "--mode", "low-carbon", "--minimum-percentage", "70", "--api-key", "token"]);
        let options = args.options();
        assert_eq!(options.mode.as_deref(), Some("low-carbon"));
        assert_eq!(options.minimum_percentage, Some(70.0));
        assert_eq!(options.api_key.as_deref(), Some("token"));
    }

    #[test]
    fn test_invalid_mode_is_rejected_by_parser() {
        let _ = PowerArgs::try_parse_from(["power", "DE", "--mode", "limit"]).unwrap_err();
    }

    #[tokio::test]
    async fn test_out_of_range_percentage_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("grid-aware.toml");
        std::fs::write(&config, "").unwrap();

        let args = parse(&["DE", "--minimum-percentage", "150", "--api-key", "token", "--config", config.to_str().unwrap()]);

        let mut host = TestHost::new();
        let err = check_power(&mut host, &args).await.unwrap_err();
        assert!(err.to_string().contains("minimumPercentage"));
        assert!(host.output_str().is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("grid-aware.toml");
        std::fs::write(&config, "base_url = \"http://127.0.0.1:9\"\n").unwrap();

        let mut args = parse(&["DE", "--color", "never", "--config", config.to_str().unwrap()]);
        args.common.api_key = None;

        let mut host = TestHost::new();
        let err = check_power(&mut host, &args).await.unwrap_err();

        assert!(err.to_string().contains("Zone and API key are both required"));
        assert!(host.error_str().contains("Zone and API key are both required"));
        assert_eq!(host.exit_code, Some(1));
    }
}
