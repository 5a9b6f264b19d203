use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::checks::{GridIntensity, IntensityConfig, IntensityOptions};
use crate::evaluation::{CheckOutcome, IntensityMode};
use clap::Parser;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct IntensityArgs {
    /// How to judge the reading (overrides the configuration file)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<IntensityMode>,

    /// Carbon intensity in gCO2eq/kWh above which the grid is unfavorable in `limit` mode
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub minimum_intensity: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl IntensityArgs {
    fn options(&self) -> IntensityOptions {
        IntensityOptions {
            mode: self.mode.map(|m| m.to_string()),
            minimum_intensity: self.minimum_intensity,
            data_provider: self.common.data_provider_key(),
            api_key: self.common.api_key.clone(),
        }
    }
}

pub async fn check_intensity<H: Host>(host: &mut H, args: &IntensityArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let config = IntensityConfig::from_options(&common.config.intensity_options())?.merge(&args.options())?;
    let provider = common.provider_client(config.data_provider())?;
    let tables = Arc::clone(&common.tables);

    let checker = GridIntensity::with_provider(config, provider, tables);
    let outcome = CheckOutcome::from(checker.check(&args.common.location_value()).await);

    common.report(&outcome)
}
