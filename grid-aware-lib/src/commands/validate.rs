use super::Host;
use super::config::Config;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `grid-aware.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let base_dir = Utf8Path::new(".");
    let config_path = args.config.clone().or_else(|| Config::find(base_dir));

    // `Config::load` runs the same validation the checkers apply to their options
    match Config::load(base_dir, config_path.as_ref()) {
        Ok(_) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn write_config(dir: &tempfile::TempDir, name: &str, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        std::fs::write(&path, text).expect("Failed to write test config");
        path
    }

    fn validate(path: Utf8PathBuf) -> (Result<()>, TestHost) {
        let mut host = TestHost::new();
        let result = validate_config(&mut host, &ValidateArgs { config: Some(path) });
        (result, host)
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_default_config_is_valid() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = Utf8PathBuf::try_from(temp_dir.path().join("grid-aware.toml")).unwrap();

        let mut init_host = TestHost::new();
        init_config(&mut init_host, &InitArgs { output: Some(config_path.clone()) }).expect("init_config should succeed");

        let (result, host) = validate(config_path);
        assert!(result.is_ok(), "Default configuration should validate successfully: {result:?}");
        assert!(host.output_str().starts_with("Configuration file is valid\nConfig file: "));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_empty_config_is_valid() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = write_config(&temp_dir, "empty.toml", "# Empty config file\n");

        let (result, _) = validate(config_path);
        assert!(result.is_ok(), "Empty config should be valid (uses defaults)");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_toml_syntax() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = write_config(&temp_dir, "invalid_syntax.toml", "[intensity\nmode = \"limit\"\n");

        let (result, host) = validate(config_path);
        assert!(result.unwrap_err().to_string().contains("parsing configuration file"));
        assert!(host.error_str().starts_with("❌ Configuration validation failed: "));
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unknown_field() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = write_config(&temp_dir, "unknown_field.toml", "[power]\nmode = \"renewable\"\nthreshold = 40\n");

        let (result, host) = validate(config_path);
        assert!(result.is_err(), "Unknown field should fail validation");
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_intensity_mode() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = write_config(&temp_dir, "bad_mode.toml", "[intensity]\nmode = \"low-carbon\"\n");

        let (result, host) = validate(config_path);
        assert!(result.unwrap_err().to_string().contains("Invalid mode. Mode must be 'level', 'average' or 'limit'."));
        assert!(host.error_str().contains("invalid [intensity] configuration"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_power_percentage() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = write_config(&temp_dir, "bad_percentage.toml", "[power]\nminimum_percentage = -5\n");

        let (result, _) = validate(config_path);
        assert!(result.unwrap_err().to_string().contains("invalid [power] configuration"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_data_provider() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = write_config(&temp_dir, "bad_provider.toml", "data_provider = \"wattTime\"\n");

        let (result, _) = validate(config_path);
        assert!(result.unwrap_err().to_string().contains("Data provider must be one of electricityMaps"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_missing_reference_table() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = write_config(
            &temp_dir,
            "missing_table.toml",
            "country_codes = \"/no/such/codes.csv\"\naverage_intensities = \"/no/such/averages.csv\"\n",
        );

        let (result, _) = validate(config_path);
        assert!(result.unwrap_err().to_string().contains("codes.csv"));
    }
}
