use crate::Result;
use crate::checks::{
    DEFAULT_MINIMUM_INTENSITY, DEFAULT_MINIMUM_PERCENTAGE, IntensityConfig, IntensityOptions, PowerConfig, PowerOptions,
};
use crate::evaluation::{IntensityMode, PowerMode};
use crate::providers::DataProvider;
use crate::reference::ReferenceTables;
use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::sync::Arc;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// The name of the configuration file looked up in the current and user configuration directories
pub const CONFIG_FILE_NAME: &str = "grid-aware.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which data provider to query
    #[serde(default = "default_data_provider")]
    pub data_provider: String,

    /// Replacement for the provider's API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// CSV file mapping alpha-2 to alpha-3 country codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_codes: Option<Utf8PathBuf>,

    /// CSV file with the average carbon intensity of each alpha-3 country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_intensities: Option<Utf8PathBuf>,

    #[serde(default)]
    pub intensity: IntensitySection,

    #[serde(default)]
    pub power: PowerSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntensitySection {
    #[serde(default = "default_intensity_mode")]
    pub mode: String,

    #[serde(default = "default_minimum_intensity")]
    pub minimum_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PowerSection {
    #[serde(default = "default_power_mode")]
    pub mode: String,

    #[serde(default = "default_minimum_percentage")]
    pub minimum_percentage: f64,
}

fn default_data_provider() -> String {
    DataProvider::default().to_string()
}

fn default_intensity_mode() -> String {
    IntensityMode::default().to_string()
}

const fn default_minimum_intensity() -> f64 {
    DEFAULT_MINIMUM_INTENSITY
}

fn default_power_mode() -> String {
    PowerMode::default().to_string()
}

const fn default_minimum_percentage() -> f64 {
    DEFAULT_MINIMUM_PERCENTAGE
}

impl Default for IntensitySection {
    fn default() -> Self {
        Self {
            mode: default_intensity_mode(),
            minimum_intensity: default_minimum_intensity(),
        }
    }
}

impl Default for PowerSection {
    fn default() -> Self {
        Self {
            mode: default_power_mode(),
            minimum_percentage: default_minimum_percentage(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `grid-aware.toml` is looked up in `base_dir` and then in the user's
    /// configuration directory.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        Self::load_with_tables(base_dir, config_path).map(|(config, _)| config)
    }

    /// Like [`Config::load`], also returning the reference tables that validation loaded.
    ///
    /// Relative `country_codes` and `average_intensities` paths are resolved against the directory
    /// holding the configuration file.
    pub fn load_with_tables(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Arc<ReferenceTables>)> {
        let path = match config_path {
            Some(path) => path.clone(),
            None => match Self::find(base_dir) {
                Some(path) => path,
                None => return Ok((Self::default(), ReferenceTables::builtin())),
            },
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound && config_path.is_none() => {
                return Ok((Self::default(), ReferenceTables::builtin()));
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("reading grid-aware configuration file '{path}'")),
        };

        let mut config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;
        config.resolve_paths(path.parent().unwrap_or_else(|| Utf8Path::new(".")));
        let tables = config.validate()?;

        Ok((config, tables))
    }

    fn resolve_paths(&mut self, config_dir: &Utf8Path) {
        for table in [&mut self.country_codes, &mut self.average_intensities].into_iter().flatten() {
            if table.is_relative() {
                *table = config_dir.join(&*table);
            }
        }
    }

    /// The configuration file that [`Config::load`] would read when no explicit path is given.
    #[must_use]
    pub fn find(base_dir: &Utf8Path) -> Option<Utf8PathBuf> {
        let local = base_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }

        user_config_path().filter(|path| path.is_file())
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// Modes, thresholds, and the data provider go through the same validation as the library's
    /// setters. Replacement reference tables are loaded to make sure they parse, and returned.
    pub fn validate(&self) -> Result<Arc<ReferenceTables>> {
        let _ = IntensityConfig::from_options(&self.intensity_options()).map_err(|e| app_err!("invalid [intensity] configuration: {e}"))?;
        let _ = PowerConfig::from_options(&self.power_options()).map_err(|e| app_err!("invalid [power] configuration: {e}"))?;
        self.reference_tables()
    }

    /// The `[intensity]` section and top-level provider settings as checker options.
    #[must_use]
    pub fn intensity_options(&self) -> IntensityOptions {
        IntensityOptions {
            mode: Some(self.intensity.mode.clone()),
            minimum_intensity: Some(self.intensity.minimum_intensity),
            data_provider: Some(self.data_provider.clone()),
            api_key: None,
        }
    }

    /// The `[power]` section and top-level provider settings as checker options.
    #[must_use]
    pub fn power_options(&self) -> PowerOptions {
        PowerOptions {
            mode: Some(self.power.mode.clone()),
            minimum_percentage: Some(self.power.minimum_percentage),
            data_provider: Some(self.data_provider.clone()),
            api_key: None,
        }
    }

    /// The reference tables named by the configuration, or the built-in ones.
    pub fn reference_tables(&self) -> Result<Arc<ReferenceTables>> {
        match (&self.country_codes, &self.average_intensities) {
            (None, None) => Ok(ReferenceTables::builtin()),
            (Some(country_codes), Some(average_intensities)) => {
                Ok(Arc::new(ReferenceTables::from_csv_files(country_codes, average_intensities)?))
            }
            _ => bail!("country_codes and average_intensities must be set together"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

fn user_config_path() -> Option<Utf8PathBuf> {
    let dirs = BaseDirs::new()?;
    let path = dirs.config_dir().join("grid-aware").join(CONFIG_FILE_NAME);
    Utf8PathBuf::from_path_buf(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_default_config_is_valid() {
        let _ = Config::default().validate().unwrap();
    }

    #[test]
    fn test_default_config_matches_library_defaults() {
        let config = Config::default();
        assert_eq!(config.intensity, IntensitySection::default());
        assert_eq!(config.power, PowerSection::default());
        assert_eq!(config.data_provider, "electricityMaps");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let config = Config {
            intensity: IntensitySection {
                mode: "renewable".to_string(),
                ..IntensitySection::default()
            },
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invalid [intensity] configuration: Invalid mode."));
    }

    #[test]
    fn test_out_of_range_percentage_is_rejected() {
        let config = Config {
            power: PowerSection {
                minimum_percentage: 120.0,
                ..PowerSection::default()
            },
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("minimumPercentage must be a number between 0 and 100"));
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let config = Config {
            data_provider: "wattTime".to_string(),
            ..Config::default()
        };

        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_reference_tables_must_be_paired() {
        let config = Config {
            country_codes: Some(Utf8PathBuf::from("codes.csv")),
            ..Config::default()
        };

        let err = config.reference_tables().unwrap_err();
        assert!(err.to_string().contains("must be set together"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = Utf8PathBuf::try_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        Config::save_default(&output_path).unwrap();

        let loaded = Config::load(&Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap(), Some(&output_path)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_finds_file_in_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "[intensity]\nmode = \"limit\"\nminimum_intensity = 250\n");
        let base_dir = path.parent().unwrap();

        assert_eq!(Config::find(base_dir), Some(path.clone()));

        let config = Config::load(base_dir, None).unwrap();
        assert_eq!(config.intensity.mode, "limit");
        assert!((config.intensity.minimum_intensity - 250.0).abs() < f64::EPSILON);
        assert_eq!(config.power, PowerSection::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_explicit_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = Utf8PathBuf::try_from(tmp.path().join("missing.toml")).unwrap();

        let err = Config::load(Utf8Path::new("."), Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_unknown_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "minimum_intensity = 300\n");

        let _ = Config::load(Utf8Path::new("."), Some(&path)).unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_with_reference_tables() {
        let tmp = tempfile::tempdir().unwrap();
        let codes = Utf8PathBuf::try_from(tmp.path().join("codes.csv")).unwrap();
        let averages = Utf8PathBuf::try_from(tmp.path().join("averages.csv")).unwrap();
        fs::write(&codes, "alpha2,alpha3\nZZ,ZZZ\n").unwrap();
        fs::write(&averages, "alpha3,intensity\nZZZ,99\n").unwrap();

        let path = write_config(
            &tmp,
            &format!("country_codes = \"{codes}\"\naverage_intensities = \"{averages}\"\n"),
        );

        let (_, tables) = Config::load_with_tables(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(tables.resolve_average("ZZ"), Some(99.0));
        assert_eq!(tables.resolve_average("DE"), None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_relative_table_paths_follow_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let tables_dir = tmp.path().join("tables");
        fs::create_dir(&tables_dir).unwrap();
        fs::write(tables_dir.join("codes.csv"), "alpha2,alpha3\nZZ,ZZZ\n").unwrap();
        fs::write(tables_dir.join("averages.csv"), "alpha3,intensity\nZZZ,42\n").unwrap();

        let path = write_config(
            &tmp,
            "country_codes = \"tables/codes.csv\"\naverage_intensities = \"tables/averages.csv\"\n",
        );
        let config_dir = path.parent().unwrap().to_path_buf();

        // Loaded from a base directory that does not contain the tables
        let other_dir = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(other_dir.path().to_path_buf()).unwrap();

        let (config, tables) = Config::load_with_tables(&base_dir, Some(&path)).unwrap();
        assert_eq!(config.country_codes, Some(config_dir.join("tables/codes.csv")));
        assert_eq!(config.average_intensities, Some(config_dir.join("tables/averages.csv")));
        assert_eq!(tables.resolve_average("ZZ"), Some(42.0));
    }

    #[test]
    #[cfg(unix)]
    fn test_absolute_table_paths_are_kept() {
        let mut config = Config {
            country_codes: Some(Utf8PathBuf::from("/data/codes.csv")),
            average_intensities: Some(Utf8PathBuf::from("averages.csv")),
            ..Config::default()
        };

        config.resolve_paths(Utf8Path::new("/etc/grid-aware"));
        assert_eq!(config.country_codes, Some(Utf8PathBuf::from("/data/codes.csv")));
        assert_eq!(config.average_intensities, Some(Utf8PathBuf::from("/etc/grid-aware/averages.csv")));
    }
}
