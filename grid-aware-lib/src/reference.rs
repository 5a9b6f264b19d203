//! Static reference data for the regional-average evaluation mode
//!
//! Two tables are needed to resolve the average carbon intensity of a region reported by a
//! provider:
//!
//! - **Country codes**: maps ISO 3166 alpha-2 codes to alpha-3 codes, since providers commonly
//!   report 2-letter zones while the average table is keyed by 3-letter codes
//! - **Average intensities**: annual average carbon intensity per country in gCO2eq/kWh
//!
//! A built-in set of both tables is compiled into the library. Replacements can be loaded from
//! CSV files with the same layout as the embedded ones:
//!
//! ```text
//! alpha2,alpha3,name
//! DE,DEU,Germany
//!
//! alpha3,intensity
//! DEU,380.95
//! ```
//!
//! All lookups are case-insensitive.

use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::sync::{Arc, LazyLock};

const LOG_TARGET: &str = " reference";

const BUILTIN_COUNTRY_CODES: &str = include_str!("../data/country_codes.csv");
const BUILTIN_AVERAGE_INTENSITIES: &str = include_str!("../data/average_intensity.csv");

static BUILTIN: LazyLock<Arc<ReferenceTables>> = LazyLock::new(|| {
    Arc::new(
        ReferenceTables::from_csv(BUILTIN_COUNTRY_CODES.as_bytes(), BUILTIN_AVERAGE_INTENSITIES.as_bytes())
            .expect("embedded reference tables should parse"),
    )
});

#[derive(Debug, Deserialize)]
struct CountryCodeRow<'a> {
    alpha2: &'a str,
    alpha3: &'a str,
}

#[derive(Debug, Deserialize)]
struct AverageIntensityRow<'a> {
    alpha3: &'a str,
    intensity: f64,
}

/// Read-only lookup tables used to resolve a region's average carbon intensity.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    alpha3_by_alpha2: HashMap<String, String>,
    average_by_alpha3: HashMap<String, f64>,
}

impl ReferenceTables {
    /// Build tables from `(alpha2, alpha3)` pairs and `(alpha3, average intensity)` pairs.
    pub fn new<C, A>(country_codes: C, average_intensities: A) -> Self
    where
        C: IntoIterator<Item = (&'static str, &'static str)>,
        A: IntoIterator<Item = (&'static str, f64)>,
    {
        let mut tables = Self::default();
        for (alpha2, alpha3) in country_codes {
            tables.insert_country_code(alpha2, alpha3);
        }

        for (alpha3, intensity) in average_intensities {
            tables.insert_average(alpha3, intensity);
        }

        tables
    }

    /// The tables compiled into the library.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Parse tables from CSV data with `alpha2,alpha3[,name]` and `alpha3,intensity` columns.
    pub fn from_csv(country_codes: impl Read, average_intensities: impl Read) -> Result<Self> {
        let mut tables = Self::default();

        let mut reader = csv::Reader::from_reader(country_codes);
        let headers = reader.headers().into_app_err("reading country code headers")?.clone();
        let mut record = csv::StringRecord::new();
        while reader.read_record(&mut record).into_app_err("reading country code record")? {
            let row: CountryCodeRow<'_> = record.deserialize(Some(&headers)).into_app_err("parsing country code record")?;
            tables.insert_country_code(row.alpha2, row.alpha3);
        }

        let mut reader = csv::Reader::from_reader(average_intensities);
        let headers = reader.headers().into_app_err("reading average intensity headers")?.clone();
        while reader.read_record(&mut record).into_app_err("reading average intensity record")? {
            let row: AverageIntensityRow<'_> = record.deserialize(Some(&headers)).into_app_err("parsing average intensity record")?;
            tables.insert_average(row.alpha3, row.intensity);
        }

        log::debug!(
            target: LOG_TARGET,
            "Loaded {} country codes and {} average intensities",
            tables.alpha3_by_alpha2.len(),
            tables.average_by_alpha3.len()
        );

        Ok(tables)
    }

    /// Load tables from a pair of CSV files.
    pub fn from_csv_files(country_codes: &Utf8Path, average_intensities: &Utf8Path) -> Result<Self> {
        let codes = File::open(country_codes).into_app_err_with(|| format!("opening country code table '{country_codes}'"))?;
        let averages =
            File::open(average_intensities).into_app_err_with(|| format!("opening average intensity table '{average_intensities}'"))?;

        Self::from_csv(codes, averages)
    }

    /// Translate an alpha-2 code to its alpha-3 equivalent.
    #[must_use]
    pub fn alpha3(&self, alpha2: &str) -> Option<&str> {
        self.alpha3_by_alpha2.get(&alpha2.to_ascii_uppercase()).map(String::as_str)
    }

    /// The average carbon intensity for an alpha-3 code.
    #[must_use]
    pub fn average_intensity(&self, alpha3: &str) -> Option<f64> {
        self.average_by_alpha3.get(&alpha3.to_ascii_uppercase()).copied()
    }

    /// The average carbon intensity for a provider region.
    ///
    /// 2-letter regions are translated to alpha-3 first. Anything else is looked up as is.
    #[must_use]
    pub fn resolve_average(&self, region: &str) -> Option<f64> {
        if region.len() == 2 {
            self.alpha3(region).and_then(|alpha3| self.average_intensity(alpha3))
        } else {
            self.average_intensity(region)
        }
    }

    fn insert_country_code(&mut self, alpha2: &str, alpha3: &str) {
        let _ = self
            .alpha3_by_alpha2
            .insert(alpha2.trim().to_ascii_uppercase(), alpha3.trim().to_ascii_uppercase());
    }

    fn insert_average(&mut self, alpha3: &str, intensity: f64) {
        let _ = self.average_by_alpha3.insert(alpha3.trim().to_ascii_uppercase(), intensity);
    }
}
