//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading wage
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Region;

use super::types::{PayConfig, TaxConfig, WageConfig};

/// Loads and provides access to wage configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query tax bands and regional multipliers.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/uk/
/// ├── tax.yaml   # Income tax, National Insurance and student loan bands
/// └── pay.yaml   # Pay period factors, overtime and regional multipliers
/// ```
///
/// # Example
///
/// ```no_run
/// use tradepay_engine::config::ConfigLoader;
/// use tradepay_engine::models::Region;
///
/// let loader = ConfigLoader::load("./config/uk").unwrap();
/// println!("Tax year: {}", loader.config().tax().tax_year);
/// println!("London multiplier: {}", loader.regional_multiplier(&Region::London));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: WageConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/uk")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either required file is missing
    /// - Either file contains invalid YAML
    /// - Any required field is missing from the configuration
    /// - The bands are not in ascending order
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax = Self::load_yaml::<TaxConfig>(&path.join("tax.yaml"))?;
        let pay = Self::load_yaml::<PayConfig>(&path.join("pay.yaml"))?;

        let config = WageConfig::new(tax, pay);
        Self::check_bands(&config, path)?;

        tracing::debug!(
            path = %path.display(),
            tax_year = %config.tax().tax_year,
            "Loaded wage configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: WageConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects band edges that are out of order or negative.
    fn check_bands(config: &WageConfig, dir: &Path) -> EngineResult<()> {
        let bands = &config.tax().income_tax;
        let ni = &config.tax().national_insurance;

        let ordered = Decimal::ZERO <= bands.personal_allowance
            && bands.personal_allowance <= bands.basic_rate_threshold
            && bands.basic_rate_threshold <= bands.higher_rate_threshold
            && Decimal::ZERO <= ni.lower_threshold
            && ni.lower_threshold <= ni.upper_threshold;

        if ordered {
            Ok(())
        } else {
            Err(EngineError::ConfigParseError {
                path: dir.join("tax.yaml").display().to_string(),
                message: "tax band thresholds must be non-negative and ascending".to_string(),
            })
        }
    }

    /// Returns the underlying wage configuration.
    pub fn config(&self) -> &WageConfig {
        &self.config
    }

    /// Gets the hourly rate multiplier for a region.
    ///
    /// Regions without an entry in `pay.yaml` use a multiplier of 1.0.
    pub fn regional_multiplier(&self, region: &Region) -> Decimal {
        self.config.regional_multiplier(region.code())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(WageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/uk"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().tax().tax_year, "2025/26");
    }

    #[test]
    fn test_loaded_configuration_matches_builtin_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config(), &WageConfig::default());
    }

    #[test]
    fn test_regional_multiplier_for_london() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.regional_multiplier(&Region::London), dec("1.25"));
    }

    #[test]
    fn test_regional_multiplier_for_unlisted_region() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let region = Region::Other("isle_of_man".to_string());
        assert_eq!(loader.regional_multiplier(&region), Decimal::ONE);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("tax.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = std::env::temp_dir().join(format!("tradepay-bad-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tax.yaml"), "tax_year: [unclosed").unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("tax.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_descending_bands() {
        let dir = std::env::temp_dir().join(format!("tradepay-bands-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        let tax = fs::read_to_string(Path::new(config_path()).join("tax.yaml"))
            .unwrap()
            .replace("basic_rate_threshold: 50270", "basic_rate_threshold: 10000");
        fs::write(dir.join("tax.yaml"), tax).unwrap();
        fs::copy(Path::new(config_path()).join("pay.yaml"), dir.join("pay.yaml")).unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }
}
