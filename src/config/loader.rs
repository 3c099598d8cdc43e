//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! rate tables from YAML files.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollConfig, PayrollMetadata, RateTable};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to look up rate tables by version or by date.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/hu/
/// ├── payroll.yaml          # Jurisdiction metadata
/// └── rate_tables/
///     ├── hu-2024-a.yaml    # One rate table per file
///     └── hu-2025-a.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/hu").unwrap();
///
/// let table = loader.get_rate_table("hu-2024-a").unwrap();
/// println!("Income tax rate: {}", table.income_tax_rate);
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let in_force = loader.rate_table_for_date(date).unwrap();
/// println!("In force on {}: {}", date, in_force.version);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/hu")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Two rate tables share a version
    /// - Any rate table fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PayrollMetadata>(&path.join("payroll.yaml"))?;
        let rate_tables = Self::load_rate_tables(&path.join("rate_tables"))?;

        info!(
            jurisdiction = %metadata.code,
            rate_tables = rate_tables.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(metadata, rate_tables),
        })
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

    /// Loads and validates all rate table files from the rate table directory.
    fn load_rate_tables(dir: &Path) -> EngineResult<Vec<RateTable>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tables = Vec::new();
        let mut seen = HashSet::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                continue;
            }

            let table = Self::load_yaml::<RateTable>(&path)?;
            table.validate()?;

            if !seen.insert(table.version.clone()) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate rate table version '{}'", table.version),
                });
            }

            debug!(
                version = %table.version,
                effective_date = %table.effective_date,
                "Loaded rate table"
            );
            tables.push(table);
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate table files found)", dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        self.config.metadata()
    }

    /// Returns every loaded rate table, oldest first.
    pub fn rate_tables(&self) -> &[RateTable] {
        self.config.rate_tables()
    }

    /// Gets a rate table by its version.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/hu")?;
    /// let table = loader.get_rate_table("hu-2024-b")?;
    /// assert!(table.union_due_reduces_tax_base);
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn get_rate_table(&self, version: &str) -> EngineResult<&RateTable> {
        self.config
            .rate_tables()
            .iter()
            .find(|t| t.version == version)
            .ok_or_else(|| EngineError::RateTableNotFound {
                version: version.to_string(),
            })
    }

    /// Gets the rate table in force on a given date.
    ///
    /// The most recent table whose effective date is on or before `date`
    /// wins.
    pub fn rate_table_for_date(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.config
            .rate_tables()
            .iter()
            .rfind(|t| t.effective_date <= date)
            .ok_or(EngineError::NoRateTableInForce { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/hu"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "HU");
        assert_eq!(loader.metadata().currency, "HUF");
        assert_eq!(loader.rate_tables().len(), 3);
    }

    #[test]
    fn test_rate_tables_are_sorted_oldest_first() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let versions: Vec<&str> = loader
            .rate_tables()
            .iter()
            .map(|t| t.version.as_str())
            .collect();
        assert_eq!(versions, vec!["hu-2024-a", "hu-2024-b", "hu-2025-a"]);
    }

    #[test]
    fn test_get_rate_table_by_version() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let table = loader.get_rate_table("hu-2024-a").unwrap();
        assert_eq!(table.health_insurance_rate, dec("0.185"));
        assert_eq!(table.pension_threshold, dec("500000"));
        assert_eq!(table.voluntary_pension_rate, dec("0.02"));
        assert!(!table.union_due_reduces_tax_base);
        assert!(table.overtime_includes_shift_differential);
    }

    #[test]
    fn test_historical_variants_differ() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let b = loader.get_rate_table("hu-2024-b").unwrap();
        assert_eq!(b.voluntary_pension_rate, dec("0.015"));
        assert_eq!(b.union_due_rate, dec("0.007"));
        assert_eq!(b.overtime_base_multiplier, dec("1.5"));
        assert!(!b.overtime_includes_shift_differential);
        assert!(b.union_due_reduces_tax_base);

        let c = loader.get_rate_table("hu-2025-a").unwrap();
        assert_eq!(c.overtime_base_multiplier, dec("1.25"));
        assert!(!c.overtime_includes_shift_differential);
    }

    #[test]
    fn test_get_unknown_rate_table_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_rate_table("hu-1999") {
            Err(EngineError::RateTableNotFound { version }) => {
                assert_eq!(version, "hu-1999");
            }
            other => panic!("Expected RateTableNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_table_for_date_picks_most_recent_in_force() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(
            loader.rate_table_for_date(date(2024, 3, 15)).unwrap().version,
            "hu-2024-a"
        );
        assert_eq!(
            loader.rate_table_for_date(date(2024, 7, 1)).unwrap().version,
            "hu-2024-b"
        );
        assert_eq!(
            loader.rate_table_for_date(date(2026, 10, 1)).unwrap().version,
            "hu-2025-a"
        );
    }

    #[test]
    fn test_rate_table_for_date_before_any_table_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let early = date(2020, 1, 1);
        match loader.rate_table_for_date(early) {
            Err(EngineError::NoRateTableInForce { date }) => assert_eq!(date, early),
            other => panic!("Expected NoRateTableInForce, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_metadata_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.metadata().code, "HU");
        assert_eq!(loader.metadata().name, "Hungarian payroll");
        assert!(loader.metadata().source_url.starts_with("https://"));
    }
}
