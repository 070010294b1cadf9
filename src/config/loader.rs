//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading legislation
//! configuration from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{LegislationConfig, LegislationMetadata, MinimumWage};

/// Loads and provides access to legislation configuration.
///
/// # Directory Structure
///
/// ```text
/// config/clt/
/// ├── legislation.yaml        # Legislation metadata
/// └── minimum_wage/
///     └── 2024-01-01.yaml     # Minimum wage effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use settlement_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/clt")?;
/// let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// println!("Minimum wage: R$ {}", loader.minimum_wage_on(date)?);
/// # Ok::<(), settlement_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: LegislationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with `ConfigNotFound` when a file or the `minimum_wage`
    /// directory is missing or empty, and with `ConfigParseError` when a
    /// file is not valid YAML for its type.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<LegislationMetadata>(&path.join("legislation.yaml"))?;
        let minimum_wages = Self::load_minimum_wages(&path.join("minimum_wage"))?;

        Ok(Self {
            config: LegislationConfig::new(metadata, minimum_wages),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: LegislationConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let parsed = serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        debug!(path = %path_str, "Loaded configuration file");
        Ok(parsed)
    }

    /// Loads all minimum wage files from the given directory.
    fn load_minimum_wages(dir: &Path) -> EngineResult<Vec<MinimumWage>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut wages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                wages.push(Self::load_yaml::<MinimumWage>(&path)?);
            }
        }

        if wages.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no minimum wage files found)", dir_str),
            });
        }

        Ok(wages)
    }

    /// Returns the underlying legislation configuration.
    pub fn config(&self) -> &LegislationConfig {
        &self.config
    }

    /// Returns the legislation metadata.
    pub fn metadata(&self) -> &LegislationMetadata {
        self.config.metadata()
    }

    /// Gets the monthly minimum wage in force on a given date.
    ///
    /// Returns `MinimumWageNotFound` when the date precedes every
    /// configured value.
    pub fn minimum_wage_on(&self, date: NaiveDate) -> EngineResult<Decimal> {
        self.config
            .minimum_wage_on(date)
            .map(|wage| wage.monthly_amount)
            .ok_or(EngineError::MinimumWageNotFound { date })
    }

    /// Gets the most recent minimum wage configured.
    ///
    /// Always `Some` for a loader built by [`ConfigLoader::load`], which
    /// refuses an empty `minimum_wage` directory.
    pub fn current_minimum_wage(&self) -> Option<Decimal> {
        self.config
            .latest_minimum_wage()
            .map(|wage| wage.monthly_amount)
    }
}
