//! Application state for the settlement engine API.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};

/// Shared application state.
///
/// Holds the loaded legislation configuration; it is read-only once the
/// server starts, so handlers share it through an `Arc`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Loads the configuration directory and builds the state from it.
    pub fn from_config_dir<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Ok(Self::new(ConfigLoader::load(path)?))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The minimum wage in force on `reference_date`, or the latest one
    /// configured when no date is given.
    pub fn minimum_wage(&self, reference_date: Option<NaiveDate>) -> EngineResult<Decimal> {
        match reference_date {
            Some(date) => self.config.minimum_wage_on(date),
            None => self
                .config
                .current_minimum_wage()
                .ok_or_else(|| EngineError::ConfigNotFound {
                    path: "minimum_wage (no values configured)".to_string(),
                }),
        }
    }
}
