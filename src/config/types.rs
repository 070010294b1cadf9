//! Configuration types for the legislation values the engine depends on.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a legislation configuration directory.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Metadata about the legislation set.
#[derive(Debug, Clone, Deserialize)]
pub struct LegislationMetadata {
    /// Short identifier (e.g., "CLT").
    pub code: String,
    /// The human-readable name of the legislation.
    pub name: String,
    /// The version or revision date of this configuration.
    pub version: String,
    /// URL to the official text.
    pub source_url: String,
}

/// A national minimum wage value and the date it took effect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MinimumWage {
    /// The date this value took effect.
    pub effective_date: NaiveDate,
    /// Monthly minimum wage in reais.
    pub monthly_amount: Decimal,
}

/// The complete legislation configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct LegislationConfig {
    /// Legislation metadata.
    metadata: LegislationMetadata,
    /// Minimum wages by effective date (sorted oldest first).
    minimum_wages: Vec<MinimumWage>,
}

impl LegislationConfig {
    /// Creates a new LegislationConfig from its component parts.
    pub fn new(metadata: LegislationMetadata, minimum_wages: Vec<MinimumWage>) -> Self {
        let mut sorted_wages = minimum_wages;
        sorted_wages.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            minimum_wages: sorted_wages,
        }
    }

    /// Returns the legislation metadata.
    pub fn metadata(&self) -> &LegislationMetadata {
        &self.metadata
    }

    /// Returns all minimum wage values, oldest first.
    pub fn minimum_wages(&self) -> &[MinimumWage] {
        &self.minimum_wages
    }

    /// Returns the minimum wage in force on `date`.
    pub fn minimum_wage_on(&self, date: NaiveDate) -> Option<&MinimumWage> {
        self.minimum_wages
            .iter()
            .rfind(|wage| wage.effective_date <= date)
    }

    /// Returns the most recent minimum wage configured.
    pub fn latest_minimum_wage(&self) -> Option<&MinimumWage> {
        self.minimum_wages.last()
    }
}
