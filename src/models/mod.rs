//! Core data models for the settlement engine.
//!
//! This module contains the ledger, date interval, hazard grade and result
//! types shared by every calculator.

mod calculation_result;
mod date_interval;
mod hazard_grade;
mod ledger;

pub use calculation_result::{CalculationResult, CalculatorKind, LegalBasis};
pub use date_interval::DateInterval;
pub use hazard_grade::HazardGrade;
pub use ledger::{Ledger, LedgerEntry, LedgerValue};
