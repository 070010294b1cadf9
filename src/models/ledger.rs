//! The computation ledger attached to every calculation result.
//!
//! A [`Ledger`] is the ordered narrative of a calculation: each step a
//! calculator takes appends one [`LedgerEntry`], and the finished ledger is
//! handed to the caller untouched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The value shown for a ledger entry.
///
/// Serialized untagged, so amounts appear as decimal strings, counts as
/// JSON numbers and text as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerValue {
    /// A whole count (days, months, units).
    Count(i64),
    /// A monetary amount, already rounded for display.
    Amount(Decimal),
    /// Free text such as a date or a classification.
    Text(String),
}

impl From<i64> for LedgerValue {
    fn from(value: i64) -> Self {
        LedgerValue::Count(value)
    }
}

impl From<u32> for LedgerValue {
    fn from(value: u32) -> Self {
        LedgerValue::Count(i64::from(value))
    }
}

impl From<Decimal> for LedgerValue {
    fn from(value: Decimal) -> Self {
        LedgerValue::Amount(value)
    }
}

impl From<String> for LedgerValue {
    fn from(value: String) -> Self {
        LedgerValue::Text(value)
    }
}

impl From<&str> for LedgerValue {
    fn from(value: &str) -> Self {
        LedgerValue::Text(value.to_string())
    }
}

/// A single step in the computation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The sequential step number, starting at 1.
    pub step: u32,
    /// What this step computed.
    pub label: String,
    /// How the value was obtained, when there is a formula to show.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub formula: Option<String>,
    /// The figure produced by this step.
    pub value: LedgerValue,
    /// Marks the final total of the calculation.
    pub highlighted: bool,
}

/// An append-only, ordered sequence of [`LedgerEntry`] values.
///
/// The ledger performs no validation: it records whatever narrative the
/// calculator gives it, numbering steps as they arrive.
///
/// # Example
///
/// ```
/// use settlement_engine::models::Ledger;
/// use rust_decimal::Decimal;
///
/// let mut ledger = Ledger::new();
/// ledger.append("Base salary", None::<String>, Decimal::new(100000, 2));
/// ledger.append_highlighted("Total", Some("1000.00 x 30%"), Decimal::new(30000, 2));
///
/// assert_eq!(ledger.len(), 2);
/// assert_eq!(ledger.entries()[1].step, 2);
/// assert_eq!(ledger.highlighted().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a regular entry with the next step number.
    pub fn append<L, F, V>(&mut self, label: L, formula: Option<F>, value: V)
    where
        L: Into<String>,
        F: Into<String>,
        V: Into<LedgerValue>,
    {
        self.push(label.into(), formula.map(Into::into), value.into(), false);
    }

    /// Appends the highlighted entry carrying the final total.
    pub fn append_highlighted<L, F, V>(&mut self, label: L, formula: Option<F>, value: V)
    where
        L: Into<String>,
        F: Into<String>,
        V: Into<LedgerValue>,
    {
        self.push(label.into(), formula.map(Into::into), value.into(), true);
    }

    fn push(&mut self, label: String, formula: Option<String>, value: LedgerValue, highlighted: bool) {
        let step = self.entries.len() as u32 + 1;
        self.entries.push(LedgerEntry {
            step,
            label,
            formula,
            value,
            highlighted,
        });
    }

    /// Returns the entries in the order they were appended.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry has been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the highlighted entries.
    pub fn highlighted(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|entry| entry.highlighted)
    }
}
