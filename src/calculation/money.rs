//! Monetary rounding and input checks.
//!
//! Amounts are carried at full precision through every calculation and only
//! rounded when written into a result field.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds an amount to centavos, always leaving exactly two fractional digits.
///
/// Midpoints round away from zero.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from(300)).to_string(), "300.00");
/// assert_eq!(round_money(Decimal::from_str("66.665").unwrap()).to_string(), "66.67");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Formats an amount in reais for ledger formulas, e.g. `R$ 1300.00`.
pub fn brl(amount: Decimal) -> String {
    format!("R$ {}", round_money(amount))
}

/// Formats a fractional rate as a percentage, e.g. `0.08` as `8%`.
pub fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Largest amount accepted as a monetary input (one trillion reais).
///
/// Keeps every product and sum a calculator forms well inside the range of
/// [`Decimal`], with room for two fractional digits.
pub fn max_money_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// Rejects amounts that are zero, negative or above [`max_money_amount`].
pub fn ensure_positive(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must be greater than zero, got {}", amount),
        ));
    }
    ensure_within_limit(field, amount)
}

/// Rejects negative amounts and amounts above [`max_money_amount`].
pub fn ensure_non_negative(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", amount),
        ));
    }
    ensure_within_limit(field, amount)
}

fn ensure_within_limit(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount > max_money_amount() {
        return Err(EngineError::invalid_input(
            field,
            format!("must not exceed {}, got {}", max_money_amount(), amount),
        ));
    }
    Ok(())
}
