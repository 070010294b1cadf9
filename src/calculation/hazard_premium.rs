//! Hazard (periculosidade) and unhealthiness (insalubridade) premiums.
//!
//! Both premiums are a flat percentage over a base, but the bases differ:
//! the hazard premium applies to the employee's own salary, while the
//! unhealthiness premium applies to the national minimum wage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{CalculationResult, CalculatorKind, HazardGrade, Ledger, LegalBasis};

use super::money::{brl, ensure_positive, percent, round_money};

/// Note attached to both premium results explaining which base each uses.
pub const PREMIUM_BASE_NOTE: &str = "The hazard premium (periculosidade) is 30% of the employee's \
own base salary. The unhealthiness premium (insalubridade) is 10%, 20% or 40% of the national \
minimum wage, never of the employee's salary.";

/// Hazard premium rate (30%).
pub fn hazard_premium_rate() -> Decimal {
    Decimal::new(30, 2)
}

/// The result of a hazard premium calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardPremiumOutcome {
    /// The employee's base salary.
    pub salary: Decimal,
    /// The rate applied.
    pub rate: Decimal,
    /// Premium amount.
    pub premium: Decimal,
    /// Salary plus premium.
    pub total_salary: Decimal,
}

/// The result of an unhealthiness premium calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnhealthinessPremiumOutcome {
    /// The grade of exposure.
    pub grade: HazardGrade,
    /// The rate for the grade.
    pub rate: Decimal,
    /// Minimum wage used as the base.
    pub minimum_wage: Decimal,
    /// Premium amount.
    pub premium: Decimal,
}

/// Calculates the hazard premium over the employee's base salary.
///
/// # Arguments
///
/// * `salary` - The employee's monthly base salary
///
/// # Returns
///
/// A [`CalculationResult`] with the premium and total salary, or
/// `InvalidInput` when `salary` is not positive.
///
/// # Legal Reference
///
/// CLT art. 193, §1º.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::compute_hazard_premium;
/// use rust_decimal::Decimal;
///
/// let result = compute_hazard_premium(Decimal::from(1000)).unwrap();
/// assert_eq!(result.outcome.premium.to_string(), "300.00");
/// assert_eq!(result.outcome.total_salary.to_string(), "1300.00");
/// ```
pub fn compute_hazard_premium(
    salary: Decimal,
) -> EngineResult<CalculationResult<HazardPremiumOutcome>> {
    ensure_positive("salary", salary)?;

    let rate = hazard_premium_rate();
    let mut ledger = Ledger::new();

    ledger.append("Base salary", None::<String>, round_money(salary));
    ledger.append("Hazard premium rate", None::<String>, percent(rate));

    let premium = salary * rate;
    ledger.append(
        "Hazard premium",
        Some(format!("{} x {}", brl(salary), percent(rate))),
        round_money(premium),
    );

    let total_salary = salary + premium;
    ledger.append_highlighted(
        "Salary with hazard premium",
        Some(format!("{} + {}", brl(salary), brl(premium))),
        round_money(total_salary),
    );

    Ok(CalculationResult {
        calculator: CalculatorKind::HazardPremium,
        outcome: HazardPremiumOutcome {
            salary: round_money(salary),
            rate,
            premium: round_money(premium),
            total_salary: round_money(total_salary),
        },
        ledger,
        legal_basis: LegalBasis::new(
            "Hazard premium (adicional de periculosidade)",
            "CLT, art. 193, §1º",
            "Employees exposed to flammables, explosives, electricity, violence or \
             motorcycle traffic receive 30% over their base salary, excluding bonuses \
             and profit sharing.",
        ),
        notes: vec![PREMIUM_BASE_NOTE.to_string()],
    })
}

/// Calculates the unhealthiness premium for a grade over the minimum wage.
///
/// # Arguments
///
/// * `grade` - The grade of exposure set by NR-15
/// * `minimum_wage` - The national minimum wage in force
///
/// # Returns
///
/// A [`CalculationResult`] with the premium, or `InvalidInput` when the
/// minimum wage is not positive. Unknown grades are rejected earlier, when
/// parsing a [`HazardGrade`].
///
/// # Legal Reference
///
/// CLT art. 192.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::compute_unhealthiness_premium;
/// use settlement_engine::models::HazardGrade;
/// use rust_decimal::Decimal;
///
/// let result = compute_unhealthiness_premium(HazardGrade::Maximum, Decimal::new(141200, 2)).unwrap();
/// assert_eq!(result.outcome.premium.to_string(), "564.80");
/// ```
pub fn compute_unhealthiness_premium(
    grade: HazardGrade,
    minimum_wage: Decimal,
) -> EngineResult<CalculationResult<UnhealthinessPremiumOutcome>> {
    ensure_positive("minimum_wage", minimum_wage)?;

    let rate = grade.percentage();
    let mut ledger = Ledger::new();

    ledger.append("Minimum wage", None::<String>, round_money(minimum_wage));
    ledger.append(
        "Unhealthiness grade",
        Some(grade.description()),
        grade.to_string(),
    );

    let premium = minimum_wage * rate;
    ledger.append_highlighted(
        "Unhealthiness premium",
        Some(format!("{} x {}", brl(minimum_wage), percent(rate))),
        round_money(premium),
    );

    Ok(CalculationResult {
        calculator: CalculatorKind::UnhealthinessPremium,
        outcome: UnhealthinessPremiumOutcome {
            grade,
            rate,
            minimum_wage: round_money(minimum_wage),
            premium: round_money(premium),
        },
        ledger,
        legal_basis: LegalBasis::new(
            "Unhealthiness premium (adicional de insalubridade)",
            "CLT, art. 192",
            "Work above the tolerance limits of NR-15 entitles the employee to 10%, 20% \
             or 40% of the minimum wage according to the grade of exposure.",
        ),
        notes: vec![PREMIUM_BASE_NOTE.to_string()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::LedgerValue;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_hazard_premium_is_30_percent_of_salary() {
        let result = compute_hazard_premium(dec("1000")).unwrap();

        assert_eq!(result.outcome.premium, dec("300.00"));
        assert_eq!(result.outcome.total_salary, dec("1300.00"));
        assert_eq!(result.outcome.premium.to_string(), "300.00");
        assert_eq!(result.outcome.total_salary.to_string(), "1300.00");
    }

    #[test]
    fn test_hazard_premium_rounds_to_centavos() {
        let result = compute_hazard_premium(dec("2345.67")).unwrap();

        // 2345.67 x 0.30 = 703.701
        assert_eq!(result.outcome.premium.to_string(), "703.70");
        assert_eq!(result.outcome.total_salary.to_string(), "3049.37");
    }

    #[test]
    fn test_hazard_premium_rejects_non_positive_salary() {
        for salary in ["0", "-100"] {
            match compute_hazard_premium(dec(salary)) {
                Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "salary"),
                other => panic!("Expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_hazard_ledger_highlights_total_salary() {
        let result = compute_hazard_premium(dec("1000")).unwrap();
        let highlighted: Vec<_> = result.ledger.highlighted().collect();

        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].value, LedgerValue::Amount(dec("1300.00")));
        assert_eq!(result.ledger.len(), 4);
    }

    #[test]
    fn test_unhealthiness_maximum_grade() {
        let result = compute_unhealthiness_premium(HazardGrade::Maximum, dec("1412.00")).unwrap();

        assert_eq!(result.outcome.premium, dec("564.80"));
        assert_eq!(result.outcome.premium.to_string(), "564.80");
        assert_eq!(result.outcome.minimum_wage.to_string(), "1412.00");
        assert_eq!(result.outcome.rate, dec("0.40"));
    }

    #[test]
    fn test_unhealthiness_grades() {
        let minimal = compute_unhealthiness_premium(HazardGrade::Minimal, dec("1412.00")).unwrap();
        let medium = compute_unhealthiness_premium(HazardGrade::Medium, dec("1412.00")).unwrap();

        assert_eq!(minimal.outcome.premium.to_string(), "141.20");
        assert_eq!(medium.outcome.premium.to_string(), "282.40");
    }

    #[test]
    fn test_unhealthiness_rejects_non_positive_minimum_wage() {
        match compute_unhealthiness_premium(HazardGrade::Medium, Decimal::ZERO) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "minimum_wage"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_both_premiums_carry_the_base_comparison_note() {
        let hazard = compute_hazard_premium(dec("1000")).unwrap();
        let unhealthiness = compute_unhealthiness_premium(HazardGrade::Medium, dec("1412")).unwrap();

        assert_eq!(hazard.notes, vec![PREMIUM_BASE_NOTE.to_string()]);
        assert_eq!(unhealthiness.notes, hazard.notes);
        assert!(PREMIUM_BASE_NOTE.contains("base salary"));
        assert!(PREMIUM_BASE_NOTE.contains("minimum wage"));
    }

    #[test]
    fn test_unhealthiness_ledger_has_one_highlighted_entry() {
        let result = compute_unhealthiness_premium(HazardGrade::Minimal, dec("1412")).unwrap();
        let steps: Vec<u32> = result.ledger.entries().iter().map(|e| e.step).collect();

        assert_eq!(steps, vec![1, 2, 3]);
        assert_eq!(result.ledger.highlighted().count(), 1);
    }

    #[test]
    fn test_legal_bases_differ() {
        let hazard = compute_hazard_premium(dec("1000")).unwrap();
        let unhealthiness = compute_unhealthiness_premium(HazardGrade::Medium, dec("1412")).unwrap();

        assert!(hazard.legal_basis.article.contains("193"));
        assert!(unhealthiness.legal_basis.article.contains("192"));
    }
}
