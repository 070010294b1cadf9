//! Calculation result models for the settlement engine.
//!
//! Every calculator returns a [`CalculationResult`] pairing its own outcome
//! fields with the completed [`Ledger`] and a fixed [`LegalBasis`] citation.

use serde::{Deserialize, Serialize};

use super::Ledger;

/// Identifies which calculator produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    /// Early termination of an experience contract.
    ExperienceBreach,
    /// Proportional vacation accrual in twelfths.
    VacationAccrual,
    /// Hazard premium (periculosidade).
    HazardPremium,
    /// Unhealthiness premium (insalubridade).
    UnhealthinessPremium,
    /// Termination inside the risk window.
    RiskPeriodPenalty,
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculatorKind::ExperienceBreach => write!(f, "experience_breach"),
            CalculatorKind::VacationAccrual => write!(f, "vacation_accrual"),
            CalculatorKind::HazardPremium => write!(f, "hazard_premium"),
            CalculatorKind::UnhealthinessPremium => write!(f, "unhealthiness_premium"),
            CalculatorKind::RiskPeriodPenalty => write!(f, "risk_period_penalty"),
        }
    }
}

/// The statutory citation shown alongside a result.
///
/// # Example
///
/// ```
/// use settlement_engine::models::LegalBasis;
///
/// let basis = LegalBasis::new("Hazard premium", "CLT, art. 193", "30% over base salary");
/// assert_eq!(basis.article, "CLT, art. 193");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalBasis {
    /// Short title of the entitlement.
    pub title: String,
    /// The article(s) of law the calculation rests on.
    pub article: String,
    /// Plain-language summary of the rule.
    pub description: String,
}

impl LegalBasis {
    /// Creates a citation block.
    pub fn new(
        title: impl Into<String>,
        article: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            article: article.into(),
            description: description.into(),
        }
    }
}

/// The complete result of one calculator invocation.
///
/// Results carry no identifier or timestamp: the same inputs always
/// serialize to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult<T> {
    /// Which calculator produced this result.
    pub calculator: CalculatorKind,
    /// The calculator-specific output fields.
    pub outcome: T,
    /// Ordered audit trail of the computation.
    pub ledger: Ledger,
    /// Citation of the applicable law.
    pub legal_basis: LegalBasis,
    /// Explanatory notes for the reader.
    #[serde(default)]
    pub notes: Vec<String>,
}
