//! Unhealthiness grades (graus de insalubridade).

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The grade of exposure to unhealthy conditions, as set by NR-15.
///
/// Each grade maps to a fixed percentage of the minimum wage.
///
/// # Example
///
/// ```
/// use settlement_engine::models::HazardGrade;
/// use rust_decimal::Decimal;
///
/// let grade: HazardGrade = "maximo".parse().unwrap();
/// assert_eq!(grade, HazardGrade::Maximum);
/// assert_eq!(grade.percentage(), Decimal::new(40, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardGrade {
    /// Minimum grade: 10%.
    Minimal,
    /// Medium grade: 20%.
    Medium,
    /// Maximum grade: 40%.
    Maximum,
}

impl HazardGrade {
    /// The premium rate for this grade, as a fraction.
    pub fn percentage(self) -> Decimal {
        match self {
            HazardGrade::Minimal => Decimal::new(10, 2),
            HazardGrade::Medium => Decimal::new(20, 2),
            HazardGrade::Maximum => Decimal::new(40, 2),
        }
    }

    /// Human-readable description of the grade.
    pub fn description(self) -> &'static str {
        match self {
            HazardGrade::Minimal => "Minimum grade (10% of the minimum wage)",
            HazardGrade::Medium => "Medium grade (20% of the minimum wage)",
            HazardGrade::Maximum => "Maximum grade (40% of the minimum wage)",
        }
    }
}

impl fmt::Display for HazardGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardGrade::Minimal => write!(f, "minimal"),
            HazardGrade::Medium => write!(f, "medium"),
            HazardGrade::Maximum => write!(f, "maximum"),
        }
    }
}

impl FromStr for HazardGrade {
    type Err = EngineError;

    /// Accepts English and Portuguese names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" | "minimum" | "minimo" | "mínimo" => Ok(HazardGrade::Minimal),
            "medium" | "medio" | "médio" => Ok(HazardGrade::Medium),
            "maximum" | "maximo" | "máximo" => Ok(HazardGrade::Maximum),
            _ => Err(EngineError::InvalidGrade {
                grade: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_grade_percentages() {
        assert_eq!(HazardGrade::Minimal.percentage(), dec("0.10"));
        assert_eq!(HazardGrade::Medium.percentage(), dec("0.20"));
        assert_eq!(HazardGrade::Maximum.percentage(), dec("0.40"));
    }

    #[test]
    fn test_parse_english_names() {
        assert_eq!("minimal".parse::<HazardGrade>().unwrap(), HazardGrade::Minimal);
        assert_eq!("Medium".parse::<HazardGrade>().unwrap(), HazardGrade::Medium);
        assert_eq!("MAXIMUM".parse::<HazardGrade>().unwrap(), HazardGrade::Maximum);
    }

    #[test]
    fn test_parse_portuguese_names() {
        assert_eq!("mínimo".parse::<HazardGrade>().unwrap(), HazardGrade::Minimal);
        assert_eq!("medio".parse::<HazardGrade>().unwrap(), HazardGrade::Medium);
        assert_eq!(" Máximo ".parse::<HazardGrade>().unwrap(), HazardGrade::Maximum);
    }

    #[test]
    fn test_unknown_grade_is_rejected() {
        match "extreme".parse::<HazardGrade>() {
            Err(EngineError::InvalidGrade { grade }) => assert_eq!(grade, "extreme"),
            other => panic!("Expected InvalidGrade, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_grade_is_rejected() {
        assert!(matches!(
            "".parse::<HazardGrade>(),
            Err(EngineError::InvalidGrade { .. })
        ));
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&HazardGrade::Maximum).unwrap();
        assert_eq!(json, "\"maximum\"");
        let grade: HazardGrade = serde_json::from_str("\"minimal\"").unwrap();
        assert_eq!(grade, HazardGrade::Minimal);
    }

    #[test]
    fn test_description_mentions_minimum_wage() {
        for grade in [HazardGrade::Minimal, HazardGrade::Medium, HazardGrade::Maximum] {
            assert!(grade.description().contains("minimum wage"));
        }
    }
}
