//! Calculation logic for the settlement engine.
//!
//! This module contains the date-interval utilities, monetary rounding and
//! the four calculators: experience contract breach, proportional vacation
//! accrual, hazard/unhealthiness premiums and the risk-period penalty.
//! Every calculator is a pure function of its inputs.

mod date_interval;
mod experience_breach;
mod hazard_premium;
mod money;
mod risk_period;
mod vacation_accrual;

pub use date_interval::{
    completed_months, days_between, days_in_month, earlier, fractional_months, inclusive_days,
    later, merge_intervals, month_windows,
};
pub use experience_breach::{
    BreachAttribution, ExperienceBreachInput, ExperienceBreachOutcome, NOTICE_IN_LIEU_DAYS,
    compute_experience_breach, deposit_penalty_rate, statutory_deposit_rate,
};
pub use hazard_premium::{
    HazardPremiumOutcome, PREMIUM_BASE_NOTE, UnhealthinessPremiumOutcome, compute_hazard_premium,
    compute_unhealthiness_premium, hazard_premium_rate,
};
pub use money::{ensure_non_negative, ensure_positive, max_money_amount, round_money};
pub use risk_period::{
    RISK_WINDOW_DAYS, RiskPeriodInput, RiskPeriodOutcome, RiskWindowStatus,
    compute_risk_period_penalty, risk_period_penalty_rate,
};
pub use vacation_accrual::{
    MAX_TWELFTHS, MIN_DAYS_FOR_TWELFTH, MonthAccrual, VacationAccrualInput,
    VacationAccrualOutcome, compute_vacation_accrual, entitled_days_for_absences,
};
