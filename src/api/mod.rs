//! HTTP API module for the settlement engine.
//!
//! Exposes each calculator as a JSON endpoint. Request bodies carry dates
//! as `YYYY-MM-DD` strings and money as decimal strings or numbers;
//! responses are the calculator's [`CalculationResult`](crate::models::CalculationResult).

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{CORRELATION_ID_HEADER, create_router};
pub use request::{
    ExperienceBreachRequest, HazardPremiumRequest, LeaveIntervalRequest, RiskPeriodRequest,
    UnhealthinessPremiumRequest, VacationAccrualRequest, parse_date,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
