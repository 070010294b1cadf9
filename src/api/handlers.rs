//! HTTP request handlers for the settlement engine API.
//!
//! One POST endpoint per calculator. Every response, success or failure,
//! carries an `x-correlation-id` header matching the id in the logs.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    ExperienceBreachInput, RiskPeriodInput, VacationAccrualInput, compute_experience_breach,
    compute_hazard_premium, compute_risk_period_penalty, compute_unhealthiness_premium,
    compute_vacation_accrual,
};
use crate::error::EngineResult;
use crate::models::{CalculationResult, CalculatorKind};

use super::request::{
    ExperienceBreachRequest, HazardPremiumRequest, RiskPeriodRequest, UnhealthinessPremiumRequest,
    VacationAccrualRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Response header carrying the per-request correlation id.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/experience-breach", post(experience_breach_handler))
        .route("/vacation-accrual", post(vacation_accrual_handler))
        .route("/hazard-premium", post(hazard_premium_handler))
        .route("/unhealthiness-premium", post(unhealthiness_premium_handler))
        .route("/risk-period-penalty", post(risk_period_penalty_handler))
        .with_state(state)
}

/// Handler for POST /experience-breach.
async fn experience_breach_handler(
    payload: Result<Json<ExperienceBreachRequest>, JsonRejection>,
) -> Response {
    let calculator = CalculatorKind::ExperienceBreach;
    let correlation_id = start_request(calculator);

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result =
        ExperienceBreachInput::try_from(request).and_then(|input| compute_experience_breach(&input));
    respond(correlation_id, calculator, started, result)
}

/// Handler for POST /vacation-accrual.
async fn vacation_accrual_handler(
    payload: Result<Json<VacationAccrualRequest>, JsonRejection>,
) -> Response {
    let calculator = CalculatorKind::VacationAccrual;
    let correlation_id = start_request(calculator);

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result =
        VacationAccrualInput::try_from(request).and_then(|input| compute_vacation_accrual(&input));
    respond(correlation_id, calculator, started, result)
}

/// Handler for POST /hazard-premium.
async fn hazard_premium_handler(
    payload: Result<Json<HazardPremiumRequest>, JsonRejection>,
) -> Response {
    let calculator = CalculatorKind::HazardPremium;
    let correlation_id = start_request(calculator);

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result = compute_hazard_premium(request.salary);
    respond(correlation_id, calculator, started, result)
}

/// Handler for POST /unhealthiness-premium.
///
/// The minimum wage comes from configuration: the value in force on
/// `reference_date` when given, otherwise the latest one.
async fn unhealthiness_premium_handler(
    State(state): State<AppState>,
    payload: Result<Json<UnhealthinessPremiumRequest>, JsonRejection>,
) -> Response {
    let calculator = CalculatorKind::UnhealthinessPremium;
    let correlation_id = start_request(calculator);

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result = request.grade().and_then(|grade| {
        let minimum_wage = state.minimum_wage(request.reference_date()?)?;
        compute_unhealthiness_premium(grade, minimum_wage)
    });
    respond(correlation_id, calculator, started, result)
}

/// Handler for POST /risk-period-penalty.
async fn risk_period_penalty_handler(
    payload: Result<Json<RiskPeriodRequest>, JsonRejection>,
) -> Response {
    let calculator = CalculatorKind::RiskPeriodPenalty;
    let correlation_id = start_request(calculator);

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result =
        RiskPeriodInput::try_from(request).and_then(|input| compute_risk_period_penalty(&input));
    respond(correlation_id, calculator, started, result)
}

fn start_request(calculator: CalculatorKind) -> Uuid {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        calculator = %calculator,
        "Processing calculation request"
    );
    correlation_id
}

/// Turns a calculator result into a JSON response.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    calculator: CalculatorKind,
    started: Instant,
    result: EngineResult<CalculationResult<T>>,
) -> Response {
    let correlation_header = [(CORRELATION_ID_HEADER, correlation_id.to_string())];
    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                calculator = %calculator,
                ledger_entries = result.ledger.len(),
                duration_us = started.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (StatusCode::OK, correlation_header, Json(result)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                calculator = %calculator,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (api_error.status, correlation_header, Json(api_error.error)).into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(CORRELATION_ID_HEADER, correlation_id.to_string())],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::from_config_dir("./config/clt").expect("Failed to load config")
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Option<String>, Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let correlation_id = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, correlation_id, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_hazard_premium_returns_200_with_correlation_id() {
        let (status, correlation_id, body) =
            post_json("/hazard-premium", r#"{"salary": "2000.00"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let correlation_id = correlation_id.expect("missing correlation header");
        assert!(Uuid::parse_str(&correlation_id).is_ok());
        assert_eq!(body["calculator"], "hazard_premium");
        assert_eq!(body["outcome"]["premium"], "600.00");
        assert_eq!(body["outcome"]["total_salary"], "2600.00");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, correlation_id, body) = post_json("/hazard-premium", "{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(correlation_id.is_some());
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let (status, _, body) = post_json(
            "/risk-period-penalty",
            r#"{"base_date": "2024-01-01", "termination_date": "2024-01-20"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("salary"));
    }

    #[tokio::test]
    async fn test_unhealthiness_uses_minimum_wage_for_reference_date() {
        let (status, _, body) = post_json(
            "/unhealthiness-premium",
            r#"{"grade": "maximum", "reference_date": "2024-06-01"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["minimum_wage"], "1412.00");
        assert_eq!(body["outcome"]["premium"], "564.80");
    }

    #[tokio::test]
    async fn test_unhealthiness_before_first_minimum_wage_returns_422() {
        let (status, _, body) = post_json(
            "/unhealthiness-premium",
            r#"{"grade": "minimal", "reference_date": "2001-01-01"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "MINIMUM_WAGE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_date_returns_invalid_input() {
        let (status, _, body) = post_json(
            "/experience-breach",
            r#"{
                "start_date": "2024-01-01",
                "planned_end_date": "2024-02-30",
                "actual_end_date": "2024-02-15",
                "salary": "3000.00"
            }"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"], "field: planned_end_date");
    }
}
