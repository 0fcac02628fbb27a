//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, MonthsQuery, SimulationResponse, ValidationErrorResponse};
use crate::config::ScenarioConfig;
use crate::runner::run_scenario;
use crate::sim::reference::MONTHS;
use crate::sim::types::MonthlyResult;

/// Runs the posted scenario.
///
/// `POST /simulate` → 200 + `SimulationResponse` JSON
/// invalid scenario → 422 + `ValidationErrorResponse`
pub async fn post_simulate(
    Json(scenario): Json<ScenarioConfig>,
) -> Result<Json<SimulationResponse>, (StatusCode, Json<ValidationErrorResponse>)> {
    match run_scenario(&scenario) {
        Ok(run) => Ok(Json(SimulationResponse {
            summary: run.summary,
            report: run.report,
        })),
        Err(errors) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorResponse { errors }),
        )),
    }
}

/// Returns the summary and report of the startup scenario.
///
/// `GET /summary` → 200 + `SimulationResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SimulationResponse> {
    Json(SimulationResponse {
        summary: state.summary.clone(),
        report: state.report.clone(),
    })
}

/// Returns monthly rows of the startup scenario, optionally filtered by month index.
///
/// `GET /months` → 200 + all twelve rows
/// `GET /months?from=N&to=M` → inclusive range
/// `GET /months?from=5&to=2` or `to > 11` → 400 + `ErrorResponse`
pub async fn get_months(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthsQuery>,
) -> Result<Json<Vec<MonthlyResult>>, (StatusCode, Json<ErrorResponse>)> {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(MONTHS - 1);

    if from > to || to >= MONTHS {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!(
                    "`from` ({from}) must be <= `to` ({to}) and `to` must be < {MONTHS}"
                ),
            }),
        ));
    }

    Ok(Json(state.summary.months[from..=to].to_vec()))
}
