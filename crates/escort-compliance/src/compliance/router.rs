use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{RouteComplianceRequest, REQUEST_FIELDS};
use super::error::ComplianceError;
use super::rules::JurisdictionRule;
use super::ComplianceEngine;

/// Router builder exposing the compliance engine over HTTP.
pub fn compliance_router(engine: Arc<ComplianceEngine>) -> Router {
    Router::new()
        .route("/api/v1/compliance/route-report", post(route_report_handler))
        .route("/api/v1/compliance/jurisdictions", get(jurisdictions_handler))
        .route("/api/v1/compliance/rate-tiers", get(rate_tiers_handler))
        .with_state(engine)
}

pub(crate) async fn route_report_handler(
    State(engine): State<Arc<ComplianceEngine>>,
    body: Result<Json<RouteComplianceRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let status = rejection.status();
            return error_response(status, &rejection_error(&rejection));
        }
    };

    match engine.evaluate(&request) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(StatusCode::UNPROCESSABLE_ENTITY, &error),
    }
}

fn error_response(status: StatusCode, error: &ComplianceError) -> Response {
    let payload = json!({ "error": error.view() });
    (status, Json(payload)).into_response()
}

/// Body-level failures (bad JSON, missing or mistyped fields, unknown tiers) become the same
/// structured `invalid_input` error the engine raises. The offending field is recovered from
/// the deserializer's message; anything unattributable is reported against `body`.
fn rejection_error(rejection: &JsonRejection) -> ComplianceError {
    let detail = rejection.body_text();
    ComplianceError::InvalidInput {
        field: offending_field(&detail),
        reason: detail,
    }
}

fn offending_field(detail: &str) -> &'static str {
    REQUEST_FIELDS
        .iter()
        .copied()
        .find(|field| {
            detail.contains(&format!("`{field}`"))
                || detail.contains(&format!("{field}:"))
                || detail.contains(&format!("{field}["))
        })
        .unwrap_or("body")
}

pub(crate) async fn jurisdictions_handler(
    State(engine): State<Arc<ComplianceEngine>>,
) -> Json<Vec<JurisdictionRule>> {
    Json(engine.rules().rules().cloned().collect())
}

pub(crate) async fn rate_tiers_handler(State(engine): State<Arc<ComplianceEngine>>) -> Response {
    (StatusCode::OK, Json(engine.rates().clone())).into_response()
}
