use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use ekoliv::onboarding::{FormData, Section, StepTemplate};
use ekoliv::results::ResultsSummary;
use ekoliv::scoring::{calculate_eco_score, EcoScoreResult};
use ekoliv::AppError;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
pub(crate) struct QuestionnaireResponse {
    pub(crate) total_steps: u8,
    pub(crate) sections: Vec<SectionView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SectionView {
    pub(crate) section: Section,
    pub(crate) label: &'static str,
    pub(crate) steps: Vec<StepTemplate>,
}

pub(crate) fn app_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/onboarding/questions", get(questions_endpoint))
        .route("/api/v1/eco-score", post(eco_score_endpoint))
        .route("/api/v1/results-summary", post(results_summary_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn questions_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<QuestionnaireResponse> {
    let sections = [
        Section::Lifestyle,
        Section::Health,
        Section::MealPlanning,
        Section::Contact,
        Section::Summary,
    ]
    .into_iter()
    .map(|section| SectionView {
        section,
        label: section.label(),
        steps: state
            .questionnaire
            .steps_in_section(section)
            .into_iter()
            .cloned()
            .collect(),
    })
    .collect();

    Json(QuestionnaireResponse {
        total_steps: state.questionnaire.steps().len() as u8,
        sections,
    })
}

pub(crate) async fn eco_score_endpoint(
    payload: Result<Json<FormData>, JsonRejection>,
) -> Result<Json<EcoScoreResult>, AppError> {
    let Json(form) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let result = calculate_eco_score(&form);
    tracing::debug!(percentage = result.percentage, tier = %result.category, "eco score computed");
    Ok(Json(result))
}

pub(crate) async fn results_summary_endpoint(
    payload: Result<Json<FormData>, JsonRejection>,
) -> Result<Json<ResultsSummary>, AppError> {
    let Json(form) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(Json(ResultsSummary::from_form(&form)))
}
