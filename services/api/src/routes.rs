use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use elo_nr01::assessment::{
    assessment_router, catalog, AssessmentService, CompanyRepository, ResponseRepository,
};
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Catalog entry as served to the survey front end.
#[derive(Debug, Serialize)]
pub(crate) struct QuestionView {
    pub(crate) id: u8,
    pub(crate) text: &'static str,
    pub(crate) dimension: &'static str,
    pub(crate) scale: elo_nr01::assessment::Scale,
}

pub(crate) fn with_assessment_routes<R, C>(service: Arc<AssessmentService<R, C>>) -> axum::Router
where
    R: ResponseRepository + 'static,
    C: CompanyRepository + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/questions", axum::routing::get(questions_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Acquire);
    if ready {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Questionnaire in display order, without polarity so respondents cannot infer scoring.
pub(crate) async fn questions_endpoint() -> Json<Vec<QuestionView>> {
    Json(
        catalog::all()
            .iter()
            .map(|question| QuestionView {
                id: question.id.0,
                text: question.text,
                dimension: question.dimension.label(),
                scale: question.scale,
            })
            .collect(),
    )
}
