use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CompanyId, SurveySubmission};
use super::history::Granularity;
use super::intake::IntakeRejection;
use super::repository::{CompanyRepository, ResponseRepository};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing survey intake and the diagnostic read models.
pub fn assessment_router<R, C>(service: Arc<AssessmentService<R, C>>) -> Router
where
    R: ResponseRepository + 'static,
    C: CompanyRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/companies/:company_id/responses",
            post(submit_handler::<R, C>),
        )
        .route(
            "/api/v1/companies/:company_id/diagnostic",
            get(diagnostic_handler::<R, C>),
        )
        .route(
            "/api/v1/companies/:company_id/history",
            get(history_handler::<R, C>),
        )
        .route(
            "/api/v1/companies/:company_id/recommendations",
            get(recommendations_handler::<R, C>),
        )
        .with_state(service)
}

/// Acknowledgement returned to the survey form. The respondent hash is not echoed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub response_id: String,
    pub company_id: CompanyId,
    pub answered_questions: usize,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    #[serde(default)]
    pub(crate) granularity: Granularity,
}

pub(crate) async fn submit_handler<R, C>(
    State(service): State<Arc<AssessmentService<R, C>>>,
    Path(company_id): Path<String>,
    axum::Json(submission): axum::Json<SurveySubmission>,
) -> Response
where
    R: ResponseRepository + 'static,
    C: CompanyRepository + 'static,
{
    let company_id = CompanyId(company_id);
    match service.submit(&company_id, submission) {
        Ok(stored) => {
            let receipt = SubmissionReceipt {
                response_id: stored.id.0,
                company_id: stored.company_id,
                answered_questions: stored.answers.len(),
                submitted_at: stored.submitted_at,
            };
            (StatusCode::CREATED, axum::Json(receipt)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn diagnostic_handler<R, C>(
    State(service): State<Arc<AssessmentService<R, C>>>,
    Path(company_id): Path<String>,
) -> Response
where
    R: ResponseRepository + 'static,
    C: CompanyRepository + 'static,
{
    match service.diagnostic(&CompanyId(company_id)) {
        Ok(diagnostic) => (StatusCode::OK, axum::Json(diagnostic)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn history_handler<R, C>(
    State(service): State<Arc<AssessmentService<R, C>>>,
    Path(company_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: ResponseRepository + 'static,
    C: CompanyRepository + 'static,
{
    match service.history(&CompanyId(company_id), query.granularity) {
        Ok(history) => (StatusCode::OK, axum::Json(history)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn recommendations_handler<R, C>(
    State(service): State<Arc<AssessmentService<R, C>>>,
    Path(company_id): Path<String>,
) -> Response
where
    R: ResponseRepository + 'static,
    C: CompanyRepository + 'static,
{
    match service.recommendations(&CompanyId(company_id)) {
        Ok(recommendations) => (StatusCode::OK, axum::Json(recommendations)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn status_for(err: &AssessmentServiceError) -> StatusCode {
    match err {
        AssessmentServiceError::Rejected(IntakeRejection::DuplicateRespondent) => {
            StatusCode::CONFLICT
        }
        AssessmentServiceError::Rejected(IntakeRejection::MissingRespondent) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AssessmentServiceError::Rejected(
            IntakeRejection::SurveyClosed { .. } | IntakeRejection::QuotaExhausted { .. },
        ) => StatusCode::FORBIDDEN,
        AssessmentServiceError::UnknownCompany(_) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: AssessmentServiceError) -> Response {
    let status = status_for(&err);
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
