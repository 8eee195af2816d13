use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::assessment::catalog::{self, Dimension, Polarity, QuestionId, Scale};
use crate::assessment::domain::{
    AnswerLabel, Company, CompanyId, RespondentHash, ResponseId, SurveyResponse, SurveySubmission,
};
use crate::assessment::repository::{CompanyRepository, RepositoryError, ResponseRepository};
use crate::assessment::{assessment_router, AssessmentService, ScoringConfig};

pub(super) fn company_id() -> CompanyId {
    CompanyId("IND01".to_string())
}

pub(super) fn company() -> Company {
    Company {
        id: company_id(),
        name: "Indústria Têxtil A".to_string(),
        headcount: 10,
        limit_evals: 50,
        valid_until: NaiveDate::from_ymd_opt(2030, 12, 31).expect("valid date"),
    }
}

pub(super) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn label(raw: &str) -> AnswerLabel {
    AnswerLabel::parse(raw).expect("fixture label is recognized")
}

/// Stored response built directly, bypassing intake.
pub(super) fn response(
    id: &str,
    setor: &str,
    answers: &[(u8, &str)],
    submitted_at: DateTime<Utc>,
) -> SurveyResponse {
    SurveyResponse {
        id: ResponseId(id.to_string()),
        company_id: company_id(),
        respondent_hash: RespondentHash(format!("hash-{id}")),
        setor: setor.to_string(),
        answers: answers
            .iter()
            .map(|(question, raw)| (QuestionId(*question), label(raw)))
            .collect(),
        submitted_at,
    }
}

/// Healthiest label for a question given its scale and polarity.
pub(super) fn best_label(question_id: QuestionId) -> &'static str {
    let question = catalog::question(question_id).expect("catalog question");
    match (question.scale, question.polarity) {
        (Scale::Frequency, Polarity::Normal) => "Sempre",
        (Scale::Frequency, Polarity::Reversed) => "Nunca",
        (Scale::Agreement, Polarity::Normal) => "Concordo totalmente",
        (Scale::Agreement, Polarity::Reversed) => "Discordo totalmente",
    }
}

/// Worst label for a question given its scale and polarity.
pub(super) fn worst_label(question_id: QuestionId) -> &'static str {
    let question = catalog::question(question_id).expect("catalog question");
    match (question.scale, question.polarity) {
        (Scale::Frequency, Polarity::Normal) => "Nunca",
        (Scale::Frequency, Polarity::Reversed) => "Sempre",
        (Scale::Agreement, Polarity::Normal) => "Discordo totalmente",
        (Scale::Agreement, Polarity::Reversed) => "Concordo totalmente",
    }
}

/// Form answers for every catalog question, healthy except for `weak` dimensions.
pub(super) fn form_answers(weak: &[Dimension]) -> BTreeMap<String, String> {
    catalog::all()
        .iter()
        .map(|question| {
            let raw = if weak.contains(&question.dimension) {
                worst_label(question.id)
            } else {
                best_label(question.id)
            };
            (question.id.0.to_string(), raw.to_string())
        })
        .collect()
}

pub(super) fn submission(respondent: &str, weak: &[Dimension]) -> SurveySubmission {
    SurveySubmission {
        respondent_id: respondent.to_string(),
        setor: "Produção".to_string(),
        answers: form_answers(weak),
        submitted_at: Some(at(2025, 3, 10)),
    }
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryResponses, MemoryCompanies>,
    Arc<MemoryResponses>,
) {
    let responses = Arc::new(MemoryResponses::default());
    let companies = Arc::new(MemoryCompanies::with(company()));
    let service = AssessmentService::new(responses.clone(), companies, ScoringConfig::default());
    (service, responses)
}

#[derive(Default, Clone)]
pub(super) struct MemoryResponses {
    pub(super) records: Arc<Mutex<Vec<SurveyResponse>>>,
}

impl MemoryResponses {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ResponseRepository for MemoryResponses {
    fn append(
        &self,
        response: SurveyResponse,
        quota: usize,
    ) -> Result<SurveyResponse, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let company: Vec<&SurveyResponse> = guard
            .iter()
            .filter(|stored| stored.company_id == response.company_id)
            .collect();
        if company
            .iter()
            .any(|stored| stored.respondent_hash == response.respondent_hash)
        {
            return Err(RepositoryError::Conflict);
        }
        if company.len() >= quota {
            return Err(RepositoryError::QuotaExceeded(quota));
        }
        guard.push(response.clone());
        Ok(response)
    }

    fn contains_respondent(
        &self,
        company_id: &CompanyId,
        respondent_hash: &RespondentHash,
    ) -> Result<bool, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().any(|stored| {
            &stored.company_id == company_id && &stored.respondent_hash == respondent_hash
        }))
    }

    fn for_company(&self, company_id: &CompanyId) -> Result<Vec<SurveyResponse>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|stored| &stored.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCompanies {
    companies: Arc<Mutex<HashMap<CompanyId, Company>>>,
}

impl MemoryCompanies {
    pub(super) fn with(company: Company) -> Self {
        let repository = Self::default();
        repository
            .companies
            .lock()
            .expect("company mutex poisoned")
            .insert(company.id.clone(), company);
        repository
    }
}

impl CompanyRepository for MemoryCompanies {
    fn fetch(&self, company_id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("company mutex poisoned");
        Ok(guard.get(company_id).cloned())
    }
}

pub(super) struct UnavailableResponses;

impl ResponseRepository for UnavailableResponses {
    fn append(
        &self,
        _response: SurveyResponse,
        _quota: usize,
    ) -> Result<SurveyResponse, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn contains_respondent(
        &self,
        _company_id: &CompanyId,
        _respondent_hash: &RespondentHash,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_company(
        &self,
        _company_id: &CompanyId,
    ) -> Result<Vec<SurveyResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(
    service: AssessmentService<MemoryResponses, MemoryCompanies>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
