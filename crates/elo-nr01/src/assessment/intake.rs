use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::catalog::{self, QuestionId};
use super::domain::{
    AnswerLabel, Company, CompanyId, RespondentHash, ResponseId, SurveyResponse, SurveySubmission,
};
use super::repository::{RepositoryError, ResponseRepository};

/// Reasons a submission is refused before it reaches the response store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntakeRejection {
    #[error("this respondent has already answered the survey for this company")]
    DuplicateRespondent,
    #[error("respondent identifier is required")]
    MissingRespondent,
    #[error("survey closed on {valid_until}")]
    SurveyClosed { valid_until: NaiveDate },
    #[error("response quota of {limit} evaluations has been reached")]
    QuotaExhausted { limit: u32 },
}

/// Deterministic, company-scoped one-way hash of a raw respondent identifier.
///
/// Identifiers are trimmed and lower-cased first so `Ana@Empresa.com` and
/// `ana@empresa.com ` collide.
pub fn respondent_hash(company_id: &CompanyId, raw_identifier: &str) -> RespondentHash {
    let mut hasher = Sha256::new();
    hasher.update(company_id.0.as_bytes());
    hasher.update([0x1f]);
    hasher.update(raw_identifier.trim().to_lowercase().as_bytes());
    RespondentHash(hex::encode(hasher.finalize()))
}

/// Enforces at most one stored response per respondent and company.
pub struct DeduplicationGuard<R> {
    repository: Arc<R>,
}

impl<R> DeduplicationGuard<R>
where
    R: ResponseRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn is_duplicate(
        &self,
        company_id: &CompanyId,
        respondent_hash: &RespondentHash,
    ) -> Result<bool, RepositoryError> {
        self.repository
            .contains_respondent(company_id, respondent_hash)
    }

    /// Appends `response` unless its respondent already answered or the company
    /// already holds `limit` responses. The repository repeats both checks under
    /// its own lock, so racing submissions can neither store the same hash twice
    /// nor overrun the quota.
    pub fn admit(
        &self,
        response: SurveyResponse,
        limit: u32,
    ) -> Result<SurveyResponse, AdmitError> {
        if self.is_duplicate(&response.company_id, &response.respondent_hash)? {
            return Err(AdmitError::Rejected(IntakeRejection::DuplicateRespondent));
        }

        match self.repository.append(response, limit as usize) {
            Ok(stored) => Ok(stored),
            Err(RepositoryError::Conflict) => {
                Err(AdmitError::Rejected(IntakeRejection::DuplicateRespondent))
            }
            Err(RepositoryError::QuotaExceeded(_)) => {
                Err(AdmitError::Rejected(IntakeRejection::QuotaExhausted { limit }))
            }
            Err(other) => Err(AdmitError::Repository(other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdmitError {
    #[error(transparent)]
    Rejected(IntakeRejection),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Checks the contract limits recorded on the company before accepting a response.
///
/// Validity is judged on `received_at`, the server clock. A client-supplied
/// `submitted_at` only places the response in history buckets.
pub fn check_contract(
    company: &Company,
    stored_responses: usize,
    received_at: DateTime<Utc>,
) -> Result<(), IntakeRejection> {
    if received_at.date_naive() > company.valid_until {
        return Err(IntakeRejection::SurveyClosed {
            valid_until: company.valid_until,
        });
    }
    if stored_responses >= company.limit_evals as usize {
        return Err(IntakeRejection::QuotaExhausted {
            limit: company.limit_evals,
        });
    }
    Ok(())
}

/// Maps raw form answers onto the catalog. Unknown questions and unrecognized
/// labels are dropped; they only shrink the scoring denominators.
pub fn resolve_answers(raw: &BTreeMap<String, String>) -> BTreeMap<QuestionId, AnswerLabel> {
    let mut answers = BTreeMap::new();
    for (key, label) in raw {
        let Some(question) = catalog::resolve(key) else {
            debug!(question = %key, "ignoring answer for unknown question");
            continue;
        };
        let Some(answer) = AnswerLabel::parse(label) else {
            debug!(question = %question.id, label = %label, "ignoring unrecognized answer label");
            continue;
        };
        answers.insert(question.id, answer);
    }
    answers
}

/// Turns a validated submission into the record that will be appended.
pub fn build_response(
    id: ResponseId,
    company_id: &CompanyId,
    submission: SurveySubmission,
    received_at: DateTime<Utc>,
) -> Result<SurveyResponse, IntakeRejection> {
    if submission.respondent_id.trim().is_empty() {
        return Err(IntakeRejection::MissingRespondent);
    }

    let setor = match submission.setor.trim() {
        "" => "Não informado".to_string(),
        other => other.to_string(),
    };

    Ok(SurveyResponse {
        id,
        company_id: company_id.clone(),
        respondent_hash: respondent_hash(company_id, &submission.respondent_id),
        setor,
        answers: resolve_answers(&submission.answers),
        submitted_at: submission.submitted_at.unwrap_or(received_at),
    })
}
