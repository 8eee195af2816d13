use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{Company, CompanyId, ResponseId, SurveyResponse, SurveySubmission};
use super::history::{build_history_with, Granularity, HistoryBucket};
use super::intake::{
    build_response, check_contract, respondent_hash, AdmitError, DeduplicationGuard,
    IntakeRejection,
};
use super::recommendations::{recommend_with, ActionRecommendation};
use super::report::CompanyDiagnostic;
use super::repository::{CompanyRepository, RepositoryError, ResponseRepository};
use super::scoring::{aggregate_dimensions, ScoringConfig, ScoringEngine};

/// Service composing the repositories, the deduplication guard and the scoring engine.
///
/// Every read recomputes from the response store, so an accepted submission is
/// visible to the next diagnostic without any invalidation step.
pub struct AssessmentService<R, C> {
    responses: Arc<R>,
    companies: Arc<C>,
    guard: DeduplicationGuard<R>,
    engine: Arc<ScoringEngine>,
    sequence: AtomicU64,
}

impl<R, C> AssessmentService<R, C>
where
    R: ResponseRepository + 'static,
    C: CompanyRepository + 'static,
{
    pub fn new(responses: Arc<R>, companies: Arc<C>, config: ScoringConfig) -> Self {
        Self {
            guard: DeduplicationGuard::new(responses.clone()),
            responses,
            companies,
            engine: Arc::new(ScoringEngine::new(config)),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Validate and store a survey submission.
    ///
    /// Response ids are drawn only once every up-front check has passed, so a
    /// gap in the sequence means a submission lost a race inside the repository
    /// (duplicate or quota) or the write itself failed.
    pub fn submit(
        &self,
        company_id: &CompanyId,
        submission: SurveySubmission,
    ) -> Result<SurveyResponse, AssessmentServiceError> {
        let company = self.company(company_id)?;
        let received_at = Utc::now();

        let stored = self.responses.count_for_company(company_id)?;
        let mut response = check_contract(&company, stored, received_at)
            .and_then(|()| {
                build_response(ResponseId::pending(), company_id, submission, received_at)
            })
            .map_err(|rejection| refuse(company_id, rejection))?;
        if self
            .guard
            .is_duplicate(company_id, &response.respondent_hash)?
        {
            return Err(refuse(company_id, IntakeRejection::DuplicateRespondent));
        }

        response.id = self.next_response_id();
        let answered = response.answers.len();

        match self.guard.admit(response, company.limit_evals) {
            Ok(stored) => {
                info!(
                    company = %company_id,
                    response = %stored.id.0,
                    answered,
                    "survey response stored"
                );
                Ok(stored)
            }
            Err(AdmitError::Rejected(rejection)) => Err(refuse(company_id, rejection)),
            Err(AdmitError::Repository(err)) => Err(err.into()),
        }
    }

    pub fn is_duplicate(
        &self,
        company_id: &CompanyId,
        raw_respondent_id: &str,
    ) -> Result<bool, AssessmentServiceError> {
        let hash = respondent_hash(company_id, raw_respondent_id);
        Ok(self.guard.is_duplicate(company_id, &hash)?)
    }

    pub fn diagnostic(
        &self,
        company_id: &CompanyId,
    ) -> Result<CompanyDiagnostic, AssessmentServiceError> {
        let company = self.company(company_id)?;
        let responses = self.responses.for_company(company_id)?;
        Ok(CompanyDiagnostic::build(&company, &responses, &self.engine))
    }

    pub fn history(
        &self,
        company_id: &CompanyId,
        granularity: Granularity,
    ) -> Result<Vec<HistoryBucket>, AssessmentServiceError> {
        let company = self.company(company_id)?;
        let responses = self.responses.for_company(company_id)?;
        Ok(build_history_with(
            company_id,
            &responses,
            company.headcount,
            granularity,
        ))
    }

    pub fn recommendations(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<ActionRecommendation>, AssessmentServiceError> {
        self.company(company_id)?;
        let responses = self.responses.for_company(company_id)?;
        let averages = aggregate_dimensions(&responses);
        Ok(recommend_with(&averages, self.engine.config()))
    }

    fn company(&self, company_id: &CompanyId) -> Result<Company, AssessmentServiceError> {
        self.companies
            .fetch(company_id)?
            .ok_or_else(|| AssessmentServiceError::UnknownCompany(company_id.clone()))
    }

    fn next_response_id(&self) -> ResponseId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ResponseId(format!("resp-{id:06}"))
    }
}

fn refuse(company_id: &CompanyId, rejection: IntakeRejection) -> AssessmentServiceError {
    warn!(company = %company_id, %rejection, "survey submission refused");
    rejection.into()
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Rejected(#[from] IntakeRejection),
    #[error("unknown company code '{0}'")]
    UnknownCompany(CompanyId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
