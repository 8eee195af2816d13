use super::domain::{Company, CompanyId, RespondentHash, SurveyResponse};

/// Append-only response log partitioned by company.
///
/// `append` is the only mutation. Implementations must reject a response whose
/// `(company_id, respondent_hash)` is already stored with
/// [`RepositoryError::Conflict`], and a response that would take the company past
/// `quota` stored responses with [`RepositoryError::QuotaExceeded`]. Both checks
/// and the write happen as one atomic step.
pub trait ResponseRepository: Send + Sync {
    fn append(&self, response: SurveyResponse, quota: usize)
        -> Result<SurveyResponse, RepositoryError>;
    fn contains_respondent(
        &self,
        company_id: &CompanyId,
        respondent_hash: &RespondentHash,
    ) -> Result<bool, RepositoryError>;
    fn for_company(&self, company_id: &CompanyId) -> Result<Vec<SurveyResponse>, RepositoryError>;
    fn count_for_company(&self, company_id: &CompanyId) -> Result<usize, RepositoryError> {
        Ok(self.for_company(company_id)?.len())
    }
}

/// Read access to company records maintained by the registration flow.
pub trait CompanyRepository: Send + Sync {
    fn fetch(&self, company_id: &CompanyId) -> Result<Option<Company>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("quota of {0} records reached")]
    QuotaExceeded(usize),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
