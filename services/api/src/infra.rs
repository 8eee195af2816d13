use chrono::{Days, NaiveDate, Utc};
use elo_nr01::assessment::{
    Company, CompanyId, CompanyRepository, RepositoryError, RespondentHash, ResponseRepository,
    SurveyResponse,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local response log. The duplicate check, the quota check and the
/// push happen under one lock, which is what makes `append` atomic.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResponseRepository {
    records: Arc<Mutex<Vec<SurveyResponse>>>,
}

impl InMemoryResponseRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<SurveyResponse>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("response store lock poisoned".to_string()))
    }
}

impl ResponseRepository for InMemoryResponseRepository {
    fn append(
        &self,
        response: SurveyResponse,
        quota: usize,
    ) -> Result<SurveyResponse, RepositoryError> {
        let mut guard = self.lock()?;
        let mut stored_for_company = 0;
        for stored in guard
            .iter()
            .filter(|stored| stored.company_id == response.company_id)
        {
            if stored.respondent_hash == response.respondent_hash {
                return Err(RepositoryError::Conflict);
            }
            stored_for_company += 1;
        }
        if stored_for_company >= quota {
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
        let guard = self.lock()?;
        Ok(guard.iter().any(|stored| {
            &stored.company_id == company_id && &stored.respondent_hash == respondent_hash
        }))
    }

    fn for_company(&self, company_id: &CompanyId) -> Result<Vec<SurveyResponse>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .filter(|stored| &stored.company_id == company_id)
            .cloned()
            .collect())
    }

    fn count_for_company(&self, company_id: &CompanyId) -> Result<usize, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .filter(|stored| &stored.company_id == company_id)
            .count())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCompanyRepository {
    companies: Arc<HashMap<CompanyId, Company>>,
}

impl InMemoryCompanyRepository {
    /// Demo clients whose contracts run for a year from today.
    pub(crate) fn seeded() -> Self {
        let companies = seed_companies(Utc::now().date_naive())
            .into_iter()
            .map(|company| (company.id.clone(), company))
            .collect();
        Self {
            companies: Arc::new(companies),
        }
    }

    pub(crate) fn companies(&self) -> Vec<Company> {
        let mut all: Vec<Company> = self.companies.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

impl CompanyRepository for InMemoryCompanyRepository {
    fn fetch(&self, company_id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        Ok(self.companies.get(company_id).cloned())
    }
}

const SEED_CONTRACT_DAYS: u64 = 365;

/// Client registrations available until the registration flow is wired to storage.
fn seed_companies(today: NaiveDate) -> Vec<Company> {
    let valid_until = today
        .checked_add_days(Days::new(SEED_CONTRACT_DAYS))
        .unwrap_or(NaiveDate::MAX);
    vec![
        Company {
            id: CompanyId("IND01".to_string()),
            name: "Indústria Têxtil A".to_string(),
            headcount: 150,
            limit_evals: 150,
            valid_until,
        },
        Company {
            id: CompanyId("TECH02".to_string()),
            name: "Tech Solutions".to_string(),
            headcount: 45,
            limit_evals: 50,
            valid_until,
        },
    ]
}

pub(crate) fn parse_company(raw: &str) -> Result<CompanyId, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("company code must not be empty".to_string());
    }
    Ok(CompanyId(trimmed.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use elo_nr01::assessment::{AssessmentService, ResponseId, ScoringConfig, SurveySubmission};
    use std::collections::BTreeMap;

    fn stored(id: &str, hash: &str) -> SurveyResponse {
        SurveyResponse {
            id: ResponseId(id.to_string()),
            company_id: CompanyId("IND01".to_string()),
            respondent_hash: RespondentHash(hash.to_string()),
            setor: "Produção".to_string(),
            answers: BTreeMap::new(),
            submitted_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 8, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn append_rejects_repeated_respondent_hash() {
        let repository = InMemoryResponseRepository::default();
        repository.append(stored("resp-1", "abc"), 10).expect("stored");

        assert!(matches!(
            repository.append(stored("resp-2", "abc"), 10),
            Err(RepositoryError::Conflict)
        ));
        assert_eq!(
            repository
                .count_for_company(&CompanyId("IND01".to_string()))
                .expect("count"),
            1
        );
    }

    #[test]
    fn seeded_companies_are_sorted_by_code() {
        let repository = InMemoryCompanyRepository::seeded();
        let codes: Vec<String> = repository
            .companies()
            .into_iter()
            .map(|company| company.id.0)
            .collect();
        assert_eq!(codes, vec!["IND01".to_string(), "TECH02".to_string()]);
        assert!(repository
            .fetch(&CompanyId("NOPE".to_string()))
            .expect("fetch")
            .is_none());
    }

    #[test]
    fn seeded_companies_accept_submissions_made_now() {
        let service = AssessmentService::new(
            Arc::new(InMemoryResponseRepository::default()),
            Arc::new(InMemoryCompanyRepository::seeded()),
            ScoringConfig::default(),
        );

        for company in ["IND01", "TECH02"] {
            let submission = SurveySubmission {
                respondent_id: "colab-1".to_string(),
                setor: "Produção".to_string(),
                answers: BTreeMap::new(),
                submitted_at: None,
            };
            service
                .submit(&CompanyId(company.to_string()), submission)
                .expect("seeded contract is open");
        }
    }

    #[test]
    fn seed_contracts_run_a_year_from_the_given_day() {
        let today = NaiveDate::from_ymd_opt(2027, 1, 5).expect("valid date");
        let companies = seed_companies(today);
        assert!(companies
            .iter()
            .all(|company| company.valid_until.to_string() == "2028-01-05"));
    }

    #[test]
    fn append_enforces_the_company_quota() {
        let repository = InMemoryResponseRepository::default();
        repository.append(stored("resp-1", "abc"), 1).expect("stored");

        assert!(matches!(
            repository.append(stored("resp-2", "def"), 1),
            Err(RepositoryError::QuotaExceeded(1))
        ));
        let mut other = stored("resp-3", "def");
        other.company_id = CompanyId("TECH02".to_string());
        repository.append(other, 1).expect("quota is per company");
    }

    #[test]
    fn company_codes_are_normalized() {
        assert_eq!(parse_company(" ind01 "), Ok(CompanyId("IND01".to_string())));
        assert!(parse_company("  ").is_err());
    }
}
