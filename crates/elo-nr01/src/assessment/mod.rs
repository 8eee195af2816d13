//! Survey intake, scoring, history, and recommendations for HSE-IT diagnostics.
//!
//! Scoring functions are pure and take the response set explicitly; the
//! [`AssessmentService`] is the only component that talks to repositories.

pub mod catalog;
pub mod domain;
pub mod history;
pub mod intake;
pub mod recommendations;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{Dimension, Polarity, Question, QuestionId, Scale};
pub use domain::{
    AgreementLabel, AnswerLabel, Company, CompanyId, FrequencyLabel, RespondentHash, ResponseId,
    SurveyResponse, SurveySubmission,
};
pub use history::{build_history, build_history_with, Granularity, HistoryBucket, PeriodKey};
pub use intake::{respondent_hash, DeduplicationGuard, IntakeRejection};
pub use recommendations::{recommend, ActionPlan, ActionRecommendation};
pub use report::{CompanyDiagnostic, DimensionSummary, QuestionRiskView, SectorSnapshot};
pub use repository::{CompanyRepository, RepositoryError, ResponseRepository};
pub use router::{assessment_router, SubmissionReceipt};
pub use scoring::{
    aggregate_dimensions, company_score, normalize_answer, risk_percentage, DimensionAverages,
    RiskLevel, ScoreSnapshot, ScoringConfig, ScoringEngine,
};
pub use service::{AssessmentService, AssessmentServiceError};
