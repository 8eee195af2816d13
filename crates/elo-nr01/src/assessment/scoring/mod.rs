mod config;
mod level;
mod rules;

pub use config::ScoringConfig;
pub use level::RiskLevel;
pub use rules::{
    aggregate_dimensions, company_score, heat_map, normalize_answer, risk_percentage,
    DimensionAverages,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::QuestionId;
use super::domain::SurveyResponse;

/// Stateless scorer holding the thresholds so every view computes the same numbers.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, responses: &[SurveyResponse]) -> ScoreSnapshot {
        let dimension_averages = aggregate_dimensions(responses);
        let overall_average = company_score(&dimension_averages);
        let heat_map = heat_map(responses, self.config.risk_cutoff);

        ScoreSnapshot {
            respondents: responses.len(),
            dimension_averages,
            overall_average,
            heat_map,
        }
    }

    pub fn risk_percentage(&self, question_id: QuestionId, responses: &[SurveyResponse]) -> u8 {
        risk_percentage(question_id, responses, self.config.risk_cutoff)
    }
}

/// Scores computed over one set of responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub respondents: usize,
    pub dimension_averages: DimensionAverages,
    pub overall_average: f64,
    pub heat_map: BTreeMap<QuestionId, u8>,
}
