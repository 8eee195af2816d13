use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{self, Dimension, QuestionId};
use super::domain::{Company, CompanyId, SurveyResponse};
use super::history::adherence_percentage;
use super::recommendations::{recommend_with, ActionRecommendation};
use super::scoring::{
    aggregate_dimensions, company_score, DimensionAverages, RiskLevel, ScoringEngine,
};

/// Everything the dashboard and the NR-01 report render for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDiagnostic {
    pub company_id: CompanyId,
    pub company_name: String,
    pub respondents: usize,
    pub adherence_percentage: u8,
    pub overall_average: f64,
    /// `None` until at least one valid answer exists.
    pub overall_level: Option<RiskLevel>,
    pub dimensions: Vec<DimensionSummary>,
    /// Weakest dimension that needs attention, if any.
    pub critical_dimension: Option<Dimension>,
    pub heat_map: Vec<QuestionRiskView>,
    pub sectors: Vec<SectorSnapshot>,
    pub recommendations: Vec<ActionRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSummary {
    pub dimension: Dimension,
    pub label: String,
    pub average: f64,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRiskView {
    pub question_id: QuestionId,
    pub text: String,
    pub dimension: Dimension,
    pub risk_percentage: u8,
    pub level: RiskLevel,
}

/// Scores restricted to one department (GHE/GES segmentation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSnapshot {
    pub setor: String,
    pub respondents: usize,
    pub overall_average: f64,
    pub dimension_averages: DimensionAverages,
}

impl CompanyDiagnostic {
    pub fn build(
        company: &Company,
        responses: &[SurveyResponse],
        engine: &ScoringEngine,
    ) -> Self {
        let config = engine.config();
        let snapshot = engine.score(responses);

        let dimensions: Vec<DimensionSummary> = snapshot
            .dimension_averages
            .iter()
            .map(|(dimension, average)| DimensionSummary {
                dimension: *dimension,
                label: dimension.label().to_string(),
                average: *average,
                level: RiskLevel::from_average(*average, config),
            })
            .collect();

        let critical_dimension = dimensions
            .iter()
            .filter(|summary| summary.level.needs_attention())
            .min_by(|a, b| a.average.total_cmp(&b.average))
            .map(|summary| summary.dimension);

        let heat_map = snapshot
            .heat_map
            .iter()
            .filter_map(|(question_id, percentage)| {
                let question = catalog::question(*question_id)?;
                Some(QuestionRiskView {
                    question_id: *question_id,
                    text: question.text.to_string(),
                    dimension: question.dimension,
                    risk_percentage: *percentage,
                    level: RiskLevel::from_percentage(*percentage, config),
                })
            })
            .collect();

        let overall_level = (!snapshot.dimension_averages.is_empty())
            .then(|| RiskLevel::from_average(snapshot.overall_average, config));

        Self {
            company_id: company.id.clone(),
            company_name: company.name.clone(),
            respondents: snapshot.respondents,
            adherence_percentage: adherence_percentage(snapshot.respondents, company.headcount),
            overall_average: snapshot.overall_average,
            overall_level,
            dimensions,
            critical_dimension,
            heat_map,
            sectors: sector_snapshots(responses),
            recommendations: recommend_with(&snapshot.dimension_averages, config),
        }
    }
}

fn sector_snapshots(responses: &[SurveyResponse]) -> Vec<SectorSnapshot> {
    let mut groups: BTreeMap<&str, Vec<SurveyResponse>> = BTreeMap::new();
    for response in responses {
        groups
            .entry(response.setor.as_str())
            .or_default()
            .push(response.clone());
    }

    groups
        .into_iter()
        .map(|(setor, group)| {
            let dimension_averages = aggregate_dimensions(&group);
            SectorSnapshot {
                setor: setor.to_string(),
                respondents: group.len(),
                overall_average: company_score(&dimension_averages),
                dimension_averages,
            }
        })
        .collect()
}
