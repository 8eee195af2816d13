use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CompanyId, SurveyResponse};
use super::scoring::{aggregate_dimensions, company_score, DimensionAverages};

/// Width of a history bucket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Month,
    Quarter,
}

/// Submission period. Ordering is chronological (year, then index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub year: i32,
    /// Month (1–12) or quarter (1–4), depending on the granularity.
    pub index: u32,
    pub granularity: Granularity,
}

impl PeriodKey {
    pub fn of(submitted_at: DateTime<Utc>, granularity: Granularity) -> Self {
        let index = match granularity {
            Granularity::Month => submitted_at.month(),
            Granularity::Quarter => (submitted_at.month() - 1) / 3 + 1,
        };
        Self {
            year: submitted_at.year(),
            index,
            granularity,
        }
    }

    /// `03/2025` for months, `T1/2025` for quarters.
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Month => format!("{:02}/{}", self.index, self.year),
            Granularity::Quarter => format!("T{}/{}", self.index, self.year),
        }
    }
}

/// Company health snapshot for one submission period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryBucket {
    pub period: PeriodKey,
    pub period_label: String,
    pub respondents: usize,
    pub overall_average: f64,
    pub adherence_percentage: u8,
    pub dimension_averages: DimensionAverages,
}

pub fn build_history(
    company_id: &CompanyId,
    responses: &[SurveyResponse],
    headcount: u32,
) -> Vec<HistoryBucket> {
    build_history_with(company_id, responses, headcount, Granularity::Month)
}

/// Groups the company's responses by period and scores each group on its own.
/// Periods without responses produce no bucket.
pub fn build_history_with(
    company_id: &CompanyId,
    responses: &[SurveyResponse],
    headcount: u32,
    granularity: Granularity,
) -> Vec<HistoryBucket> {
    let mut groups: BTreeMap<PeriodKey, Vec<SurveyResponse>> = BTreeMap::new();
    for response in responses
        .iter()
        .filter(|response| &response.company_id == company_id)
    {
        groups
            .entry(PeriodKey::of(response.submitted_at, granularity))
            .or_default()
            .push(response.clone());
    }

    groups
        .into_iter()
        .map(|(period, group)| {
            let dimension_averages = aggregate_dimensions(&group);
            HistoryBucket {
                period,
                period_label: period.label(),
                respondents: group.len(),
                overall_average: company_score(&dimension_averages),
                adherence_percentage: adherence_percentage(group.len(), headcount),
                dimension_averages,
            }
        })
        .collect()
}

/// Share of the headcount that answered, clamped to 0–100. Zero headcount yields 0.
pub fn adherence_percentage(respondents: usize, headcount: u32) -> u8 {
    if headcount == 0 {
        return 0;
    }
    let ratio = respondents as f64 / f64::from(headcount);
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}
