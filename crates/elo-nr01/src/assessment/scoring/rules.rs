use std::collections::BTreeMap;

use super::super::catalog::{self, Dimension, Polarity, QuestionId};
use super::super::domain::{AnswerLabel, SurveyResponse};

/// Dimension averages on the 1–5 scale. Dimensions without a valid answer are absent.
pub type DimensionAverages = BTreeMap<Dimension, f64>;

pub fn normalize_answer(label: &str, polarity: Polarity) -> Option<u8> {
    AnswerLabel::parse(label).map(|answer| answer.score(polarity))
}

pub fn aggregate_dimensions(responses: &[SurveyResponse]) -> DimensionAverages {
    let mut totals: BTreeMap<Dimension, (u32, u32)> = BTreeMap::new();

    for response in responses {
        for (question_id, answer) in &response.answers {
            let Some(question) = catalog::question(*question_id) else {
                continue;
            };
            let entry = totals.entry(question.dimension).or_insert((0, 0));
            entry.0 += u32::from(answer.score(question.polarity));
            entry.1 += 1;
        }
    }

    totals
        .into_iter()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(dimension, (sum, count))| {
            (dimension, round_one_decimal(f64::from(sum) / f64::from(count)))
        })
        .collect()
}

/// Mean of the dimensions that have data; zero when none do.
pub fn company_score(averages: &DimensionAverages) -> f64 {
    let present: Vec<f64> = averages
        .values()
        .copied()
        .filter(|average| average.is_finite() && *average > 0.0)
        .collect();

    if present.is_empty() {
        return 0.0;
    }

    round_one_decimal(present.iter().sum::<f64>() / present.len() as f64)
}

/// Share (0–100) of valid answers to `question_id` whose normalized value is at
/// or below `cutoff`.
pub fn risk_percentage(question_id: QuestionId, responses: &[SurveyResponse], cutoff: u8) -> u8 {
    let Some(polarity) = catalog::polarity_of(question_id) else {
        return 0;
    };

    let mut tally = RiskTally::default();
    for answer in responses
        .iter()
        .filter_map(|response| response.answers.get(&question_id))
    {
        tally.record(answer.score(polarity), cutoff);
    }
    tally.percentage()
}

/// Risk percentage for every catalog question that received at least one valid answer.
pub fn heat_map(responses: &[SurveyResponse], cutoff: u8) -> BTreeMap<QuestionId, u8> {
    let mut tallies: BTreeMap<QuestionId, RiskTally> = BTreeMap::new();

    for response in responses {
        for (question_id, answer) in &response.answers {
            let Some(polarity) = catalog::polarity_of(*question_id) else {
                continue;
            };
            tallies
                .entry(*question_id)
                .or_default()
                .record(answer.score(polarity), cutoff);
        }
    }

    tallies
        .into_iter()
        .map(|(question_id, tally)| (question_id, tally.percentage()))
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Default, Clone, Copy)]
struct RiskTally {
    risky: u32,
    answered: u32,
}

impl RiskTally {
    fn record(&mut self, value: u8, cutoff: u8) {
        self.answered += 1;
        if value <= cutoff {
            self.risky += 1;
        }
    }

    fn percentage(self) -> u8 {
        if self.answered == 0 {
            return 0;
        }
        let ratio = f64::from(self.risky) / f64::from(self.answered);
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
