use serde::{Deserialize, Serialize};

/// Thresholds shared by the dimension scores, the heat-map and the recommendation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Dimension averages below this value trigger remediation actions.
    pub attention_threshold: f64,
    /// Dimension averages below this value are reported as high risk.
    pub critical_threshold: f64,
    /// Highest normalized answer (1–5) counted as a risky answer in the heat-map.
    pub risk_cutoff: u8,
    /// Heat-map percentage from which a question is reported as high risk.
    pub high_risk_percentage: u8,
    /// Heat-map percentage from which a question is reported as moderate risk.
    pub moderate_risk_percentage: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            attention_threshold: 3.8,
            critical_threshold: 3.0,
            risk_cutoff: 3,
            high_risk_percentage: 50,
            moderate_risk_percentage: 25,
        }
    }
}
