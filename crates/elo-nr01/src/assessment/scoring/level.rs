use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;

/// Risk classification used by every view of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Classifies a 1–5 average. An average of zero means "no data" and is
    /// treated as high risk so it is never silently reported as healthy.
    pub fn from_average(average: f64, config: &ScoringConfig) -> Self {
        if !average.is_finite() || average <= 0.0 || average < config.critical_threshold {
            RiskLevel::High
        } else if average < config.attention_threshold {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Classifies a heat-map percentage (share of risky answers).
    pub fn from_percentage(percentage: u8, config: &ScoringConfig) -> Self {
        if percentage >= config.high_risk_percentage {
            RiskLevel::High
        } else if percentage >= config.moderate_risk_percentage {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub const fn needs_attention(self) -> bool {
        !matches!(self, RiskLevel::Low)
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Baixo",
            RiskLevel::Moderate => "Moderado",
            RiskLevel::High => "Alto",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_map_to_levels_at_the_configured_edges() {
        let config = ScoringConfig::default();
        assert_eq!(RiskLevel::from_average(2.9, &config), RiskLevel::High);
        assert_eq!(RiskLevel::from_average(3.0, &config), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_average(3.79, &config), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_average(3.8, &config), RiskLevel::Low);
        assert_eq!(RiskLevel::from_average(5.0, &config), RiskLevel::Low);
    }

    #[test]
    fn missing_data_is_high_risk() {
        let config = ScoringConfig::default();
        assert_eq!(RiskLevel::from_average(0.0, &config), RiskLevel::High);
        assert_eq!(RiskLevel::from_average(f64::NAN, &config), RiskLevel::High);
    }

    #[test]
    fn percentages_map_to_levels() {
        let config = ScoringConfig::default();
        assert_eq!(RiskLevel::from_percentage(0, &config), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(24, &config), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(25, &config), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_percentage(50, &config), RiskLevel::High);
        assert_eq!(RiskLevel::from_percentage(100, &config), RiskLevel::High);
    }
}
