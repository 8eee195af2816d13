use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{Polarity, QuestionId, Scale};

/// Access code the company distributes to its employees (e.g. `IND01`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex-encoded one-way digest of a respondent identifier, scoped to one company.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RespondentHash(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub String);

impl ResponseId {
    /// Placeholder carried until the service assigns the sequential id.
    pub(crate) fn pending() -> Self {
        Self(String::new())
    }
}

/// Company record owned by the registration flow. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// Number of employees (`func`), used for adherence.
    pub headcount: u32,
    /// Contracted response quota.
    pub limit_evals: u32,
    /// Last day on which submissions are accepted.
    pub valid_until: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyLabel {
    Never,
    Seldom,
    Sometimes,
    Often,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgreementLabel {
    StronglyDisagree,
    Disagree,
    Neutral,
    Agree,
    StronglyAgree,
}

/// Recognized answer on one of the two five-point scales.
///
/// Serialized as its Portuguese form label so stored responses stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AnswerLabel {
    Frequency(FrequencyLabel),
    Agreement(AgreementLabel),
}

impl AnswerLabel {
    /// Parses a form label in Portuguese or English. Unknown labels yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        use AgreementLabel::*;
        use FrequencyLabel::*;

        let label = match raw.trim().to_lowercase().as_str() {
            "nunca" | "never" => Self::Frequency(Never),
            "raramente" | "seldom" | "rarely" => Self::Frequency(Seldom),
            "às vezes" | "as vezes" | "sometimes" => Self::Frequency(Sometimes),
            "frequentemente" | "often" => Self::Frequency(Often),
            "sempre" | "always" => Self::Frequency(Always),
            "discordo totalmente" | "strongly disagree" => Self::Agreement(StronglyDisagree),
            "discordo" | "disagree" => Self::Agreement(Disagree),
            "neutro" | "nem concordo nem discordo" | "neutral" => Self::Agreement(Neutral),
            "concordo" | "agree" => Self::Agreement(Agree),
            "concordo totalmente" | "strongly agree" => Self::Agreement(StronglyAgree),
            _ => return None,
        };
        Some(label)
    }

    pub const fn scale(self) -> Scale {
        match self {
            AnswerLabel::Frequency(_) => Scale::Frequency,
            AnswerLabel::Agreement(_) => Scale::Agreement,
        }
    }

    /// Position on the scale, 1 (`Nunca` / `Discordo totalmente`) to 5.
    pub const fn position(self) -> u8 {
        match self {
            AnswerLabel::Frequency(label) => match label {
                FrequencyLabel::Never => 1,
                FrequencyLabel::Seldom => 2,
                FrequencyLabel::Sometimes => 3,
                FrequencyLabel::Often => 4,
                FrequencyLabel::Always => 5,
            },
            AnswerLabel::Agreement(label) => match label {
                AgreementLabel::StronglyDisagree => 1,
                AgreementLabel::Disagree => 2,
                AgreementLabel::Neutral => 3,
                AgreementLabel::Agree => 4,
                AgreementLabel::StronglyAgree => 5,
            },
        }
    }

    /// Numeric value 1–5 where 5 is always the healthiest answer.
    pub const fn score(self, polarity: Polarity) -> u8 {
        match polarity {
            Polarity::Normal => self.position(),
            Polarity::Reversed => 6 - self.position(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AnswerLabel::Frequency(label) => match label {
                FrequencyLabel::Never => "Nunca",
                FrequencyLabel::Seldom => "Raramente",
                FrequencyLabel::Sometimes => "Às vezes",
                FrequencyLabel::Often => "Frequentemente",
                FrequencyLabel::Always => "Sempre",
            },
            AnswerLabel::Agreement(label) => match label {
                AgreementLabel::StronglyDisagree => "Discordo totalmente",
                AgreementLabel::Disagree => "Discordo",
                AgreementLabel::Neutral => "Neutro",
                AgreementLabel::Agree => "Concordo",
                AgreementLabel::StronglyAgree => "Concordo totalmente",
            },
        }
    }
}

impl From<AnswerLabel> for String {
    fn from(value: AnswerLabel) -> Self {
        value.label().to_string()
    }
}

impl TryFrom<String> for AnswerLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AnswerLabel::parse(&value).ok_or_else(|| format!("unrecognized answer label '{value}'"))
    }
}

/// Stored survey response. Appended once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: ResponseId,
    pub company_id: CompanyId,
    pub respondent_hash: RespondentHash,
    /// Department label, used for GHE/GES segmentation only.
    pub setor: String,
    pub answers: BTreeMap<QuestionId, AnswerLabel>,
    pub submitted_at: DateTime<Utc>,
}

/// Payload posted by the survey form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    /// Raw identifier (badge number, e-mail). Hashed before storage, never persisted.
    pub respondent_id: String,
    #[serde(default)]
    pub setor: String,
    /// Question text or item number mapped to the selected label.
    pub answers: BTreeMap<String, String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}
