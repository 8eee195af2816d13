//! HSE Management Standards Indicator Tool (HSE-IT) questionnaire.
//!
//! Items 1–24 are answered on the frequency scale and items 25–35 on the
//! agreement scale. Demands and Relationships items describe harmful
//! conditions, so they are reverse-coded.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Psychosocial risk category assessed by the questionnaire.
///
/// Declaration order is the canonical order for every report and map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Demands,
    Control,
    ManagerSupport,
    PeerSupport,
    Relationships,
    Role,
    Change,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Demands,
        Dimension::Control,
        Dimension::ManagerSupport,
        Dimension::PeerSupport,
        Dimension::Relationships,
        Dimension::Role,
        Dimension::Change,
    ];

    /// Label printed in the NR-01 report.
    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Demands => "Demandas",
            Dimension::Control => "Controle",
            Dimension::ManagerSupport => "Apoio da Chefia",
            Dimension::PeerSupport => "Apoio dos Colegas",
            Dimension::Relationships => "Relacionamentos",
            Dimension::Role => "Cargo",
            Dimension::Change => "Mudanças",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether frequent agreement with the item is good (`Normal`) or harmful (`Reversed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Normal,
    Reversed,
}

/// Five-point scale an item is presented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Frequency,
    Agreement,
}

/// Item number as printed on the HSE-IT form (1–35).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u8);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{:02}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: &'static str,
    pub dimension: Dimension,
    pub polarity: Polarity,
    pub scale: Scale,
}

const fn item(
    id: u8,
    text: &'static str,
    dimension: Dimension,
    polarity: Polarity,
    scale: Scale,
) -> Question {
    Question {
        id: QuestionId(id),
        text,
        dimension,
        polarity,
        scale,
    }
}

use Dimension::*;
use Polarity::{Normal, Reversed};
use Scale::{Agreement, Frequency};

static QUESTIONS: [Question; 35] = [
    item(1, "Tenho clareza sobre o que se espera de mim no trabalho", Role, Normal, Frequency),
    item(2, "Posso decidir quando fazer uma pausa", Control, Normal, Frequency),
    item(3, "Diferentes grupos no trabalho exigem de mim coisas difíceis de conciliar", Demands, Reversed, Frequency),
    item(4, "Sei como fazer o meu trabalho", Role, Normal, Frequency),
    item(5, "Sou submetido a assédio pessoal na forma de palavras ou comportamentos rudes", Relationships, Reversed, Frequency),
    item(6, "Tenho prazos impossíveis de cumprir", Demands, Reversed, Frequency),
    item(7, "Se o trabalho fica difícil, meus colegas me ajudam", PeerSupport, Normal, Frequency),
    item(8, "Recebo retorno de apoio sobre o trabalho que faço", ManagerSupport, Normal, Frequency),
    item(9, "Tenho que trabalhar muito intensamente", Demands, Reversed, Frequency),
    item(10, "Tenho voz para decidir o ritmo do meu trabalho", Control, Normal, Frequency),
    item(11, "Tenho clareza sobre quais são as minhas tarefas e responsabilidades", Role, Normal, Frequency),
    item(12, "Tenho que deixar de fazer algumas tarefas porque tenho trabalho demais", Demands, Reversed, Frequency),
    item(13, "Tenho clareza sobre os objetivos e metas do meu setor", Role, Normal, Frequency),
    item(14, "Existe atrito ou raiva entre colegas", Relationships, Reversed, Frequency),
    item(15, "Posso escolher como fazer o meu trabalho", Control, Normal, Frequency),
    item(16, "Não consigo fazer pausas suficientes", Demands, Reversed, Frequency),
    item(17, "Entendo como o meu trabalho contribui para o objetivo geral da organização", Role, Normal, Frequency),
    item(18, "Sou pressionado a trabalhar por longas horas", Demands, Reversed, Frequency),
    item(19, "Posso escolher o que fazer no meu trabalho", Control, Normal, Frequency),
    item(20, "Tenho que trabalhar muito rápido", Demands, Reversed, Frequency),
    item(21, "Sou submetido a intimidação ou perseguição no trabalho", Relationships, Reversed, Frequency),
    item(22, "Tenho pressões de prazo irrealistas", Demands, Reversed, Frequency),
    item(23, "Posso contar com minha chefia imediata para me ajudar com um problema de trabalho", ManagerSupport, Normal, Frequency),
    item(24, "Recebo dos colegas a ajuda e o apoio de que preciso", PeerSupport, Normal, Frequency),
    item(25, "Tenho alguma influência sobre a forma como faço o meu trabalho", Control, Normal, Agreement),
    item(26, "Tenho oportunidades suficientes para questionar a chefia sobre mudanças no trabalho", Change, Normal, Agreement),
    item(27, "Recebo o respeito que mereço dos meus colegas de trabalho", PeerSupport, Normal, Agreement),
    item(28, "Os funcionários são sempre consultados sobre mudanças no trabalho", Change, Normal, Agreement),
    item(29, "Posso conversar com minha chefia imediata sobre algo que me chateou ou incomodou", ManagerSupport, Normal, Agreement),
    item(30, "Meu horário de trabalho pode ser flexível", Control, Normal, Agreement),
    item(31, "Meus colegas estão dispostos a ouvir meus problemas relacionados ao trabalho", PeerSupport, Normal, Agreement),
    item(32, "Quando há mudanças no trabalho, tenho clareza de como elas funcionarão na prática", Change, Normal, Agreement),
    item(33, "Recebo apoio durante trabalhos emocionalmente exigentes", ManagerSupport, Normal, Agreement),
    item(34, "Os relacionamentos no trabalho são tensos", Relationships, Reversed, Agreement),
    item(35, "Minha chefia imediata me incentiva no trabalho", ManagerSupport, Normal, Agreement),
];

pub fn all() -> &'static [Question] {
    &QUESTIONS
}

pub fn question(id: QuestionId) -> Option<&'static Question> {
    QUESTIONS.iter().find(|question| question.id == id)
}

pub fn polarity_of(id: QuestionId) -> Option<Polarity> {
    question(id).map(|question| question.polarity)
}

pub fn questions_by_dimension() -> BTreeMap<Dimension, Vec<&'static Question>> {
    let mut grouped: BTreeMap<Dimension, Vec<&'static Question>> = BTreeMap::new();
    for question in QUESTIONS.iter() {
        grouped.entry(question.dimension).or_default().push(question);
    }
    grouped
}

/// Resolves a submission key: the item number (`"6"`, `"q6"`, `"Q06"`) or its text.
pub fn resolve(key: &str) -> Option<&'static Question> {
    let trimmed = key.trim();
    let numeric = trimmed
        .strip_prefix('q')
        .or_else(|| trimmed.strip_prefix('Q'))
        .unwrap_or(trimmed);
    if let Ok(number) = numeric.parse::<u8>() {
        return question(QuestionId(number));
    }

    let wanted = normalize_text(trimmed);
    QUESTIONS
        .iter()
        .find(|question| normalize_text(question.text) == wanted)
}

fn normalize_text(text: &str) -> String {
    text.trim()
        .trim_end_matches(['?', '.'])
        .trim_end()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_dimension_with_hse_item_counts() {
        let grouped = questions_by_dimension();
        let counts: Vec<(Dimension, usize)> = grouped
            .iter()
            .map(|(dimension, questions)| (*dimension, questions.len()))
            .collect();

        assert_eq!(
            counts,
            vec![
                (Demands, 8),
                (Control, 6),
                (ManagerSupport, 5),
                (PeerSupport, 4),
                (Relationships, 4),
                (Role, 5),
                (Change, 3),
            ]
        );
        assert_eq!(all().len(), 35);
    }

    #[test]
    fn item_numbers_are_sequential() {
        for (index, question) in all().iter().enumerate() {
            assert_eq!(usize::from(question.id.0), index + 1);
        }
    }

    #[test]
    fn only_demands_and_relationships_are_reversed() {
        for question in all() {
            let expected = matches!(question.dimension, Demands | Relationships);
            assert_eq!(
                question.polarity == Reversed,
                expected,
                "unexpected polarity for {}",
                question.id
            );
        }
    }

    #[test]
    fn polarity_lookup_ignores_unknown_ids() {
        assert_eq!(polarity_of(QuestionId(6)), Some(Reversed));
        assert_eq!(polarity_of(QuestionId(1)), Some(Normal));
        assert_eq!(polarity_of(QuestionId(0)), None);
        assert_eq!(polarity_of(QuestionId(36)), None);
    }

    #[test]
    fn resolve_accepts_numbers_and_text() {
        assert_eq!(resolve("6").map(|q| q.id), Some(QuestionId(6)));
        assert_eq!(resolve("q06").map(|q| q.id), Some(QuestionId(6)));
        assert_eq!(resolve("Q35").map(|q| q.id), Some(QuestionId(35)));
        assert_eq!(
            resolve("tenho prazos impossíveis de cumprir?").map(|q| q.id),
            Some(QuestionId(6))
        );
        assert!(resolve("Qual é a sua cor favorita?").is_none());
        assert!(resolve("99").is_none());
    }
}
