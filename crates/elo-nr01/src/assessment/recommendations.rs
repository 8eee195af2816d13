//! Remediation actions drawn from the HSE Management Standards workbook.

use serde::{Deserialize, Serialize};

use super::catalog::Dimension;
use super::scoring::{DimensionAverages, RiskLevel, ScoringConfig};

/// Suggested action for the NR-01 action plan. Owner and deadline are
/// placeholders the consultant fills in with the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecommendation {
    pub title: String,
    pub rationale: String,
    /// `None` for the maintenance actions suggested when no dimension needs attention.
    pub dimension: Option<Dimension>,
    pub responsible_placeholder: String,
    pub deadline_placeholder: String,
}

struct ActionTemplate {
    dimension: Option<Dimension>,
    title: &'static str,
    rationale: &'static str,
    responsible: &'static str,
    deadline: &'static str,
}

impl ActionTemplate {
    fn to_recommendation(&self) -> ActionRecommendation {
        ActionRecommendation {
            title: self.title.to_string(),
            rationale: self.rationale.to_string(),
            dimension: self.dimension,
            responsible_placeholder: self.responsible.to_string(),
            deadline_placeholder: self.deadline.to_string(),
        }
    }
}

const fn action(
    dimension: Dimension,
    title: &'static str,
    rationale: &'static str,
    responsible: &'static str,
    deadline: &'static str,
) -> ActionTemplate {
    ActionTemplate {
        dimension: Some(dimension),
        title,
        rationale,
        responsible,
        deadline,
    }
}

const fn maintenance(
    title: &'static str,
    rationale: &'static str,
    responsible: &'static str,
    deadline: &'static str,
) -> ActionTemplate {
    ActionTemplate {
        dimension: None,
        title,
        rationale,
        responsible,
        deadline,
    }
}

static ACTION_CATALOG: &[ActionTemplate] = &[
    action(
        Dimension::Demands,
        "Revisão de Job Description e distribuição de carga",
        "Redistribuir a carga de trabalho entre a equipe e alinhar as atribuições descritas às tarefas reais.",
        "RH / Gestores de área",
        "60 dias",
    ),
    action(
        Dimension::Demands,
        "Matriz de Priorização de tarefas",
        "Adotar uma matriz de urgência e importância para reduzir demandas conflitantes.",
        "Gestores de área",
        "30 dias",
    ),
    action(
        Dimension::Demands,
        "Renegociação de prazos irrealistas",
        "Revisar com os clientes internos os prazos que exigem jornadas prolongadas.",
        "Diretoria / Gestores de área",
        "90 dias",
    ),
    action(
        Dimension::Control,
        "Autonomia sobre o ritmo de trabalho",
        "Permitir que os colaboradores ajustem o próprio ritmo e o momento das pausas.",
        "Gestores de área",
        "60 dias",
    ),
    action(
        Dimension::Control,
        "Micro-decisões sobre a ordem das tarefas",
        "Dar liberdade para organizar a sequência das atividades dentro da jornada.",
        "Líderes de equipe",
        "30 dias",
    ),
    action(
        Dimension::Control,
        "Fóruns de participação em melhorias de processo",
        "Criar espaços periódicos para que a equipe proponha mudanças na forma de trabalhar.",
        "RH / Qualidade",
        "90 dias",
    ),
    action(
        Dimension::ManagerSupport,
        "Treinamento de liderança em escuta ativa e feedback",
        "Capacitar a chefia imediata para oferecer retorno de apoio e acolher dificuldades.",
        "RH / Treinamento",
        "90 dias",
    ),
    action(
        Dimension::ManagerSupport,
        "Reuniões 1:1 focadas em desenvolvimento",
        "Estabelecer encontros individuais regulares entre liderança e colaboradores.",
        "Gestores de área",
        "30 dias",
    ),
    action(
        Dimension::ManagerSupport,
        "Canais de suporte técnico e emocional",
        "Divulgar a quem recorrer em situações de trabalho emocionalmente exigentes.",
        "RH / SESMT",
        "60 dias",
    ),
    action(
        Dimension::PeerSupport,
        "Programa de integração e padrinhos",
        "Designar colegas de referência para apoiar novos integrantes e tarefas difíceis.",
        "RH",
        "60 dias",
    ),
    action(
        Dimension::PeerSupport,
        "Rituais de colaboração entre equipes",
        "Promover encontros curtos de troca para que os colegas compartilhem dificuldades.",
        "Líderes de equipe",
        "30 dias",
    ),
    action(
        Dimension::Relationships,
        "Reforço da política de combate ao assédio e à discriminação",
        "Revisar, divulgar e treinar a política, com canal de denúncia confidencial.",
        "RH / Compliance",
        "30 dias",
    ),
    action(
        Dimension::Relationships,
        "Workshop de Comunicação Não-Violenta (CNV)",
        "Desenvolver habilidades de comunicação para reduzir atritos entre colegas.",
        "RH / Treinamento",
        "60 dias",
    ),
    action(
        Dimension::Relationships,
        "Mediação de conflitos interpessoais",
        "Tratar os conflitos identificados com mediação conduzida por profissional neutro.",
        "RH / SESMT",
        "45 dias",
    ),
    action(
        Dimension::Role,
        "Clarificação de papéis e responsabilidades",
        "Documentar e comunicar as responsabilidades de cada função e do setor.",
        "RH / Gestores de área",
        "60 dias",
    ),
    action(
        Dimension::Role,
        "Desdobramento de metas do setor",
        "Explicar como os objetivos individuais contribuem para as metas da organização.",
        "Diretoria / Gestores de área",
        "90 dias",
    ),
    action(
        Dimension::Change,
        "Plano de comunicação de mudanças",
        "Informar com antecedência o que muda, por que muda e como funcionará na prática.",
        "Diretoria / Comunicação interna",
        "30 dias",
    ),
    action(
        Dimension::Change,
        "Consulta prévia aos colaboradores",
        "Ouvir as equipes afetadas antes de implementar mudanças na organização do trabalho.",
        "Gestores de área",
        "60 dias",
    ),
];

static MAINTENANCE_ACTIONS: &[ActionTemplate] = &[
    maintenance(
        "Monitoramento anual dos fatores psicossociais",
        "Reaplicar o questionário HSE-IT para acompanhar a evolução dos indicadores.",
        "SESMT / Consultoria",
        "12 meses",
    ),
    maintenance(
        "Programa de engajamento e bem-estar",
        "Manter ações de valorização e canais abertos de escuta para preservar o clima.",
        "RH",
        "Contínuo",
    ),
    maintenance(
        "Registro dos resultados no PGR",
        "Documentar o diagnóstico no Programa de Gerenciamento de Riscos conforme a NR-01.",
        "SESMT",
        "30 dias",
    ),
];

/// Catalog actions for every dimension below `threshold` (or with an average of
/// zero), in catalog order. Falls back to the maintenance list when nothing triggers.
pub fn recommend(averages: &DimensionAverages, threshold: f64) -> Vec<ActionRecommendation> {
    let config = ScoringConfig {
        attention_threshold: threshold,
        critical_threshold: threshold.min(ScoringConfig::default().critical_threshold),
        ..ScoringConfig::default()
    };
    recommend_with(averages, &config)
}

pub fn recommend_with(
    averages: &DimensionAverages,
    config: &ScoringConfig,
) -> Vec<ActionRecommendation> {
    let triggered: Vec<Dimension> = averages
        .iter()
        .filter(|(_, average)| RiskLevel::from_average(**average, config).needs_attention())
        .map(|(dimension, _)| *dimension)
        .collect();

    let selected: Vec<ActionRecommendation> = ACTION_CATALOG
        .iter()
        .filter(|template| {
            template
                .dimension
                .is_some_and(|dimension| triggered.contains(&dimension))
        })
        .map(ActionTemplate::to_recommendation)
        .collect();

    if selected.is_empty() {
        return maintenance_actions();
    }
    selected
}

pub fn maintenance_actions() -> Vec<ActionRecommendation> {
    MAINTENANCE_ACTIONS
        .iter()
        .map(ActionTemplate::to_recommendation)
        .collect()
}

/// Actions the consultant keeps for the final report, plus custom ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    items: Vec<ActionRecommendation>,
}

impl ActionPlan {
    /// Builds a plan from suggestions, keeping the first occurrence of each title.
    pub fn from_recommendations(recommendations: Vec<ActionRecommendation>) -> Self {
        let mut plan = Self::default();
        for recommendation in recommendations {
            plan.push(recommendation);
        }
        plan
    }

    /// Adds a consultant-written action. Blank or already planned titles are ignored.
    pub fn add_custom(&mut self, title: &str, dimension: Option<Dimension>) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        self.push(ActionRecommendation {
            title: title.to_string(),
            rationale: "Ação personalizada definida pela consultoria.".to_string(),
            dimension,
            responsible_placeholder: "A definir".to_string(),
            deadline_placeholder: "A definir".to_string(),
        })
    }

    pub fn remove(&mut self, title: &str) -> Option<ActionRecommendation> {
        let index = self
            .items
            .iter()
            .position(|item| same_title(&item.title, title))?;
        Some(self.items.remove(index))
    }

    pub fn items(&self) -> &[ActionRecommendation] {
        &self.items
    }

    fn push(&mut self, recommendation: ActionRecommendation) -> bool {
        let duplicate = self
            .items
            .iter()
            .any(|item| same_title(&item.title, &recommendation.title));
        if duplicate {
            return false;
        }
        self.items.push(recommendation);
        true
    }
}

/// Titles are Portuguese, so case folding has to cover accented letters.
fn same_title(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}
