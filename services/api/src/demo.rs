use crate::infra::{parse_company, InMemoryCompanyRepository, InMemoryResponseRepository};
use chrono::{DateTime, TimeZone, Utc};
use clap::Args;
use elo_nr01::assessment::catalog::{self, Question};
use elo_nr01::assessment::{
    ActionPlan, AssessmentService, AssessmentServiceError, CompanyDiagnostic, CompanyId,
    Dimension, Granularity, HistoryBucket, Polarity, Scale, SurveySubmission,
};
use elo_nr01::config::AppConfig;
use elo_nr01::error::AppError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

const FREQUENCY_LABELS: [&str; 5] = ["Nunca", "Raramente", "Às vezes", "Frequentemente", "Sempre"];
const AGREEMENT_LABELS: [&str; 5] = [
    "Discordo totalmente",
    "Discordo",
    "Neutro",
    "Concordo",
    "Concordo totalmente",
];
const SECTORS: [&str; 3] = ["Produção", "Administrativo", "Logística"];
const DEMO_MONTHS: u32 = 6;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Company code to seed and report on
    #[arg(long, default_value = "IND01", value_parser = parse_company)]
    pub(crate) company: CompanyId,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Group the history by quarter instead of by month
    #[arg(long)]
    pub(crate) quarterly: bool,
}

#[derive(Debug, Serialize)]
struct DemoReport {
    diagnostic: CompanyDiagnostic,
    history: Vec<HistoryBucket>,
    action_plan: ActionPlan,
    rejected_resubmissions: usize,
}

pub(crate) fn run_catalog() {
    println!("Questionário HSE-IT ({} itens)", catalog::all().len());
    for (dimension, questions) in catalog::questions_by_dimension() {
        println!("\n{} ({} itens)", dimension.label(), questions.len());
        for question in questions {
            let marker = match question.polarity {
                Polarity::Normal => "",
                Polarity::Reversed => " [invertida]",
            };
            println!("  {} {}{}", question.id, question.text, marker);
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        company,
        json,
        quarterly,
    } = args;

    let config = AppConfig::load()?;
    let companies = InMemoryCompanyRepository::seeded();
    let service = AssessmentService::new(
        Arc::new(InMemoryResponseRepository::default()),
        Arc::new(companies.clone()),
        config.scoring,
    );

    let registered = companies
        .companies()
        .into_iter()
        .find(|candidate| candidate.id == company)
        .ok_or_else(|| AssessmentServiceError::UnknownCompany(company.clone()))?;

    let weak = weak_dimensions(&company);
    let respondents = registered.headcount.min(registered.limit_evals).min(36);
    for index in 0..respondents {
        service.submit(&company, synthetic_submission(index, &weak))?;
    }

    // Replaying the first respondent must be refused.
    let rejected_resubmissions = match service.submit(&company, synthetic_submission(0, &weak)) {
        Err(AssessmentServiceError::Rejected(_)) => 1,
        Err(other) => return Err(other.into()),
        Ok(_) => 0,
    };

    let granularity = if quarterly {
        Granularity::Quarter
    } else {
        Granularity::Month
    };
    let diagnostic = service.diagnostic(&company)?;
    let history = service.history(&company, granularity)?;
    let mut action_plan = ActionPlan::from_recommendations(diagnostic.recommendations.clone());
    action_plan.add_custom("Reunião de devolutiva com a liderança", None);

    let report = DemoReport {
        diagnostic,
        history,
        action_plan,
        rejected_resubmissions,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }
    Ok(())
}

fn weak_dimensions(company: &CompanyId) -> Vec<Dimension> {
    match company.0.as_str() {
        "TECH02" => vec![Dimension::ManagerSupport, Dimension::Role],
        _ => vec![Dimension::Demands, Dimension::Change],
    }
}

/// Deterministic answers: weak dimensions hover around 2, the rest around 4,
/// and weak dimensions improve in the second half of the period.
fn synthetic_submission(index: u32, weak: &[Dimension]) -> SurveySubmission {
    let month = index % DEMO_MONTHS + 1;
    let improving = u32::from(month > DEMO_MONTHS / 2);

    let answers: BTreeMap<String, String> = catalog::all()
        .iter()
        .map(|question| {
            let base = if weak.contains(&question.dimension) {
                2 + improving
            } else {
                4
            };
            let jitter = (index * 7 + u32::from(question.id.0) * 3) % 3;
            let score = (base + jitter).saturating_sub(1).clamp(1, 5);
            (question.id.to_string(), label_for(question, score))
        })
        .collect();

    SurveySubmission {
        respondent_id: format!("colaborador-{index:03}"),
        setor: SECTORS[index as usize % SECTORS.len()].to_string(),
        answers,
        submitted_at: Some(demo_timestamp(month, index)),
    }
}

fn label_for(question: &Question, score: u32) -> String {
    let position = match question.polarity {
        Polarity::Normal => score,
        Polarity::Reversed => 6 - score,
    };
    let labels = match question.scale {
        Scale::Frequency => &FREQUENCY_LABELS,
        Scale::Agreement => &AGREEMENT_LABELS,
    };
    labels[(position - 1) as usize].to_string()
}

fn demo_timestamp(month: u32, index: u32) -> DateTime<Utc> {
    let day = index % 27 + 1;
    Utc.with_ymd_and_hms(2025, month, day, 10, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn render_report(report: &DemoReport) {
    let diagnostic = &report.diagnostic;
    println!(
        "Diagnóstico psicossocial: {} ({})",
        diagnostic.company_name, diagnostic.company_id
    );
    println!(
        "- {} respondentes | adesão {}% | índice geral {:.1}{}",
        diagnostic.respondents,
        diagnostic.adherence_percentage,
        diagnostic.overall_average,
        diagnostic
            .overall_level
            .map(|level| format!(" ({})", level.label()))
            .unwrap_or_default()
    );
    println!(
        "- {} reenvio(s) do mesmo colaborador bloqueado(s)",
        report.rejected_resubmissions
    );
    match diagnostic.critical_dimension {
        Some(dimension) => println!("- Dimensão crítica: {}", dimension.label()),
        None => println!("- Nenhuma dimensão em atenção"),
    }

    println!("\nDimensões");
    for summary in &diagnostic.dimensions {
        println!(
            "  - {:<20} {:.1} ({})",
            summary.label,
            summary.average,
            summary.level.label()
        );
    }

    let mut hotspots: Vec<_> = diagnostic
        .heat_map
        .iter()
        .filter(|view| view.level.needs_attention())
        .collect();
    hotspots.sort_by(|a, b| b.risk_percentage.cmp(&a.risk_percentage));
    if hotspots.is_empty() {
        println!("\nMapa de calor: nenhuma questão em risco");
    } else {
        println!("\nMapa de calor (questões em risco)");
        for view in hotspots.iter().take(8) {
            println!(
                "  - {} {}% {} ({})",
                view.question_id,
                view.risk_percentage,
                view.text,
                view.level.label()
            );
        }
    }

    println!("\nSetores");
    for sector in &diagnostic.sectors {
        println!(
            "  - {:<15} {} respondentes | índice {:.1}",
            sector.setor, sector.respondents, sector.overall_average
        );
    }

    println!("\nHistórico");
    for bucket in &report.history {
        println!(
            "  - {:<8} {} respondentes | índice {:.1} | adesão {}%",
            bucket.period_label,
            bucket.respondents,
            bucket.overall_average,
            bucket.adherence_percentage
        );
    }

    println!("\nPlano de ação");
    for item in report.action_plan.items() {
        let scope = item
            .dimension
            .map(|dimension| dimension.label())
            .unwrap_or("Geral");
        println!(
            "  - [{}] {} | responsável: {} | prazo: {}",
            scope, item.title, item.responsible_placeholder, item.deadline_placeholder
        );
    }
}
