use super::common::*;
use crate::assessment::catalog::{self, Dimension, Polarity, QuestionId};
use crate::assessment::scoring::{
    aggregate_dimensions, company_score, heat_map, normalize_answer, risk_percentage,
    DimensionAverages, ScoringConfig, ScoringEngine,
};

#[test]
fn normal_items_map_scale_positions_directly() {
    assert_eq!(normalize_answer("Nunca", Polarity::Normal), Some(1));
    assert_eq!(normalize_answer("Raramente", Polarity::Normal), Some(2));
    assert_eq!(normalize_answer("Às vezes", Polarity::Normal), Some(3));
    assert_eq!(normalize_answer("Frequentemente", Polarity::Normal), Some(4));
    assert_eq!(normalize_answer("Sempre", Polarity::Normal), Some(5));
    assert_eq!(
        normalize_answer("Discordo totalmente", Polarity::Normal),
        Some(1)
    );
    assert_eq!(
        normalize_answer("Concordo totalmente", Polarity::Normal),
        Some(5)
    );
}

#[test]
fn reversed_items_mirror_the_scale() {
    assert_eq!(normalize_answer("Nunca", Polarity::Reversed), Some(5));
    assert_eq!(normalize_answer("Às vezes", Polarity::Reversed), Some(3));
    assert_eq!(normalize_answer("Sempre", Polarity::Reversed), Some(1));
    assert_eq!(
        normalize_answer("Discordo totalmente", Polarity::Reversed),
        Some(5)
    );
    assert_eq!(
        normalize_answer("Concordo totalmente", Polarity::Reversed),
        Some(1)
    );
}

#[test]
fn labels_are_matched_case_insensitively_in_both_languages() {
    assert_eq!(normalize_answer("  SEMPRE ", Polarity::Normal), Some(5));
    assert_eq!(normalize_answer("as vezes", Polarity::Normal), Some(3));
    assert_eq!(normalize_answer("Strongly Agree", Polarity::Normal), Some(5));
    assert_eq!(normalize_answer("often", Polarity::Reversed), Some(2));
}

#[test]
fn unrecognized_labels_are_excluded() {
    assert_eq!(normalize_answer("Talvez", Polarity::Normal), None);
    assert_eq!(normalize_answer("", Polarity::Reversed), None);
    assert_eq!(normalize_answer("5", Polarity::Normal), None);
}

#[test]
fn best_answers_average_five_for_every_dimension() {
    let answers: Vec<(u8, &str)> = catalog::all()
        .iter()
        .map(|question| (question.id.0, best_label(question.id)))
        .collect();
    let responses = vec![
        response("r1", "Produção", &answers, at(2025, 3, 1)),
        response("r2", "Produção", &answers, at(2025, 3, 2)),
    ];

    let averages = aggregate_dimensions(&responses);
    assert_eq!(averages.len(), 7);
    for (dimension, average) in &averages {
        assert_eq!(*average, 5.0, "{dimension} should be perfect");
    }
    assert_eq!(company_score(&averages), 5.0);
}

#[test]
fn demands_example_rounds_to_one_decimal() {
    let responses = vec![
        response("r1", "Produção", &[(6, "Sempre")], at(2025, 3, 1)),
        response("r2", "Produção", &[(6, "Sempre")], at(2025, 3, 1)),
        response("r3", "Produção", &[(6, "Nunca")], at(2025, 3, 1)),
    ];

    let averages = aggregate_dimensions(&responses);
    assert_eq!(averages.get(&Dimension::Demands), Some(&2.3));
    assert_eq!(averages.len(), 1, "unanswered dimensions are omitted");
}

#[test]
fn empty_response_set_yields_no_dimensions_and_zero_score() {
    let averages = aggregate_dimensions(&[]);
    assert!(averages.is_empty());
    assert_eq!(company_score(&averages), 0.0);
}

#[test]
fn company_score_ignores_zero_averages() {
    let mut averages = DimensionAverages::new();
    averages.insert(Dimension::Demands, 0.0);
    averages.insert(Dimension::Control, 4.0);
    averages.insert(Dimension::Role, 3.0);

    assert_eq!(company_score(&averages), 3.5);
}

#[test]
fn answers_to_unknown_questions_do_not_count() {
    let responses = vec![response(
        "r1",
        "Produção",
        &[(99, "Sempre"), (1, "Sempre")],
        at(2025, 3, 1),
    )];

    let averages = aggregate_dimensions(&responses);
    assert_eq!(averages.len(), 1);
    assert_eq!(averages.get(&Dimension::Role), Some(&5.0));
    assert_eq!(risk_percentage(QuestionId(99), &responses, 3), 0);
}

#[test]
fn risk_percentage_covers_both_extremes() {
    let risky = vec![
        response("r1", "Produção", &[(6, "Sempre")], at(2025, 3, 1)),
        response("r2", "Produção", &[(6, "Às vezes")], at(2025, 3, 1)),
    ];
    assert_eq!(risk_percentage(QuestionId(6), &risky, 3), 100);

    let healthy = vec![
        response("r1", "Produção", &[(6, "Nunca")], at(2025, 3, 1)),
        response("r2", "Produção", &[(6, "Raramente")], at(2025, 3, 1)),
    ];
    assert_eq!(risk_percentage(QuestionId(6), &healthy, 3), 0);
}

#[test]
fn risk_percentage_only_counts_respondents_who_answered() {
    let responses = vec![
        response("r1", "Produção", &[(1, "Nunca")], at(2025, 3, 1)),
        response("r2", "Produção", &[(1, "Sempre")], at(2025, 3, 1)),
        response("r3", "Produção", &[(1, "Frequentemente")], at(2025, 3, 1)),
        response("r4", "Produção", &[(2, "Nunca")], at(2025, 3, 1)),
    ];

    assert_eq!(risk_percentage(QuestionId(1), &responses, 3), 33);
    assert_eq!(risk_percentage(QuestionId(3), &responses, 3), 0);
}

#[test]
fn stricter_cutoff_counts_fewer_answers() {
    let responses = vec![
        response("r1", "Produção", &[(1, "Às vezes")], at(2025, 3, 1)),
        response("r2", "Produção", &[(1, "Raramente")], at(2025, 3, 1)),
    ];

    assert_eq!(risk_percentage(QuestionId(1), &responses, 3), 100);
    assert_eq!(risk_percentage(QuestionId(1), &responses, 2), 50);
}

#[test]
fn heat_map_lists_only_answered_questions() {
    let responses = vec![
        response("r1", "Produção", &[(6, "Sempre"), (1, "Sempre")], at(2025, 3, 1)),
        response("r2", "Produção", &[(6, "Nunca")], at(2025, 3, 1)),
    ];

    let map = heat_map(&responses, 3);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&QuestionId(6)), Some(&50));
    assert_eq!(map.get(&QuestionId(1)), Some(&0));
}

#[test]
fn engine_snapshot_agrees_with_free_functions() {
    let responses = vec![
        response("r1", "Produção", &[(6, "Sempre"), (2, "Sempre")], at(2025, 3, 1)),
        response("r2", "Vendas", &[(6, "Nunca"), (2, "Raramente")], at(2025, 3, 1)),
    ];
    let engine = ScoringEngine::new(ScoringConfig::default());

    let snapshot = engine.score(&responses);
    let averages = aggregate_dimensions(&responses);

    assert_eq!(snapshot.respondents, 2);
    assert_eq!(snapshot.dimension_averages, averages);
    assert_eq!(snapshot.overall_average, company_score(&averages));
    assert_eq!(snapshot.heat_map, heat_map(&responses, 3));
    assert_eq!(engine.risk_percentage(QuestionId(2), &responses), 50);
}
