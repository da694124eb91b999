use super::common::*;
use crate::workflows::derogation::catalog::{TriggerOperator, TriggerValue};
use crate::workflows::derogation::domain::{Circumstance, CircumstanceKind, PersonalContext};
use crate::workflows::derogation::{evaluate_trigger, match_scenario, Catalog};

#[test]
fn vehicle_sale_selects_period_gap_scenario() {
    let found = match_scenario(Catalog::standard(), &vehicle_sale_situation(), &config())
        .expect("scenario matched");

    assert_eq!(found.scenario.id, "vehicle_sale_gap");
    assert_eq!(found.scenario.name, "Vehicle sold — period gap");
    assert!((found.coverage() - 1.0).abs() < 1e-9);
    assert!(found.matched_conditions.contains(&"vehicle_sale_verified"));
}

#[test]
fn situation_without_circumstances_matches_nothing() {
    let situation = bare_situation(3.0);
    assert!(match_scenario(Catalog::standard(), &situation, &config()).is_none());
}

#[test]
fn unknown_condition_never_matches() {
    let mut situation = vehicle_sale_situation();
    situation.push_mitigating_factor("Long-standing customer", 0.9);

    for threshold in [
        TriggerValue::Bool(true),
        TriggerValue::Bool(false),
        TriggerValue::Number(0.0),
        TriggerValue::Text("vehicle_sale"),
    ] {
        for operator in [
            TriggerOperator::Equals,
            TriggerOperator::LessThan,
            TriggerOperator::GreaterThan,
            TriggerOperator::Contains,
        ] {
            let probe = trigger("has_teleporter", operator, threshold, 1.0);
            assert!(!evaluate_trigger(&probe, &situation));
            let probe = trigger("favourite_colour", operator, threshold, 1.0);
            assert!(!evaluate_trigger(&probe, &situation));
        }
    }
}

#[test]
fn missing_optional_data_is_a_non_match() {
    let situation = bare_situation(10.0);
    let probe = trigger(
        "claims_count",
        TriggerOperator::LessThan,
        TriggerValue::Number(5.0),
        1.0,
    );
    assert!(!evaluate_trigger(&probe, &situation));

    let situation = situation.with_context(PersonalContext {
        responsible_claims: Some(1),
        ..PersonalContext::default()
    });
    assert!(evaluate_trigger(&probe, &situation));
}

#[test]
fn contains_checks_circumstance_kinds() {
    let situation = bare_situation(20.0)
        .with_circumstance(Circumstance::new(CircumstanceKind::JobLoss, "Plant closure"));
    let probe = trigger(
        "circumstance_kinds",
        TriggerOperator::Contains,
        TriggerValue::Text("JOB_LOSS"),
        1.0,
    );
    assert!(evaluate_trigger(&probe, &situation));

    let mismatched = trigger(
        "circumstance_kinds",
        TriggerOperator::Equals,
        TriggerValue::Text("job_loss"),
        1.0,
    );
    assert!(!evaluate_trigger(&mismatched, &situation));
}

#[test]
fn acceptance_requires_more_than_half_the_weight() {
    let catalog = leaked_catalog(vec![scenario(
        "half",
        vec![
            trigger(
                "has_divorce",
                TriggerOperator::Equals,
                TriggerValue::Bool(true),
                0.5,
            ),
            trigger(
                "has_bereavement",
                TriggerOperator::Equals,
                TriggerValue::Bool(true),
                0.5,
            ),
        ],
    )]);
    let situation = bare_situation(12.0)
        .with_circumstance(Circumstance::new(CircumstanceKind::Divorce, "Separation"));

    assert!(match_scenario(catalog, &situation, &config()).is_none());
}

#[test]
fn ties_keep_catalog_order() {
    let catalog = leaked_catalog(vec![
        scenario(
            "first",
            vec![trigger(
                "has_relocation",
                TriggerOperator::Equals,
                TriggerValue::Bool(true),
                1.0,
            )],
        ),
        scenario(
            "second",
            vec![trigger(
                "actual_value",
                TriggerOperator::GreaterThan,
                TriggerValue::Number(1.0),
                1.0,
            )],
        ),
    ]);
    let situation = bare_situation(12.0)
        .with_circumstance(Circumstance::new(CircumstanceKind::Relocation, "Back from Lyon"));

    let found = match_scenario(catalog, &situation, &config()).expect("tie resolved");
    assert_eq!(found.scenario.id, "first");
}

#[test]
fn highest_weighted_sum_wins_over_catalog_order() {
    let catalog = leaked_catalog(vec![
        scenario(
            "light",
            vec![trigger(
                "actual_value",
                TriggerOperator::GreaterThan,
                TriggerValue::Number(1.0),
                0.6,
            )],
        ),
        scenario(
            "heavy",
            vec![trigger(
                "actual_value",
                TriggerOperator::GreaterThan,
                TriggerValue::Number(1.0),
                0.9,
            )],
        ),
    ]);

    let found = match_scenario(catalog, &bare_situation(6.0), &config()).expect("matched");
    assert_eq!(found.scenario.id, "heavy");
}
