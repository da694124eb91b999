use super::common::*;
use crate::workflows::derogation::domain::{Circumstance, CircumstanceKind};

#[test]
fn vehicle_sale_finds_sale_precedents() {
    let cases = advisor().find_similar_cases(&vehicle_sale_situation(), &coverage_requirement());

    assert_eq!(cases.len(), 2);
    assert!(cases.iter().all(|case| case.similarity == 70));
    assert!(cases.iter().all(|case| case.scenario_id == "vehicle_sale_gap"));
    assert!(cases[1].conditions.is_some());
}

#[test]
fn each_matching_circumstance_adds_similarity() {
    let situation = bare_situation(18.0)
        .with_circumstance(Circumstance::new(CircumstanceKind::JobLoss, "Layoff"))
        .with_circumstance(Circumstance::new(
            CircumstanceKind::InsurerCancellation,
            "Cancelled for unpaid premiums",
        ));

    let cases = advisor().find_similar_cases(&situation, &coverage_requirement());

    assert_eq!(cases[0].scenario_id, "job_loss_interruption");
    assert_eq!(cases[0].similarity, 90);
    assert!(cases.iter().skip(1).all(|case| case.similarity <= 90));
    assert!(cases
        .iter()
        .any(|case| case.scenario_id == "insurer_cancellation_recovery"));
}

#[test]
fn similarity_is_capped_at_one_hundred() {
    let mut situation = bare_situation(30.0);
    for _ in 0..4 {
        situation.push_circumstance(Circumstance::new(CircumstanceKind::VehicleSale, "Sold"));
    }

    let cases = advisor().find_similar_cases(&situation, &coverage_requirement());
    assert!(cases.iter().all(|case| case.similarity == 100));
}

#[test]
fn no_circumstances_means_no_precedents() {
    let cases = advisor().find_similar_cases(&bare_situation(10.0), &coverage_requirement());
    assert!(cases.is_empty());
}
