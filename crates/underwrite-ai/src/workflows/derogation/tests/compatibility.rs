use super::common::*;
use crate::workflows::derogation::catalog::Catalog;
use crate::workflows::derogation::domain::{RequirementCategory, RequirementGap};
use crate::workflows::derogation::score_compatibility;

#[test]
fn very_high_flexibility_scores_at_least_eighty() {
    let catalog = Catalog::standard();
    let profile = catalog.profile("atlas_mutuelle").expect("profile present");
    let situation = vehicle_sale_situation();
    let requirement = coverage_requirement();
    let gap = RequirementGap::measure(&requirement, &situation);

    let result = score_compatibility(profile, &situation, &requirement, gap.as_ref(), &config());

    assert!(result.score >= 80);
    assert_eq!(result.score, 100);
    assert!(result
        .factors
        .iter()
        .any(|factor| factor.contains("very high flexibility")));
    assert!(result
        .factors
        .iter()
        .any(|factor| factor.contains("is within the tolerated deviation")));
}

#[test]
fn rigid_counterparty_is_penalised() {
    let catalog = Catalog::standard();
    let profile = catalog.profile("granite_direct").expect("profile present");
    let situation = vehicle_sale_situation();

    let result = score_compatibility(profile, &situation, &coverage_requirement(), None, &config());

    assert_eq!(result.score, 30);
    assert_eq!(result.factors.len(), 1);
}

#[test]
fn missing_category_contributes_nothing() {
    let catalog = Catalog::standard();
    let profile = catalog.profile("horizon_assurances").expect("profile present");
    let mut requirement = coverage_requirement();
    requirement.category = RequirementCategory::BonusMalus;

    let result = score_compatibility(
        profile,
        &bare_situation(10.0),
        &requirement,
        None,
        &config(),
    );

    assert_eq!(result.score, 50);
    assert!(result.factors[0].contains("publishes no flexibility"));
}

#[test]
fn score_is_clamped_to_range() {
    let mut tuned = config();
    tuned.compatibility_base = 95;
    let profile = Catalog::standard()
        .profile("atlas_mutuelle")
        .expect("profile present");

    let result = score_compatibility(
        profile,
        &vehicle_sale_situation(),
        &coverage_requirement(),
        None,
        &tuned,
    );
    assert_eq!(result.score, 100);

    tuned.compatibility_base = -80;
    let result = score_compatibility(
        profile,
        &vehicle_sale_situation(),
        &coverage_requirement(),
        None,
        &tuned,
    );
    assert_eq!(result.score, 0);
}
