use super::common::*;
use crate::workflows::quote::{
    generate_recommendations, AnswerValue, Priority, ProductType, RecommendationKind,
};

fn ids(product: ProductType, pairs: &[(&str, AnswerValue)], score: u8) -> Vec<String> {
    generate_recommendations(product, &answers(pairs), score)
        .into_iter()
        .map(|hint| hint.id)
        .collect()
}

#[test]
fn auto_hints_are_ordered_by_priority() {
    let hints = generate_recommendations(
        ProductType::Auto,
        &answers(&[
            ("housing_status", text("owner")),
            ("annual_mileage", number(5_000.0)),
            ("vehicle_count", number(2.0)),
            ("monthly_budget", number(30.0)),
        ]),
        85,
    );

    let ids: Vec<&str> = hints.iter().map(|hint| hint.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "home_bundle",
            "multi_vehicle",
            "pay_per_mile",
            "higher_deductible",
            "premium_tier"
        ]
    );
    assert_eq!(hints[0].kind, RecommendationKind::CrossSell);
    assert_eq!(hints[0].expected_saving_pct, Some(15.0));
    assert_eq!(hints.last().map(|hint| hint.priority), Some(Priority::Low));
}

#[test]
fn bundle_is_only_offered_on_auto() {
    assert!(ids(ProductType::Home, &[("housing_status", text("owner"))], 50).is_empty());
}

#[test]
fn home_without_alarm_gets_security_hint() {
    assert_eq!(
        ids(ProductType::Home, &[("security_system", text("no"))], 50),
        vec!["security_discount"]
    );
    assert_eq!(
        ids(ProductType::Home, &[("security_system", AnswerValue::Bool(false))], 50),
        vec!["security_discount"]
    );
    assert!(ids(ProductType::Home, &[("security_system", text("yes"))], 50).is_empty());
}

#[test]
fn large_health_household_gets_family_plan() {
    assert_eq!(
        ids(ProductType::Health, &[("household_members", number(4.0))], 70),
        vec!["family_plan"]
    );
    assert!(ids(ProductType::Health, &[("household_members", number(2.0))], 70).is_empty());
}

#[test]
fn premium_tier_requires_strong_eligibility() {
    assert!(ids(ProductType::Life, &[], 80).is_empty());
    assert_eq!(ids(ProductType::Life, &[], 81), vec!["premium_tier"]);
}
