//! End-to-end derogation advisory scenarios through the public advisor facade.

mod common {
    use underwrite_ai::workflows::derogation::{
        Circumstance, CircumstanceKind, IncomeStability, PersonalContext, Requirement, Situation,
    };

    pub(super) fn requirement() -> Requirement {
        Requirement::continuous_coverage_months(36.0)
    }

    pub(super) fn vehicle_sale() -> Situation {
        Situation::new(Some(35.0))
            .with_circumstance(
                Circumstance::new(CircumstanceKind::VehicleSale, "Sold the car before a move")
                    .verified_with(&["certificate_of_sale.pdf"]),
            )
            .with_context(PersonalContext {
                income_stability: Some(IncomeStability::Stable),
                responsible_claims: Some(0),
                payment_incidents: Some(0),
                years_licensed: Some(12),
                currently_employed: Some(true),
            })
    }
}

use common::*;
use underwrite_ai::workflows::derogation::{
    get_counterparty_profiles, get_scenarios, Circumstance, CircumstanceKind, DerogationAdvisor,
    Situation,
};

#[test]
fn catalog_accessors_return_the_same_data_on_every_call() {
    let first: Vec<&str> = get_scenarios().iter().map(|scenario| scenario.id).collect();
    let second: Vec<&str> = get_scenarios().iter().map(|scenario| scenario.id).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);

    let profiles: Vec<&str> = get_counterparty_profiles()
        .iter()
        .map(|profile| profile.id)
        .collect();
    assert_eq!(
        profiles,
        vec![
            "atlas_mutuelle",
            "horizon_assurances",
            "nordic_shield",
            "solidaris_risk",
            "granite_direct"
        ]
    );
    assert!(std::ptr::eq(get_scenarios(), get_scenarios()));
}

#[test]
fn vehicle_sale_gap_produces_a_ranked_report() {
    let advisor = DerogationAdvisor::default();
    let report = advisor.advise(&vehicle_sale(), &requirement());

    assert_eq!(report.analysis.legitimacy_score, 90);
    let strategy = report
        .analysis
        .recommended_strategy
        .as_ref()
        .expect("vehicle sale scenario matches");
    assert_eq!(strategy.scenario_id, "vehicle_sale_gap");

    let first = report.proposals.first().expect("at least one proposal");
    assert_eq!(first.counterparty_id, "atlas_mutuelle");
    assert!(report
        .proposals
        .windows(2)
        .all(|pair| pair[0].success_probability >= pair[1].success_probability));
    assert!(report
        .proposals
        .iter()
        .all(|proposal| proposal.counterparty_id != "granite_direct"));

    assert_eq!(report.similar_cases.len(), 2);
    assert!(report
        .similar_cases
        .iter()
        .all(|case| case.similarity <= 100));
}

#[test]
fn appending_a_circumstance_never_lowers_legitimacy() {
    let advisor = DerogationAdvisor::default();
    let mut situation = vehicle_sale();
    let before = advisor
        .analyze_situation(&situation, &requirement())
        .legitimacy_score;

    situation.push_circumstance(Circumstance::new(CircumstanceKind::InsurerCancellation, ""));
    let after = advisor
        .analyze_situation(&situation, &requirement())
        .legitimacy_score;

    assert!(after >= before, "{after} < {before}");
}

#[test]
fn situation_without_circumstances_gets_no_strategy_and_no_precedents() {
    let advisor = DerogationAdvisor::default();
    let situation = Situation::new(Some(3.0));

    let analysis = advisor.analyze_situation(&situation, &requirement());
    assert!(analysis.human_factors.is_empty());
    assert!(analysis.recommended_strategy.is_none());
    assert_eq!(
        analysis.legitimacy_score,
        advisor.config().legitimacy_without_factors
    );

    assert!(advisor.find_similar_cases(&situation, &requirement()).is_empty());
}
