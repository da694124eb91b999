use super::common::*;
use crate::workflows::derogation::domain::{
    Circumstance, CircumstanceKind, ProposalDecision, ProposalStatus, ProposalStatusError,
    ProposalType,
};
use crate::workflows::derogation::score_compatibility;

fn assert_sorted(probabilities: &[u8]) {
    for pair in probabilities.windows(2) {
        assert!(pair[0] >= pair[1], "{probabilities:?} not descending");
    }
}

#[test]
fn vehicle_sale_proposals_are_ranked_and_justified() {
    let advisor = advisor();
    let situation = vehicle_sale_situation();
    let requirement = coverage_requirement();
    let analysis = advisor.analyze_situation(&situation, &requirement);

    let proposals = advisor.generate_derogation_proposals_at(
        &situation,
        &requirement,
        analysis.gap.as_ref(),
        &analysis,
        issued_at(),
    );

    let ids: Vec<&str> = proposals
        .iter()
        .map(|proposal| proposal.counterparty_id.as_str())
        .collect();
    assert_eq!(ids, vec!["atlas_mutuelle", "nordic_shield", "horizon_assurances"]);
    assert_sorted(
        &proposals
            .iter()
            .map(|proposal| proposal.success_probability)
            .collect::<Vec<_>>(),
    );

    let best = &proposals[0];
    assert_eq!(best.proposal_type, ProposalType::FullWaiver);
    assert_eq!(best.success_probability, 95);
    assert_eq!(best.premium_adjustment_pct, 0.0);
    assert_eq!(best.status, ProposalStatus::Draft);
    assert_eq!(best.id, format!("prop-{}-atlas_mutuelle", issued_at().timestamp_millis()));
    assert!(best.justification.precedents[0].contains("Atlas Mutuelle"));
    assert!(!best.justification.key_arguments.is_empty());

    let horizon = &proposals[2];
    assert_eq!(horizon.proposal_type, ProposalType::ConditionalAcceptance);
    assert_eq!(horizon.success_probability, 87);
}

#[test]
fn compatibility_factors_are_quoted_verbatim() {
    let advisor = advisor();
    let situation = vehicle_sale_situation();
    let requirement = coverage_requirement();
    let analysis = advisor.analyze_situation(&situation, &requirement);
    let proposals = advisor.generate_derogation_proposals_at(
        &situation,
        &requirement,
        analysis.gap.as_ref(),
        &analysis,
        issued_at(),
    );

    for proposal in &proposals {
        let profile = advisor
            .catalog()
            .profile(&proposal.counterparty_id)
            .expect("proposal references catalog profile");
        let expected = score_compatibility(
            profile,
            &situation,
            &requirement,
            analysis.gap.as_ref(),
            advisor.config(),
        );
        assert_eq!(proposal.justification.compatibility_factors, expected.factors);
        assert_eq!(proposal.compatibility_score, expected.score);
        assert!(proposal.compatibility_score > 40);
    }
}

#[test]
fn no_precedent_situation_still_yields_proposals() {
    let advisor = advisor();
    let situation = bare_situation(3.0);
    let requirement = coverage_requirement();
    let analysis = advisor.analyze_situation(&situation, &requirement);
    assert!(analysis.recommended_strategy.is_none());

    let proposals = advisor.generate_derogation_proposals_at(
        &situation,
        &requirement,
        analysis.gap.as_ref(),
        &analysis,
        issued_at(),
    );

    assert!(!proposals.is_empty());
    assert!(proposals
        .iter()
        .all(|proposal| proposal.proposal_type == ProposalType::CoverageModification));
    assert!(proposals
        .iter()
        .all(|proposal| proposal.alternatives.is_empty()));
    assert_sorted(
        &proposals
            .iter()
            .map(|proposal| proposal.success_probability)
            .collect::<Vec<_>>(),
    );
}

#[test]
fn generation_is_deterministic_for_a_fixed_timestamp() {
    let advisor = advisor();
    let situation = vehicle_sale_situation()
        .with_circumstance(Circumstance::new(CircumstanceKind::JobLoss, "Contract ended"));
    let requirement = coverage_requirement();
    let analysis = advisor.analyze_situation(&situation, &requirement);

    let first = advisor.generate_derogation_proposals_at(
        &situation,
        &requirement,
        analysis.gap.as_ref(),
        &analysis,
        issued_at(),
    );
    let second = advisor.generate_derogation_proposals_at(
        &situation,
        &requirement,
        analysis.gap.as_ref(),
        &analysis,
        issued_at(),
    );

    assert_eq!(first, second);
}

#[test]
fn ordering_holds_across_situations() {
    let advisor = advisor();
    let requirement = coverage_requirement();
    let situations = [
        bare_situation(30.0),
        bare_situation(0.0)
            .with_circumstance(Circumstance::new(CircumstanceKind::Divorce, "Separation")),
        bare_situation(24.0).with_circumstance(
            Circumstance::new(CircumstanceKind::MedicalLeave, "Surgery")
                .verified_with(&["medical_certificate.pdf"]),
        ),
        vehicle_sale_situation(),
    ];

    for situation in &situations {
        let report = advisor.advise(situation, &requirement);
        assert_sorted(
            &report
                .proposals
                .iter()
                .map(|proposal| proposal.success_probability)
                .collect::<Vec<_>>(),
        );
        assert!(report
            .proposals
            .iter()
            .all(|proposal| proposal.success_probability <= 95));
    }
}

#[test]
fn premium_increase_carries_mandatory_surcharge() {
    let advisor = advisor();
    let situation = bare_situation(30.0).with_circumstance(Circumstance::new(
        CircumstanceKind::Divorce,
        "Car kept by former spouse",
    ));
    let requirement = coverage_requirement();
    let analysis = advisor.analyze_situation(&situation, &requirement);
    assert_eq!(analysis.legitimacy_score, 55);

    let proposals = advisor.generate_derogation_proposals_at(
        &situation,
        &requirement,
        analysis.gap.as_ref(),
        &analysis,
        issued_at(),
    );

    let proposal = proposals.first().expect("at least one proposal");
    assert_eq!(proposal.proposal_type, ProposalType::PremiumIncrease);
    assert!(proposal.premium_adjustment_pct >= 5.0);
    assert!(proposal.conditions.iter().any(|condition| condition.mandatory
        && condition.value == Some(proposal.premium_adjustment_pct)));
    assert_eq!(proposal.alternatives, vec!["fall back to coverage modification"]);
}

#[test]
fn status_moves_forward_only() {
    let advisor = advisor();
    let report = advisor.advise(&vehicle_sale_situation(), &coverage_requirement());
    let mut proposal = report.proposals[0].clone();

    assert!(matches!(
        proposal.decide(ProposalDecision::Approved),
        Err(ProposalStatusError::InvalidTransition { .. })
    ));
    proposal.submit().expect("draft can be submitted");
    assert!(proposal.submit().is_err());
    proposal
        .decide(ProposalDecision::Approved)
        .expect("submitted proposal can be decided");
    assert_eq!(
        proposal.status,
        ProposalStatus::Decided(ProposalDecision::Approved)
    );
}
