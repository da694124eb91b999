use chrono::{DateTime, Utc};
use tracing::debug;

use super::catalog::{Catalog, CounterpartyProfile};
use super::compatibility::{score_compatibility, CompatibilityScore};
use super::config::DerogationConfig;
use super::domain::{
    ConditionKind, ExampleOutcome, Justification, Proposal, ProposalCondition, ProposalStatus,
    ProposalType, Requirement, RequirementGap, SimilarCase, Situation, SituationAnalysis,
};
use super::similarity::find_similar;

pub(crate) fn classify(legitimacy: u8, compatibility: u8, config: &DerogationConfig) -> ProposalType {
    if legitimacy > config.full_waiver_min_legitimacy
        && compatibility > config.full_waiver_min_compatibility
    {
        ProposalType::FullWaiver
    } else if legitimacy > config.conditional_min_legitimacy {
        ProposalType::ConditionalAcceptance
    } else if legitimacy > config.premium_increase_min_legitimacy {
        ProposalType::PremiumIncrease
    } else {
        ProposalType::CoverageModification
    }
}

pub(crate) fn success_probability(compatibility: u8, legitimacy: u8, config: &DerogationConfig) -> u8 {
    let raw = compatibility as f64 + legitimacy as f64 * config.legitimacy_probability_factor;
    raw.min(config.max_success_probability).round() as u8
}

fn premium_adjustment(proposal_type: ProposalType, risk_pct: f64) -> f64 {
    match proposal_type {
        ProposalType::FullWaiver => 0.0,
        ProposalType::ConditionalAcceptance => risk_pct / 2.0,
        ProposalType::PremiumIncrease => risk_pct.max(5.0),
        ProposalType::CoverageModification => risk_pct,
    }
}

fn type_conditions(proposal_type: ProposalType, premium_pct: f64) -> Vec<ProposalCondition> {
    let surcharge = |mandatory| ProposalCondition {
        kind: ConditionKind::PremiumSurcharge,
        description: format!("{premium_pct:.1}% premium surcharge"),
        value: Some(premium_pct),
        duration_months: Some(12),
        mandatory,
    };

    match proposal_type {
        ProposalType::FullWaiver => Vec::new(),
        ProposalType::ConditionalAcceptance => {
            let mut conditions = vec![ProposalCondition {
                kind: ConditionKind::MonitoringPeriod,
                description: "Probation period with claims review at renewal".to_string(),
                value: None,
                duration_months: Some(12),
                mandatory: true,
            }];
            if premium_pct > 0.0 {
                conditions.push(surcharge(false));
            }
            conditions
        }
        ProposalType::PremiumIncrease => vec![surcharge(true)],
        ProposalType::CoverageModification => vec![
            ProposalCondition {
                kind: ConditionKind::CoverageRestriction,
                description: "Third-party liability cover only during the first year".to_string(),
                value: None,
                duration_months: Some(12),
                mandatory: true,
            },
            ProposalCondition {
                kind: ConditionKind::Deductible,
                description: "Raised deductible on own-damage claims".to_string(),
                value: Some(500.0),
                duration_months: None,
                mandatory: true,
            },
        ],
    }
}

fn condition_kind_for(text: &str) -> ConditionKind {
    let lower = text.to_lowercase();
    if lower.contains("surcharge") || lower.contains("premium") {
        ConditionKind::PremiumSurcharge
    } else if lower.contains("deductible") {
        ConditionKind::Deductible
    } else if lower.contains("monitoring") {
        ConditionKind::MonitoringPeriod
    } else if lower.contains("driver") {
        ConditionKind::DriverRestriction
    } else {
        ConditionKind::Documentation
    }
}

fn outcome_label(outcome: ExampleOutcome) -> &'static str {
    match outcome {
        ExampleOutcome::Approved => "approved",
        ExampleOutcome::ConditionallyApproved => "approved with conditions",
        ExampleOutcome::Rejected => "rejected",
    }
}

/// Same-counterparty precedents first, then the rest, each group by similarity.
fn precedents_for(
    profile: &CounterpartyProfile,
    similar: &[SimilarCase],
    limit: usize,
) -> Vec<String> {
    let (own, others): (Vec<&SimilarCase>, Vec<&SimilarCase>) = similar
        .iter()
        .partition(|case| case.counterparty == profile.name);

    own.into_iter()
        .chain(others)
        .take(limit)
        .map(|case| {
            format!(
                "{} ({} by {}, {}% similar)",
                case.situation,
                outcome_label(case.outcome),
                case.counterparty,
                case.similarity
            )
        })
        .collect()
}

fn build_proposal(
    profile: &CounterpartyProfile,
    compatibility: CompatibilityScore,
    requirement: &Requirement,
    analysis: &SituationAnalysis,
    similar: &[SimilarCase],
    config: &DerogationConfig,
    issued_at: DateTime<Utc>,
) -> Proposal {
    let legitimacy = analysis.legitimacy_score;
    let proposal_type = classify(legitimacy, compatibility.score, config);
    let risk = &analysis.risk_assessment;
    let premium_adjustment_pct = premium_adjustment(proposal_type, risk.premium_adjustment_pct);

    let mut conditions = type_conditions(proposal_type, premium_adjustment_pct);
    if let Some(flexibility) = profile.flexibility.get(&requirement.category) {
        conditions.extend(flexibility.conditions.iter().map(|text| ProposalCondition {
            kind: condition_kind_for(text),
            description: text.to_string(),
            value: None,
            duration_months: None,
            mandatory: false,
        }));
    }
    for condition in &risk.mandatory_conditions {
        if !conditions
            .iter()
            .any(|existing| existing.kind == condition.kind && existing.mandatory)
        {
            conditions.push(condition.clone());
        }
    }

    let key_arguments = analysis
        .recommended_strategy
        .as_ref()
        .map(|strategy| strategy.key_arguments.clone())
        .unwrap_or_default();

    let mut risk_mitigation: Vec<String> = conditions
        .iter()
        .filter(|condition| condition.mandatory)
        .map(|condition| condition.description.clone())
        .collect();
    risk_mitigation.push(format!(
        "assessed risk {:?} (score {})",
        risk.level, risk.score
    ));

    let business_case = format!(
        "{} approved {:.0}% of {} exception requests; retaining the client at a {:+.1}% premium adjustment meets its {:.0} EUR business value threshold with {:?} risk tolerance",
        profile.name,
        profile.history.approval_rate * 100.0,
        profile.history.total_requests,
        premium_adjustment_pct,
        profile.decision_criteria.business_value_threshold,
        profile.decision_criteria.risk_tolerance
    );

    let expected_timeline = match &analysis.recommended_strategy {
        Some(strategy) => format!(
            "{} (insurer average {} days)",
            strategy.timeline, profile.history.average_response_days
        ),
        None => format!("about {} days", profile.history.average_response_days),
    };

    let alternatives = ProposalType::ALL
        .iter()
        .skip_while(|candidate| **candidate != proposal_type)
        .skip(1)
        .map(|candidate| format!("fall back to {}", candidate.label()))
        .collect();

    Proposal {
        id: format!("prop-{}-{}", issued_at.timestamp_millis(), profile.id),
        counterparty_id: profile.id.to_string(),
        counterparty_name: profile.name.to_string(),
        proposal_type,
        description: format!(
            "Request a {} of the '{}' requirement from {}",
            proposal_type.label(),
            requirement.name,
            profile.name
        ),
        compatibility_score: compatibility.score,
        premium_adjustment_pct,
        conditions,
        justification: Justification {
            key_arguments,
            compatibility_factors: compatibility.factors,
            human_factors: analysis
                .human_factors
                .iter()
                .map(|factor| factor.description.clone())
                .collect(),
            business_case,
            risk_mitigation,
            precedents: precedents_for(profile, similar, config.max_precedents),
        },
        success_probability: success_probability(compatibility.score, legitimacy, config),
        expected_timeline,
        alternatives,
        status: ProposalStatus::Draft,
    }
}

/// Rank proposals across every counterparty that clears the compatibility cutoff.
///
/// Pure apart from `issued_at`, which only feeds proposal identifiers. Ordering is by
/// descending success probability; equal probabilities keep catalog order.
pub(crate) fn generate_proposals(
    catalog: &Catalog,
    situation: &Situation,
    requirement: &Requirement,
    gap: Option<&RequirementGap>,
    analysis: &SituationAnalysis,
    config: &DerogationConfig,
    issued_at: DateTime<Utc>,
) -> Vec<Proposal> {
    let similar = find_similar(catalog, situation, requirement, config);

    let mut proposals: Vec<Proposal> = catalog
        .profiles()
        .iter()
        .filter_map(|profile| {
            let compatibility = score_compatibility(profile, situation, requirement, gap, config);
            if compatibility.score <= config.compatibility_cutoff {
                debug!(
                    counterparty = profile.id,
                    score = compatibility.score,
                    "counterparty below compatibility cutoff"
                );
                return None;
            }
            Some(build_proposal(
                profile,
                compatibility,
                requirement,
                analysis,
                &similar,
                config,
                issued_at,
            ))
        })
        .collect();

    proposals.sort_by(|a, b| b.success_probability.cmp(&a.success_probability));
    proposals
}
