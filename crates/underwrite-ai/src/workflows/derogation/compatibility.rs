use serde::Serialize;

use super::catalog::{CounterpartyProfile, FlexibilityLevel};
use super::config::DerogationConfig;
use super::domain::{Requirement, RequirementGap, Situation};

/// Fit between one counterparty and a specific gap. `factors` is quoted verbatim in
/// proposal justifications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityScore {
    pub counterparty_id: &'static str,
    pub score: u8,
    pub factors: Vec<String>,
}

fn flexibility_bonus(level: FlexibilityLevel, config: &DerogationConfig) -> i16 {
    match level {
        FlexibilityLevel::VeryHigh => config.flexibility_very_high_bonus,
        FlexibilityLevel::High => config.flexibility_high_bonus,
        FlexibilityLevel::Medium => config.flexibility_medium_bonus,
        FlexibilityLevel::Low => config.flexibility_low_bonus,
        FlexibilityLevel::None => config.flexibility_none_bonus,
    }
}

fn level_label(level: FlexibilityLevel) -> &'static str {
    match level {
        FlexibilityLevel::VeryHigh => "very high",
        FlexibilityLevel::High => "high",
        FlexibilityLevel::Medium => "medium",
        FlexibilityLevel::Low => "low",
        FlexibilityLevel::None => "no",
    }
}

pub fn score_compatibility(
    profile: &CounterpartyProfile,
    situation: &Situation,
    requirement: &Requirement,
    gap: Option<&RequirementGap>,
    config: &DerogationConfig,
) -> CompatibilityScore {
    let mut score = config.compatibility_base;
    let mut factors = Vec::new();

    match profile.flexibility.get(&requirement.category) {
        Some(flexibility) => {
            let bonus = flexibility_bonus(flexibility.level, config);
            score += bonus;
            factors.push(format!(
                "{} shows {} flexibility on {} ({:+})",
                profile.name,
                level_label(flexibility.level),
                requirement.category.label(),
                bonus
            ));

            if let Some(gap) = gap.filter(|gap| gap.shortfall > 0.0) {
                let within = gap.shortfall <= flexibility.max_deviation;
                factors.push(format!(
                    "shortfall of {:.1} {} {} the tolerated deviation of {:.1}",
                    gap.shortfall,
                    requirement.unit,
                    if within { "is within" } else { "exceeds" },
                    flexibility.max_deviation
                ));
            }
        }
        None => factors.push(format!(
            "{} publishes no flexibility for {}",
            profile.name,
            requirement.category.label()
        )),
    }

    if profile.decision_criteria.human_factor_weight > config.human_factor_weight_threshold {
        score += config.human_factor_bonus;
        factors.push(format!(
            "weighs human factors strongly ({:.0}%) ({:+})",
            profile.decision_criteria.human_factor_weight * 100.0,
            config.human_factor_bonus
        ));

        let verified = situation
            .circumstances()
            .iter()
            .filter(|c| c.verified)
            .count();
        if verified > 0 {
            factors.push(format!(
                "{verified} verified circumstance(s) support the human-factor case"
            ));
        }
    }

    if profile.history.approval_rate > config.approval_rate_threshold {
        score += config.approval_rate_bonus;
        factors.push(format!(
            "approves {:.0}% of exception requests ({:+})",
            profile.history.approval_rate * 100.0,
            config.approval_rate_bonus
        ));
    }

    CompatibilityScore {
        counterparty_id: profile.id,
        score: score.clamp(0, 100) as u8,
        factors,
    }
}
