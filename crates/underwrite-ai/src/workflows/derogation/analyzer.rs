use super::catalog::Catalog;
use super::config::DerogationConfig;
use super::domain::{
    Circumstance, CircumstanceKind, ConditionKind, HumanFactor, HumanFactorCategory, ImpactTier,
    IncomeStability, ProposalCondition, RecommendedStrategy, Requirement, RequirementGap,
    RiskAssessment, RiskLevel, Situation, SituationAnalysis,
};
use super::matcher::match_scenario;

struct KindProfile {
    category: HumanFactorCategory,
    impact: ImpactTier,
    base_legitimacy: u8,
    documents: &'static [&'static str],
}

fn kind_profile(kind: CircumstanceKind) -> KindProfile {
    use HumanFactorCategory::{ExternalCircumstances, FinancialHardship, LifeEvent};

    match kind {
        CircumstanceKind::VehicleSale => KindProfile {
            category: LifeEvent,
            impact: ImpactTier::Medium,
            base_legitimacy: 70,
            documents: &["Certificate of sale", "Previous insurer termination letter"],
        },
        CircumstanceKind::NonResponsibleAccident => KindProfile {
            category: ExternalCircumstances,
            impact: ImpactTier::High,
            base_legitimacy: 75,
            documents: &["Joint accident report", "Liability determination"],
        },
        CircumstanceKind::JobLoss => KindProfile {
            category: FinancialHardship,
            impact: ImpactTier::High,
            base_legitimacy: 65,
            documents: &["Termination letter", "Current employment contract"],
        },
        CircumstanceKind::Relocation => KindProfile {
            category: LifeEvent,
            impact: ImpactTier::Medium,
            base_legitimacy: 60,
            documents: &["Foreign insurance certificate", "Proof of address"],
        },
        CircumstanceKind::MedicalLeave => KindProfile {
            category: ExternalCircumstances,
            impact: ImpactTier::High,
            base_legitimacy: 70,
            documents: &["Medical certificate", "Fitness-to-drive certificate"],
        },
        CircumstanceKind::Divorce => KindProfile {
            category: LifeEvent,
            impact: ImpactTier::Medium,
            base_legitimacy: 55,
            documents: &["Divorce decree"],
        },
        CircumstanceKind::Bereavement => KindProfile {
            category: LifeEvent,
            impact: ImpactTier::High,
            base_legitimacy: 75,
            documents: &["Death certificate"],
        },
        CircumstanceKind::MilitaryService => KindProfile {
            category: ExternalCircumstances,
            impact: ImpactTier::Medium,
            base_legitimacy: 80,
            documents: &["Service record"],
        },
        CircumstanceKind::InsurerCancellation => KindProfile {
            category: FinancialHardship,
            impact: ImpactTier::Low,
            base_legitimacy: 45,
            documents: &["Cancellation letter", "Proof of settled arrears"],
        },
    }
}

pub(crate) fn human_factor(circumstance: &Circumstance, config: &DerogationConfig) -> HumanFactor {
    let profile = kind_profile(circumstance.kind);
    let mut legitimacy = profile.base_legitimacy;
    if circumstance.verified {
        legitimacy = legitimacy.saturating_add(config.verified_bonus);
    }
    if !circumstance.documentation.is_empty() {
        legitimacy = legitimacy.saturating_add(config.documentation_bonus);
    }

    let description = if circumstance.description.trim().is_empty() {
        circumstance.kind.label().replace('_', " ")
    } else {
        circumstance.description.clone()
    };
    let verification = if circumstance.verified {
        "verified"
    } else {
        "unverified"
    };

    HumanFactor {
        circumstance: circumstance.kind,
        category: profile.category,
        impact: profile.impact,
        legitimacy: legitimacy.min(100),
        description: format!("{description} ({verification})"),
        required_documentation: profile.documents.iter().map(|d| d.to_string()).collect(),
    }
}

pub(crate) fn human_factors(situation: &Situation, config: &DerogationConfig) -> Vec<HumanFactor> {
    situation
        .circumstances()
        .iter()
        .map(|circumstance| human_factor(circumstance, config))
        .collect()
}

/// Strongest factor plus a small bonus per extra factor and for mitigation. Appending a
/// circumstance can raise the maximum or the count but never lower either.
pub(crate) fn legitimacy_score(
    factors: &[HumanFactor],
    situation: &Situation,
    config: &DerogationConfig,
) -> u8 {
    let relevance: f32 = situation
        .mitigating_factors()
        .iter()
        .map(|factor| factor.relevance.clamp(0.0, 1.0))
        .sum();
    let mitigation = (relevance * config.mitigation_scale)
        .round()
        .min(config.mitigation_cap as f32) as u32;

    let base = match factors.iter().map(|factor| factor.legitimacy).max() {
        Some(strongest) => {
            let extra = factors.len().saturating_sub(1) as u32;
            strongest as u32 + extra * config.additional_factor_bonus as u32
        }
        None => config.legitimacy_without_factors as u32,
    };

    (base + mitigation).min(100) as u8
}

pub(crate) fn assess_risk(situation: &Situation, gap: Option<&RequirementGap>) -> RiskAssessment {
    let mut score: i32 = 30;
    let mut factors = Vec::new();

    if let Some(gap) = gap {
        let gap_points = (gap.relative_shortfall * 40.0).round().min(40.0) as i32;
        if gap_points > 0 {
            factors.push(format!(
                "shortfall of {:.1} against {:.1} required (+{gap_points})",
                gap.shortfall, gap.required_value
            ));
            score += gap_points;
        }
    }

    let context = &situation.context;
    if let Some(claims) = context.responsible_claims.filter(|n| *n > 0) {
        factors.push(format!("{claims} responsible claim(s) (+{})", claims as i32 * 10));
        score += claims as i32 * 10;
    }
    if let Some(incidents) = context.payment_incidents.filter(|n| *n > 0) {
        factors.push(format!(
            "{incidents} payment incident(s) (+{})",
            incidents as i32 * 8
        ));
        score += incidents as i32 * 8;
    }
    if context.income_stability == Some(IncomeStability::Stable) {
        factors.push("stable income (-10)".to_string());
        score -= 10;
    }

    let verified = situation
        .circumstances()
        .iter()
        .filter(|c| c.verified)
        .count() as i32;
    if verified > 0 {
        let relief = (verified * 5).min(15);
        factors.push(format!("{verified} verified circumstance(s) (-{relief})"));
        score -= relief;
    }

    let score = score.clamp(0, 100) as u8;
    let (level, premium_adjustment_pct) = match score {
        0..=29 => (RiskLevel::Low, 0.0),
        30..=49 => (RiskLevel::Moderate, 10.0),
        50..=69 => (RiskLevel::High, 25.0),
        _ => (RiskLevel::VeryHigh, 40.0),
    };

    let mut mandatory_conditions: Vec<ProposalCondition> = situation
        .circumstances()
        .iter()
        .filter(|c| !c.verified)
        .map(|c| ProposalCondition {
            kind: ConditionKind::Documentation,
            description: format!(
                "Provide proof of {} within 30 days",
                c.kind.label().replace('_', " ")
            ),
            value: None,
            duration_months: Some(1),
            mandatory: true,
        })
        .collect();

    if level >= RiskLevel::High {
        mandatory_conditions.push(ProposalCondition {
            kind: ConditionKind::MonitoringPeriod,
            description: "Claims monitoring during the first policy year".to_string(),
            value: None,
            duration_months: Some(12),
            mandatory: true,
        });
    }

    RiskAssessment {
        level,
        score,
        factors,
        premium_adjustment_pct,
        mandatory_conditions,
    }
}

pub(crate) fn analyze(
    catalog: &Catalog,
    situation: &Situation,
    requirement: &Requirement,
    config: &DerogationConfig,
) -> SituationAnalysis {
    let gap = RequirementGap::measure(requirement, situation);
    let human_factors = human_factors(situation, config);
    let legitimacy_score = legitimacy_score(&human_factors, situation, config);
    let risk_assessment = assess_risk(situation, gap.as_ref());

    let recommended_strategy = match_scenario(catalog, situation, config).and_then(|found| {
        found.scenario.best_strategy().map(|strategy| RecommendedStrategy {
            scenario_id: found.scenario.id.to_string(),
            scenario_name: found.scenario.name.to_string(),
            approach: strategy.approach.to_string(),
            reasoning: strategy.reasoning.to_string(),
            success_probability: strategy.success_probability,
            timeline: strategy.timeline.to_string(),
            required_documents: strategy
                .required_documents
                .iter()
                .map(|d| d.to_string())
                .collect(),
            key_arguments: strategy
                .key_arguments
                .iter()
                .map(|a| a.to_string())
                .collect(),
        })
    });

    SituationAnalysis {
        human_factors,
        legitimacy_score,
        risk_assessment,
        recommended_strategy,
        gap,
    }
}
