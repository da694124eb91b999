use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Typed life or external event a client can put forward to explain a requirement gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircumstanceKind {
    VehicleSale,
    NonResponsibleAccident,
    JobLoss,
    Relocation,
    MedicalLeave,
    Divorce,
    Bereavement,
    MilitaryService,
    InsurerCancellation,
}

impl CircumstanceKind {
    pub const ALL: [CircumstanceKind; 9] = [
        CircumstanceKind::VehicleSale,
        CircumstanceKind::NonResponsibleAccident,
        CircumstanceKind::JobLoss,
        CircumstanceKind::Relocation,
        CircumstanceKind::MedicalLeave,
        CircumstanceKind::Divorce,
        CircumstanceKind::Bereavement,
        CircumstanceKind::MilitaryService,
        CircumstanceKind::InsurerCancellation,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CircumstanceKind::VehicleSale => "vehicle_sale",
            CircumstanceKind::NonResponsibleAccident => "non_responsible_accident",
            CircumstanceKind::JobLoss => "job_loss",
            CircumstanceKind::Relocation => "relocation",
            CircumstanceKind::MedicalLeave => "medical_leave",
            CircumstanceKind::Divorce => "divorce",
            CircumstanceKind::Bereavement => "bereavement",
            CircumstanceKind::MilitaryService => "military_service",
            CircumstanceKind::InsurerCancellation => "insurer_cancellation",
        }
    }

    /// Lowercase keyword searched for in free-text precedent descriptions.
    pub const fn keyword(self) -> &'static str {
        match self {
            CircumstanceKind::VehicleSale => "sold",
            CircumstanceKind::NonResponsibleAccident => "accident",
            CircumstanceKind::JobLoss => "job",
            CircumstanceKind::Relocation => "relocat",
            CircumstanceKind::MedicalLeave => "medical",
            CircumstanceKind::Divorce => "divorce",
            CircumstanceKind::Bereavement => "death",
            CircumstanceKind::MilitaryService => "military",
            CircumstanceKind::InsurerCancellation => "cancel",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

/// One fact about the client, optionally verified against supporting documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circumstance {
    pub kind: CircumstanceKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub occurred_on: Option<NaiveDate>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub documentation: Vec<String>,
}

impl Circumstance {
    pub fn new(kind: CircumstanceKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            occurred_on: None,
            verified: false,
            documentation: Vec::new(),
        }
    }

    pub fn verified_with(mut self, documents: &[&str]) -> Self {
        self.verified = true;
        self.documentation = documents.iter().map(|doc| doc.to_string()).collect();
        self
    }
}

/// Free-form argument in the client's favour, weighted by relevance in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigatingFactor {
    pub description: String,
    pub relevance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStability {
    Stable,
    Variable,
    Unstable,
}

/// Optional personal indicators. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalContext {
    #[serde(default)]
    pub income_stability: Option<IncomeStability>,
    #[serde(default)]
    pub responsible_claims: Option<u8>,
    #[serde(default)]
    pub payment_incidents: Option<u8>,
    #[serde(default)]
    pub years_licensed: Option<u8>,
    #[serde(default)]
    pub currently_employed: Option<bool>,
}

/// The subject under evaluation. Scoring only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    #[serde(default)]
    circumstances: Vec<Circumstance>,
    #[serde(default)]
    mitigating_factors: Vec<MitigatingFactor>,
    #[serde(default)]
    pub actual_value: Option<f64>,
    #[serde(default)]
    pub context: PersonalContext,
}

impl Situation {
    pub fn new(actual_value: Option<f64>) -> Self {
        Self {
            actual_value,
            ..Self::default()
        }
    }

    pub fn circumstances(&self) -> &[Circumstance] {
        &self.circumstances
    }

    pub fn mitigating_factors(&self) -> &[MitigatingFactor] {
        &self.mitigating_factors
    }

    pub fn push_circumstance(&mut self, circumstance: Circumstance) {
        self.circumstances.push(circumstance);
    }

    pub fn push_mitigating_factor(&mut self, description: impl Into<String>, relevance: f32) {
        self.mitigating_factors.push(MitigatingFactor {
            description: description.into(),
            relevance: relevance.clamp(0.0, 1.0),
        });
    }

    pub fn with_circumstance(mut self, circumstance: Circumstance) -> Self {
        self.push_circumstance(circumstance);
        self
    }

    pub fn with_context(mut self, context: PersonalContext) -> Self {
        self.context = context;
        self
    }

    pub fn has(&self, kind: CircumstanceKind) -> bool {
        self.circumstances.iter().any(|c| c.kind == kind)
    }

    pub fn has_verified(&self, kind: CircumstanceKind) -> bool {
        self.circumstances
            .iter()
            .any(|c| c.kind == kind && c.verified)
    }
}

/// Underwriting rule family; counterparty flexibility is published per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementCategory {
    ContinuousCoverage,
    ClaimsHistory,
    DrivingExperience,
    BonusMalus,
    PaymentHistory,
}

impl RequirementCategory {
    pub const fn label(self) -> &'static str {
        match self {
            RequirementCategory::ContinuousCoverage => "continuous coverage",
            RequirementCategory::ClaimsHistory => "claims history",
            RequirementCategory::DrivingExperience => "driving experience",
            RequirementCategory::BonusMalus => "bonus-malus",
            RequirementCategory::PaymentHistory => "payment history",
        }
    }
}

/// Whether the measured value must reach or stay under the required value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementDirection {
    AtLeast,
    AtMost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub name: String,
    pub category: RequirementCategory,
    pub required_value: f64,
    pub direction: RequirementDirection,
    pub unit: String,
}

impl Requirement {
    pub fn continuous_coverage_months(months: f64) -> Self {
        Self {
            id: format!("continuous_coverage_{months}m"),
            name: format!("{months} months continuous coverage"),
            category: RequirementCategory::ContinuousCoverage,
            required_value: months,
            direction: RequirementDirection::AtLeast,
            unit: "months".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    None,
    Minor,
    Moderate,
    Major,
    Critical,
}

/// Shortfall between what a requirement asks for and what the situation shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementGap {
    pub requirement_id: String,
    pub required_value: f64,
    pub actual_value: f64,
    pub shortfall: f64,
    pub relative_shortfall: f64,
    pub severity: GapSeverity,
}

impl RequirementGap {
    /// `None` when the situation carries no measured value.
    pub fn measure(requirement: &Requirement, situation: &Situation) -> Option<Self> {
        let actual = situation.actual_value?;
        let shortfall = match requirement.direction {
            RequirementDirection::AtLeast => (requirement.required_value - actual).max(0.0),
            RequirementDirection::AtMost => (actual - requirement.required_value).max(0.0),
        };
        let relative_shortfall = if requirement.required_value.abs() > f64::EPSILON {
            shortfall / requirement.required_value.abs()
        } else if shortfall > 0.0 {
            1.0
        } else {
            0.0
        };

        let severity = if shortfall <= 0.0 {
            GapSeverity::None
        } else if relative_shortfall < 0.10 {
            GapSeverity::Minor
        } else if relative_shortfall < 0.25 {
            GapSeverity::Moderate
        } else if relative_shortfall < 0.50 {
            GapSeverity::Major
        } else {
            GapSeverity::Critical
        };

        Some(Self {
            requirement_id: requirement.id.clone(),
            required_value: requirement.required_value,
            actual_value: actual,
            shortfall,
            relative_shortfall,
            severity,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanFactorCategory {
    LifeEvent,
    ExternalCircumstances,
    FinancialHardship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactTier {
    Low,
    Medium,
    High,
}

/// Scored reading of one circumstance, derived on every analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanFactor {
    pub circumstance: CircumstanceKind,
    pub category: HumanFactorCategory,
    pub impact: ImpactTier,
    pub legitimacy: u8,
    pub description: String,
    pub required_documentation: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u8,
    pub factors: Vec<String>,
    pub premium_adjustment_pct: f64,
    pub mandatory_conditions: Vec<ProposalCondition>,
}

/// Best strategy of the scenario the situation matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedStrategy {
    pub scenario_id: String,
    pub scenario_name: String,
    pub approach: String,
    pub reasoning: String,
    pub success_probability: u8,
    pub timeline: String,
    pub required_documents: Vec<String>,
    pub key_arguments: Vec<String>,
}

/// Output of the situation analyzer, fed to the proposal generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SituationAnalysis {
    pub human_factors: Vec<HumanFactor>,
    pub legitimacy_score: u8,
    pub risk_assessment: RiskAssessment,
    pub recommended_strategy: Option<RecommendedStrategy>,
    pub gap: Option<RequirementGap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalType {
    FullWaiver,
    ConditionalAcceptance,
    PremiumIncrease,
    CoverageModification,
}

impl ProposalType {
    pub const ALL: [ProposalType; 4] = [
        ProposalType::FullWaiver,
        ProposalType::ConditionalAcceptance,
        ProposalType::PremiumIncrease,
        ProposalType::CoverageModification,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ProposalType::FullWaiver => "full waiver",
            ProposalType::ConditionalAcceptance => "conditional acceptance",
            ProposalType::PremiumIncrease => "premium increase",
            ProposalType::CoverageModification => "coverage modification",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    PremiumSurcharge,
    Deductible,
    CoverageRestriction,
    MonitoringPeriod,
    Documentation,
    DriverRestriction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalCondition {
    pub kind: ConditionKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u16>,
    pub mandatory: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Justification {
    pub key_arguments: Vec<String>,
    pub compatibility_factors: Vec<String>,
    pub human_factors: Vec<String>,
    pub business_case: String,
    pub risk_mitigation: Vec<String>,
    pub precedents: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalDecision {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "decision")]
pub enum ProposalStatus {
    Draft,
    Submitted,
    Decided(ProposalDecision),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProposalStatusError {
    #[error("proposal {id} cannot move from {from:?} to {to}")]
    InvalidTransition {
        id: String,
        from: ProposalStatus,
        to: &'static str,
    },
}

/// Ranked recommendation for resolving a gap with one counterparty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub counterparty_id: String,
    pub counterparty_name: String,
    pub proposal_type: ProposalType,
    pub description: String,
    pub compatibility_score: u8,
    pub premium_adjustment_pct: f64,
    pub conditions: Vec<ProposalCondition>,
    pub justification: Justification,
    pub success_probability: u8,
    pub expected_timeline: String,
    pub alternatives: Vec<String>,
    pub status: ProposalStatus,
}

impl Proposal {
    pub fn submit(&mut self) -> Result<(), ProposalStatusError> {
        match self.status {
            ProposalStatus::Draft => {
                self.status = ProposalStatus::Submitted;
                Ok(())
            }
            from => Err(ProposalStatusError::InvalidTransition {
                id: self.id.clone(),
                from,
                to: "submitted",
            }),
        }
    }

    pub fn decide(&mut self, decision: ProposalDecision) -> Result<(), ProposalStatusError> {
        match self.status {
            ProposalStatus::Submitted => {
                self.status = ProposalStatus::Decided(decision);
                Ok(())
            }
            from => Err(ProposalStatusError::InvalidTransition {
                id: self.id.clone(),
                from,
                to: "decided",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleOutcome {
    Approved,
    ConditionallyApproved,
    Rejected,
}

/// Scored historical precedent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarCase {
    pub scenario_id: String,
    pub situation: String,
    pub outcome: ExampleOutcome,
    pub counterparty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
    pub similarity: u8,
    pub lessons: Vec<String>,
}
