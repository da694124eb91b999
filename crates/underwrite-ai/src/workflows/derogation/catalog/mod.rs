//! Static reference data: exception scenarios and insurer flexibility profiles.
//!
//! The catalog is built once per process and only ever handed out by shared reference, so
//! every accessor returns the same data for the lifetime of the process.

mod insurers;
mod scenarios;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use super::domain::{ExampleOutcome, RequirementCategory};

pub const CATALOG_VERSION: &str = "2024.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerOperator {
    Equals,
    LessThan,
    GreaterThan,
    Contains,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TriggerValue {
    Bool(bool),
    Number(f64),
    Text(&'static str),
}

/// Weighted condition over a named situation fact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trigger {
    pub condition: &'static str,
    pub operator: TriggerOperator,
    pub threshold: TriggerValue,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strategy {
    pub approach: &'static str,
    pub reasoning: &'static str,
    pub success_probability: u8,
    pub timeline: &'static str,
    pub required_documents: Vec<&'static str>,
    pub key_arguments: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioExample {
    pub situation: &'static str,
    pub approach: &'static str,
    pub outcome: ExampleOutcome,
    pub conditions: Vec<&'static str>,
    pub lessons: Vec<&'static str>,
    pub counterparty: &'static str,
    pub timeline: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub triggers: Vec<Trigger>,
    pub strategies: Vec<Strategy>,
    pub common_arguments: Vec<&'static str>,
    pub success_rate: f32,
    pub examples: Vec<ScenarioExample>,
}

impl Scenario {
    pub fn total_weight(&self) -> f64 {
        self.triggers.iter().map(|trigger| trigger.weight).sum()
    }

    /// Strategy with the highest success estimate; the first one wins ties.
    pub fn best_strategy(&self) -> Option<&Strategy> {
        self.strategies.iter().fold(None, |best, candidate| match best {
            Some(current) if current.success_probability >= candidate.success_probability => {
                Some(current)
            }
            _ => Some(candidate),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexibilityLevel {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flexibility {
    pub level: FlexibilityLevel,
    pub conditions: Vec<&'static str>,
    pub max_deviation: f64,
    pub typical_requirements: Vec<&'static str>,
    pub success_factors: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerogationHistory {
    pub total_requests: u32,
    pub approval_rate: f32,
    pub average_response_days: u16,
    pub common_conditions: Vec<&'static str>,
    pub preferred_approaches: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionCriteria {
    pub business_value_threshold: f64,
    pub risk_tolerance: RiskTolerance,
    pub human_factor_weight: f32,
    pub documentation_requirements: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactInfo {
    pub department: &'static str,
    pub email: &'static str,
    pub escalation_path: Vec<&'static str>,
}

/// How a given insurer treats exception requests, per requirement category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterpartyProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub flexibility: BTreeMap<RequirementCategory, Flexibility>,
    pub history: DerogationHistory,
    pub decision_criteria: DecisionCriteria,
    pub contact: ContactInfo,
}

/// Immutable catalog handed to the matcher, scorers, and generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub version: &'static str,
    scenarios: Vec<Scenario>,
    profiles: Vec<CounterpartyProfile>,
}

impl Catalog {
    pub fn new(scenarios: Vec<Scenario>, profiles: Vec<CounterpartyProfile>) -> Self {
        Self {
            version: CATALOG_VERSION,
            scenarios,
            profiles,
        }
    }

    pub fn standard() -> &'static Catalog {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Catalog::new(
                scenarios::standard_scenarios(),
                insurers::standard_profiles(),
            )
        })
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn profiles(&self) -> &[CounterpartyProfile] {
        &self.profiles
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }

    pub fn profile(&self, id: &str) -> Option<&CounterpartyProfile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }
}

pub fn get_scenarios() -> &'static [Scenario] {
    Catalog::standard().scenarios()
}

pub fn get_counterparty_profiles() -> &'static [CounterpartyProfile] {
    Catalog::standard().profiles()
}
