//! Underwriting exception ("derogation") advisory.
//!
//! A [`Situation`] is analysed into human factors and a legitimacy score, matched against the
//! scenario catalog, scored against every insurer profile, and turned into ranked proposals
//! with precedent-backed justifications. All scoring is synchronous and side-effect free.

pub(crate) mod analyzer;
pub mod catalog;
pub(crate) mod compatibility;
pub mod config;
pub mod domain;
pub mod matcher;
pub(crate) mod proposals;
pub mod router;
pub mod service;
pub(crate) mod similarity;
pub mod triggers;

#[cfg(test)]
mod tests;

pub use catalog::{get_counterparty_profiles, get_scenarios, Catalog, CounterpartyProfile, Scenario};
pub use compatibility::{score_compatibility, CompatibilityScore};
pub use config::DerogationConfig;
pub use domain::{
    Circumstance, CircumstanceKind, HumanFactor, IncomeStability, PersonalContext, Proposal,
    ProposalDecision, ProposalStatus, ProposalStatusError, ProposalType, Requirement,
    RequirementCategory, RequirementDirection, RequirementGap, RiskLevel, SimilarCase, Situation,
    SituationAnalysis,
};
pub use matcher::{match_scenario, ScenarioMatch};
pub use router::derogation_router;
pub use service::{DerogationAdvisor, DerogationReport};
pub use triggers::evaluate_trigger;
