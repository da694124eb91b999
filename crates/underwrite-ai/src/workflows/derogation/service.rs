use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::analyzer::analyze;
use super::catalog::Catalog;
use super::config::DerogationConfig;
use super::domain::{
    Proposal, Requirement, RequirementGap, SimilarCase, Situation, SituationAnalysis,
};
use super::proposals::generate_proposals;
use super::similarity::find_similar;

/// Facade over the catalog-driven analyzers. Holds no mutable state, so one instance can
/// serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct DerogationAdvisor {
    catalog: &'static Catalog,
    config: DerogationConfig,
}

/// Everything the advisory pipeline produces for one situation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerogationReport {
    pub analysis: SituationAnalysis,
    pub proposals: Vec<Proposal>,
    pub similar_cases: Vec<SimilarCase>,
}

impl Default for DerogationAdvisor {
    fn default() -> Self {
        Self::new(Catalog::standard(), DerogationConfig::default())
    }
}

impl DerogationAdvisor {
    pub fn new(catalog: &'static Catalog, config: DerogationConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn config(&self) -> &DerogationConfig {
        &self.config
    }

    pub fn analyze_situation(
        &self,
        situation: &Situation,
        requirement: &Requirement,
    ) -> SituationAnalysis {
        analyze(self.catalog, situation, requirement, &self.config)
    }

    pub fn generate_derogation_proposals(
        &self,
        situation: &Situation,
        requirement: &Requirement,
        gap: Option<&RequirementGap>,
        analysis: &SituationAnalysis,
    ) -> Vec<Proposal> {
        self.generate_derogation_proposals_at(situation, requirement, gap, analysis, Utc::now())
    }

    /// Deterministic variant; `issued_at` only feeds proposal identifiers.
    pub fn generate_derogation_proposals_at(
        &self,
        situation: &Situation,
        requirement: &Requirement,
        gap: Option<&RequirementGap>,
        analysis: &SituationAnalysis,
        issued_at: DateTime<Utc>,
    ) -> Vec<Proposal> {
        generate_proposals(
            self.catalog,
            situation,
            requirement,
            gap,
            analysis,
            &self.config,
            issued_at,
        )
    }

    pub fn find_similar_cases(
        &self,
        situation: &Situation,
        requirement: &Requirement,
    ) -> Vec<SimilarCase> {
        find_similar(self.catalog, situation, requirement, &self.config)
    }

    /// Full pipeline: analysis, ranked proposals, and precedents.
    pub fn advise(&self, situation: &Situation, requirement: &Requirement) -> DerogationReport {
        let analysis = self.analyze_situation(situation, requirement);
        let proposals = self.generate_derogation_proposals(
            situation,
            requirement,
            analysis.gap.as_ref(),
            &analysis,
        );
        let similar_cases = self.find_similar_cases(situation, requirement);

        info!(
            requirement = %requirement.id,
            legitimacy = analysis.legitimacy_score,
            scenario = analysis
                .recommended_strategy
                .as_ref()
                .map(|strategy| strategy.scenario_id.as_str())
                .unwrap_or("none"),
            proposals = proposals.len(),
            "derogation advice generated"
        );

        DerogationReport {
            analysis,
            proposals,
            similar_cases,
        }
    }
}
