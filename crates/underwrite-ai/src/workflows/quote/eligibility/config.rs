use serde::{Deserialize, Serialize};

/// Heuristic point deltas applied by the eligibility scorer, one group per answer signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub base_score: i16,
    /// Below this the analysis must carry a warning and an improvement.
    pub low_score_threshold: u8,
    /// Above this the analysis must carry a positive recommendation.
    pub high_score_threshold: u8,
    /// Factors at or below this delta are also reported as warnings.
    pub severe_factor_delta: i16,

    pub young_driver_age: f64,
    pub mature_driver_max_age: f64,
    pub senior_driver_age: f64,
    pub young_driver_delta: i16,
    pub mature_driver_delta: i16,
    pub senior_driver_delta: i16,

    pub no_claims_delta: i16,
    pub single_claim_delta: i16,
    pub multiple_claims_delta: i16,

    pub comfortable_budget: f64,
    pub tight_budget: f64,
    pub comfortable_budget_delta: i16,
    pub tight_budget_delta: i16,

    pub seasoned_licence_years: f64,
    pub novice_licence_years: f64,
    pub seasoned_licence_delta: i16,
    pub novice_licence_delta: i16,

    pub bonus_coefficient: f64,
    pub malus_coefficient: f64,
    pub bonus_delta: i16,
    pub malus_delta: i16,

    pub cancellation_delta: i16,

    pub long_coverage_months: f64,
    pub short_coverage_months: f64,
    pub long_coverage_delta: i16,
    pub short_coverage_delta: i16,

    pub smoker_delta: i16,
    pub security_system_delta: i16,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            low_score_threshold: 60,
            high_score_threshold: 80,
            severe_factor_delta: -15,
            young_driver_age: 25.0,
            mature_driver_max_age: 70.0,
            senior_driver_age: 75.0,
            young_driver_delta: -10,
            mature_driver_delta: 10,
            senior_driver_delta: -5,
            no_claims_delta: 15,
            single_claim_delta: -5,
            multiple_claims_delta: -15,
            comfortable_budget: 100.0,
            tight_budget: 40.0,
            comfortable_budget_delta: 10,
            tight_budget_delta: -10,
            seasoned_licence_years: 5.0,
            novice_licence_years: 2.0,
            seasoned_licence_delta: 10,
            novice_licence_delta: -10,
            bonus_coefficient: 0.8,
            malus_coefficient: 1.0,
            bonus_delta: 10,
            malus_delta: -15,
            cancellation_delta: -20,
            long_coverage_months: 36.0,
            short_coverage_months: 12.0,
            long_coverage_delta: 10,
            short_coverage_delta: -10,
            smoker_delta: -10,
            security_system_delta: 5,
        }
    }
}
