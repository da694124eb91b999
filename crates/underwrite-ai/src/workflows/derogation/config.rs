use serde::{Deserialize, Serialize};

/// Heuristic weights used by the derogation scorers.
///
/// The values are hand-tuned business constants; change them only with underwriting input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerogationConfig {
    /// Share of a scenario's total trigger weight that must match.
    pub scenario_acceptance_ratio: f64,

    pub compatibility_base: i16,
    pub flexibility_very_high_bonus: i16,
    pub flexibility_high_bonus: i16,
    pub flexibility_medium_bonus: i16,
    pub flexibility_low_bonus: i16,
    pub flexibility_none_bonus: i16,
    pub human_factor_weight_threshold: f32,
    pub human_factor_bonus: i16,
    pub approval_rate_threshold: f32,
    pub approval_rate_bonus: i16,
    /// Profiles scoring at or below this are not proposed.
    pub compatibility_cutoff: u8,

    pub full_waiver_min_legitimacy: u8,
    pub full_waiver_min_compatibility: u8,
    pub conditional_min_legitimacy: u8,
    pub premium_increase_min_legitimacy: u8,
    pub legitimacy_probability_factor: f64,
    pub max_success_probability: f64,

    pub legitimacy_without_factors: u8,
    pub verified_bonus: u8,
    pub documentation_bonus: u8,
    pub additional_factor_bonus: u8,
    pub mitigation_scale: f32,
    pub mitigation_cap: u8,

    pub similarity_base: u8,
    pub similarity_step: u8,
    pub similarity_cutoff: u8,
    pub max_precedents: usize,
}

impl Default for DerogationConfig {
    fn default() -> Self {
        Self {
            scenario_acceptance_ratio: 0.5,
            compatibility_base: 50,
            flexibility_very_high_bonus: 30,
            flexibility_high_bonus: 20,
            flexibility_medium_bonus: 10,
            flexibility_low_bonus: -10,
            flexibility_none_bonus: -20,
            human_factor_weight_threshold: 0.7,
            human_factor_bonus: 15,
            approval_rate_threshold: 0.8,
            approval_rate_bonus: 10,
            compatibility_cutoff: 40,
            full_waiver_min_legitimacy: 85,
            full_waiver_min_compatibility: 80,
            conditional_min_legitimacy: 70,
            premium_increase_min_legitimacy: 50,
            legitimacy_probability_factor: 0.3,
            max_success_probability: 95.0,
            legitimacy_without_factors: 20,
            verified_bonus: 15,
            documentation_bonus: 5,
            additional_factor_bonus: 5,
            mitigation_scale: 10.0,
            mitigation_cap: 15,
            similarity_base: 50,
            similarity_step: 20,
            similarity_cutoff: 60,
            max_precedents: 3,
        }
    }
}
