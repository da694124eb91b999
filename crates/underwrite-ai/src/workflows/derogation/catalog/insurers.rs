use std::collections::BTreeMap;

use super::super::domain::RequirementCategory;
use super::{
    ContactInfo, CounterpartyProfile, DecisionCriteria, DerogationHistory, Flexibility,
    FlexibilityLevel, RiskTolerance,
};

fn flexibility(
    level: FlexibilityLevel,
    max_deviation: f64,
    conditions: Vec<&'static str>,
    typical_requirements: Vec<&'static str>,
    success_factors: Vec<&'static str>,
) -> Flexibility {
    Flexibility {
        level,
        conditions,
        max_deviation,
        typical_requirements,
        success_factors,
    }
}

pub(super) fn standard_profiles() -> Vec<CounterpartyProfile> {
    use FlexibilityLevel::{High, Low, Medium, VeryHigh};
    use RequirementCategory::{
        BonusMalus, ClaimsHistory, ContinuousCoverage, DrivingExperience, PaymentHistory,
    };

    vec![
        CounterpartyProfile {
            id: "atlas_mutuelle",
            name: "Atlas Mutuelle",
            flexibility: BTreeMap::from([
                (
                    ContinuousCoverage,
                    flexibility(
                        VeryHigh,
                        12.0,
                        vec!["Sale or termination certificate on file"],
                        vec!["Claims history statement"],
                        vec!["Documented reason for the gap", "Clean history before the gap"],
                    ),
                ),
                (
                    ClaimsHistory,
                    flexibility(
                        High,
                        2.0,
                        vec!["Liability determination for each claim"],
                        vec!["Accident reports"],
                        vec!["Third-party fault"],
                    ),
                ),
                (
                    DrivingExperience,
                    flexibility(Medium, 1.0, vec!["Named driver restriction"], Vec::new(), Vec::new()),
                ),
                (
                    BonusMalus,
                    flexibility(Low, 0.1, vec!["Surcharge applied"], Vec::new(), Vec::new()),
                ),
                (
                    PaymentHistory,
                    flexibility(Low, 1.0, vec!["Direct debit mandatory"], Vec::new(), Vec::new()),
                ),
            ]),
            history: DerogationHistory {
                total_requests: 412,
                approval_rate: 0.86,
                average_response_days: 6,
                common_conditions: vec!["Monitoring period", "Documentation within 30 days"],
                preferred_approaches: vec!["Continuity waiver", "Probation period"],
            },
            decision_criteria: DecisionCriteria {
                business_value_threshold: 600.0,
                risk_tolerance: RiskTolerance::Medium,
                human_factor_weight: 0.8,
                documentation_requirements: vec!["Identity document", "Claims history statement"],
            },
            contact: ContactInfo {
                department: "Underwriting exceptions desk",
                email: "derogations@atlas-mutuelle.example",
                escalation_path: vec!["Senior underwriter", "Head of motor underwriting"],
            },
        },
        CounterpartyProfile {
            id: "horizon_assurances",
            name: "Horizon Assurances",
            flexibility: BTreeMap::from([
                (
                    ContinuousCoverage,
                    flexibility(
                        Medium,
                        6.0,
                        vec!["12 month monitoring period"],
                        vec!["Claims history statement"],
                        vec!["Short gap"],
                    ),
                ),
                (
                    ClaimsHistory,
                    flexibility(Medium, 1.0, vec!["Raised deductible"], Vec::new(), Vec::new()),
                ),
                (
                    PaymentHistory,
                    flexibility(
                        Medium,
                        2.0,
                        vec!["Monthly direct debit"],
                        vec!["Proof of income"],
                        vec!["Restored employment"],
                    ),
                ),
            ]),
            history: DerogationHistory {
                total_requests: 268,
                approval_rate: 0.72,
                average_response_days: 12,
                common_conditions: vec!["Raised deductible", "Premium surcharge"],
                preferred_approaches: vec!["Conditional acceptance"],
            },
            decision_criteria: DecisionCriteria {
                business_value_threshold: 800.0,
                risk_tolerance: RiskTolerance::Medium,
                human_factor_weight: 0.6,
                documentation_requirements: vec!["Claims history statement"],
            },
            contact: ContactInfo {
                department: "Broker underwriting",
                email: "souscription@horizon.example",
                escalation_path: vec!["Regional underwriting manager"],
            },
        },
        CounterpartyProfile {
            id: "nordic_shield",
            name: "Nordic Shield",
            flexibility: BTreeMap::from([
                (
                    ContinuousCoverage,
                    flexibility(
                        High,
                        9.0,
                        vec!["Foreign or medical certificate translated"],
                        vec!["Certified translation"],
                        vec!["Verifiable foreign history"],
                    ),
                ),
                (
                    DrivingExperience,
                    flexibility(High, 2.0, Vec::new(), vec!["Foreign licence"], Vec::new()),
                ),
                (
                    ClaimsHistory,
                    flexibility(Low, 0.0, Vec::new(), Vec::new(), Vec::new()),
                ),
            ]),
            history: DerogationHistory {
                total_requests: 154,
                approval_rate: 0.78,
                average_response_days: 10,
                common_conditions: vec!["Certified translation"],
                preferred_approaches: vec!["History recognition"],
            },
            decision_criteria: DecisionCriteria {
                business_value_threshold: 500.0,
                risk_tolerance: RiskTolerance::High,
                human_factor_weight: 0.75,
                documentation_requirements: vec!["Foreign claim-free certificate"],
            },
            contact: ContactInfo {
                department: "International desk",
                email: "exceptions@nordicshield.example",
                escalation_path: vec!["International underwriting lead"],
            },
        },
        CounterpartyProfile {
            id: "solidaris_risk",
            name: "Solidaris Risk",
            flexibility: BTreeMap::from([
                (
                    PaymentHistory,
                    flexibility(
                        VeryHigh,
                        4.0,
                        vec!["Annual premium upfront"],
                        vec!["Proof of settled arrears"],
                        vec!["Arrears settled"],
                    ),
                ),
                (
                    ContinuousCoverage,
                    flexibility(Low, 3.0, vec!["Premium surcharge"], Vec::new(), Vec::new()),
                ),
                (
                    ClaimsHistory,
                    flexibility(High, 3.0, vec!["Premium surcharge"], Vec::new(), Vec::new()),
                ),
            ]),
            history: DerogationHistory {
                total_requests: 97,
                approval_rate: 0.66,
                average_response_days: 18,
                common_conditions: vec!["Premium surcharge", "Annual payment upfront"],
                preferred_approaches: vec!["Premium increase"],
            },
            decision_criteria: DecisionCriteria {
                business_value_threshold: 400.0,
                risk_tolerance: RiskTolerance::High,
                human_factor_weight: 0.5,
                documentation_requirements: vec!["Cancellation letter"],
            },
            contact: ContactInfo {
                department: "Specialised risks",
                email: "risques@solidaris.example",
                escalation_path: vec!["Specialised risks director"],
            },
        },
        CounterpartyProfile {
            id: "granite_direct",
            name: "Granite Direct",
            flexibility: BTreeMap::from([
                (
                    ContinuousCoverage,
                    flexibility(FlexibilityLevel::None, 0.0, Vec::new(), Vec::new(), Vec::new()),
                ),
                (
                    BonusMalus,
                    flexibility(FlexibilityLevel::None, 0.0, Vec::new(), Vec::new(), Vec::new()),
                ),
            ]),
            history: DerogationHistory {
                total_requests: 58,
                approval_rate: 0.31,
                average_response_days: 21,
                common_conditions: Vec::new(),
                preferred_approaches: Vec::new(),
            },
            decision_criteria: DecisionCriteria {
                business_value_threshold: 1500.0,
                risk_tolerance: RiskTolerance::Low,
                human_factor_weight: 0.3,
                documentation_requirements: vec!["Full five-year history"],
            },
            contact: ContactInfo {
                department: "Direct underwriting",
                email: "underwriting@granite.example",
                escalation_path: Vec::new(),
            },
        },
    ]
}
