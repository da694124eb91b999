use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::derogation::catalog::{
    Catalog, Scenario, Trigger, TriggerOperator, TriggerValue,
};
use crate::workflows::derogation::domain::{
    Circumstance, CircumstanceKind, IncomeStability, PersonalContext, Requirement, Situation,
};
use crate::workflows::derogation::{DerogationAdvisor, DerogationConfig};

pub(super) fn advisor() -> DerogationAdvisor {
    DerogationAdvisor::default()
}

pub(super) fn coverage_requirement() -> Requirement {
    Requirement::continuous_coverage_months(36.0)
}

pub(super) fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn vehicle_sale_situation() -> Situation {
    Situation::new(Some(35.0))
        .with_circumstance(
            Circumstance::new(
                CircumstanceKind::VehicleSale,
                "Sold the family car before moving closer to work",
            )
            .verified_with(&["certificate_of_sale.pdf"]),
        )
        .with_context(PersonalContext {
            income_stability: Some(IncomeStability::Stable),
            responsible_claims: Some(0),
            payment_incidents: Some(0),
            years_licensed: Some(12),
            currently_employed: Some(true),
        })
}

pub(super) fn bare_situation(actual_value: f64) -> Situation {
    Situation::new(Some(actual_value))
}

pub(super) fn trigger(
    condition: &'static str,
    operator: TriggerOperator,
    threshold: TriggerValue,
    weight: f64,
) -> Trigger {
    Trigger {
        condition,
        operator,
        threshold,
        weight,
    }
}

pub(super) fn scenario(id: &'static str, triggers: Vec<Trigger>) -> Scenario {
    Scenario {
        id,
        name: id,
        description: "test scenario",
        triggers,
        strategies: Vec::new(),
        common_arguments: Vec::new(),
        success_rate: 0.5,
        examples: Vec::new(),
    }
}

pub(super) fn leaked_catalog(scenarios: Vec<Scenario>) -> &'static Catalog {
    let profiles = Catalog::standard().profiles().to_vec();
    Box::leak(Box::new(Catalog::new(scenarios, profiles)))
}

pub(super) fn config() -> DerogationConfig {
    DerogationConfig::default()
}
