use serde::Serialize;
use tracing::debug;

use super::catalog::{Catalog, Scenario};
use super::config::DerogationConfig;
use super::domain::Situation;
use super::triggers::evaluate_trigger;

/// Winning scenario together with the evidence that selected it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioMatch<'a> {
    pub scenario: &'a Scenario,
    pub matched_weight: f64,
    pub total_weight: f64,
    pub matched_conditions: Vec<&'static str>,
}

impl ScenarioMatch<'_> {
    pub fn coverage(&self) -> f64 {
        if self.total_weight > 0.0 {
            self.matched_weight / self.total_weight
        } else {
            0.0
        }
    }
}

/// Weighted sum of the triggers that hold, plus the conditions behind it.
pub(crate) fn score_scenario(scenario: &Scenario, situation: &Situation) -> (f64, Vec<&'static str>) {
    scenario
        .triggers
        .iter()
        .filter(|trigger| evaluate_trigger(trigger, situation))
        .fold((0.0, Vec::new()), |(sum, mut conditions), trigger| {
            conditions.push(trigger.condition);
            (sum + trigger.weight, conditions)
        })
}

/// Best scenario by weighted trigger sum; only scenarios whose sum exceeds the acceptance
/// share of their own total weight compete, and earlier catalog entries win ties.
pub fn match_scenario<'a>(
    catalog: &'a Catalog,
    situation: &Situation,
    config: &DerogationConfig,
) -> Option<ScenarioMatch<'a>> {
    let mut best: Option<ScenarioMatch<'a>> = None;

    for scenario in catalog.scenarios() {
        let total_weight = scenario.total_weight();
        if total_weight <= 0.0 {
            continue;
        }

        let (matched_weight, matched_conditions) = score_scenario(scenario, situation);
        if matched_weight <= total_weight * config.scenario_acceptance_ratio {
            continue;
        }

        let improves = best
            .as_ref()
            .map_or(true, |current| matched_weight > current.matched_weight);
        if improves {
            best = Some(ScenarioMatch {
                scenario,
                matched_weight,
                total_weight,
                matched_conditions,
            });
        }
    }

    match &best {
        Some(found) => debug!(
            scenario = found.scenario.id,
            matched_weight = found.matched_weight,
            "scenario matched"
        ),
        None => debug!("no scenario cleared the acceptance threshold"),
    }

    best
}
