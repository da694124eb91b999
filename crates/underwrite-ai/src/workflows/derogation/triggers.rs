use super::catalog::{Trigger, TriggerOperator, TriggerValue};
use super::domain::{CircumstanceKind, IncomeStability, Situation};

/// A situation fact resolved from a trigger condition name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fact {
    Bool(bool),
    Number(f64),
    List(Vec<&'static str>),
}

/// Resolve a condition name. Unknown names and absent optional data resolve to `None`.
pub(crate) fn resolve_fact(condition: &str, situation: &Situation) -> Option<Fact> {
    if let Some(label) = condition.strip_prefix("has_") {
        return CircumstanceKind::from_label(label).map(|kind| Fact::Bool(situation.has(kind)));
    }
    if let Some(label) = condition.strip_suffix("_verified") {
        return CircumstanceKind::from_label(label)
            .map(|kind| Fact::Bool(situation.has_verified(kind)));
    }

    let context = &situation.context;
    match condition {
        "actual_value" => situation.actual_value.map(Fact::Number),
        "circumstance_count" => Some(Fact::Number(situation.circumstances().len() as f64)),
        "verified_circumstance_count" => Some(Fact::Number(
            situation
                .circumstances()
                .iter()
                .filter(|c| c.verified)
                .count() as f64,
        )),
        "mitigating_factor_count" => {
            Some(Fact::Number(situation.mitigating_factors().len() as f64))
        }
        "claims_count" => context.responsible_claims.map(|n| Fact::Number(n as f64)),
        "payment_incidents" => context.payment_incidents.map(|n| Fact::Number(n as f64)),
        "years_licensed" => context.years_licensed.map(|n| Fact::Number(n as f64)),
        "income_stable" => context
            .income_stability
            .map(|stability| Fact::Bool(stability == IncomeStability::Stable)),
        "currently_employed" => context.currently_employed.map(Fact::Bool),
        "circumstance_kinds" => Some(Fact::List(
            situation
                .circumstances()
                .iter()
                .map(|c| c.kind.label())
                .collect(),
        )),
        _ => None,
    }
}

/// Evaluate one trigger. Never fails: anything unresolvable is a non-match.
pub fn evaluate_trigger(trigger: &Trigger, situation: &Situation) -> bool {
    let Some(fact) = resolve_fact(trigger.condition, situation) else {
        return false;
    };

    match (trigger.operator, &fact, trigger.threshold) {
        (TriggerOperator::Equals, Fact::Bool(actual), TriggerValue::Bool(expected)) => {
            *actual == expected
        }
        (TriggerOperator::Equals, Fact::Number(actual), TriggerValue::Number(expected)) => {
            (actual - expected).abs() < f64::EPSILON
        }
        (TriggerOperator::LessThan, Fact::Number(actual), TriggerValue::Number(limit)) => {
            *actual < limit
        }
        (TriggerOperator::GreaterThan, Fact::Number(actual), TriggerValue::Number(limit)) => {
            *actual > limit
        }
        (TriggerOperator::Contains, Fact::List(items), TriggerValue::Text(needle)) => items
            .iter()
            .any(|item| item.eq_ignore_ascii_case(needle)),
        _ => false,
    }
}
