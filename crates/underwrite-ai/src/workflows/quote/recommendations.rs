use serde::{Deserialize, Serialize};

use super::domain::{Answers, ProductType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    CrossSell,
    Optimization,
    Coverage,
}

/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_saving_pct: Option<f64>,
}

fn recommendation(
    id: &str,
    kind: RecommendationKind,
    title: &str,
    description: String,
    priority: Priority,
    expected_saving_pct: Option<f64>,
) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description,
        priority,
        expected_saving_pct,
    }
}

fn number(answers: &Answers, id: &str) -> Option<f64> {
    answers.get(id).and_then(|answer| answer.as_number())
}

fn text<'a>(answers: &'a Answers, id: &str) -> Option<&'a str> {
    answers.get(id).and_then(|answer| answer.as_text()).map(str::trim)
}

/// Cross-sell and optimisation hints derived from the answers. Pure; ordered by priority with
/// rule order kept inside a priority.
pub fn generate_recommendations(
    product: ProductType,
    answers: &Answers,
    eligibility_score: u8,
) -> Vec<Recommendation> {
    use RecommendationKind::{Coverage, CrossSell, Optimization};

    let mut hints = Vec::new();

    if product == ProductType::Auto {
        if text(answers, "housing_status") == Some("owner") {
            hints.push(recommendation(
                "home_bundle",
                CrossSell,
                "Bundle home and car",
                "Homeowners insuring their car and home together get a multi-policy discount."
                    .to_string(),
                Priority::High,
                Some(15.0),
            ));
        }
        if let Some(mileage) = number(answers, "annual_mileage").filter(|km| *km < 8_000.0) {
            hints.push(recommendation(
                "pay_per_mile",
                Optimization,
                "Pay per mile",
                format!("At {mileage} km a year a mileage-based policy is usually cheaper."),
                Priority::Medium,
                Some(20.0),
            ));
        }
        if let Some(count) = number(answers, "vehicle_count").filter(|count| *count >= 2.0) {
            hints.push(recommendation(
                "multi_vehicle",
                Optimization,
                "Multi-vehicle discount",
                format!("Insuring all {count} vehicles on one contract unlocks a fleet discount."),
                Priority::High,
                Some(10.0),
            ));
        }
    }

    if let Some(budget) = number(answers, "monthly_budget").filter(|budget| *budget < 40.0) {
        hints.push(recommendation(
            "higher_deductible",
            Optimization,
            "Raise the deductible",
            format!("A higher deductible keeps the premium within {budget} EUR a month."),
            Priority::Medium,
            Some(12.0),
        ));
    }

    if product == ProductType::Home
        && answers
            .get("security_system")
            .and_then(|answer| answer.as_bool())
            == Some(false)
    {
        hints.push(recommendation(
            "security_discount",
            Coverage,
            "Install an alarm",
            "A certified alarm lowers the theft premium and improves eligibility.".to_string(),
            Priority::Medium,
            Some(5.0),
        ));
    }

    if product == ProductType::Health {
        if let Some(members) = number(answers, "household_members").filter(|n| *n >= 3.0) {
            hints.push(recommendation(
                "family_plan",
                CrossSell,
                "Family plan",
                format!("Covering {members} people under one family plan costs less than separate policies."),
                Priority::Medium,
                Some(15.0),
            ));
        }
    }

    if eligibility_score > 80 {
        hints.push(recommendation(
            "premium_tier",
            CrossSell,
            "Premium tier",
            "The profile qualifies for loyalty pricing on the premium tier.".to_string(),
            Priority::Low,
            None,
        ));
    }

    hints.sort_by_key(|hint| hint.priority);
    hints
}
