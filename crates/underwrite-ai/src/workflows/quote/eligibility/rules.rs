use super::super::domain::Answers;
use super::config::EligibilityConfig;
use super::{EligibilityFactor, EligibilitySignal, Polarity};

fn factor(signal: EligibilitySignal, score: i16, explanation: String) -> EligibilityFactor {
    let polarity = match score {
        s if s > 0 => Polarity::Positive,
        s if s < 0 => Polarity::Negative,
        _ => Polarity::Neutral,
    };
    EligibilityFactor {
        signal,
        name: signal.label().to_string(),
        score,
        weight: signal.weight(),
        polarity,
        explanation,
    }
}

fn number(answers: &Answers, signal: EligibilitySignal) -> Option<f64> {
    answers
        .get(signal.answer_id())
        .and_then(|answer| answer.as_number())
        .filter(|value| value.is_finite())
}

fn flag(answers: &Answers, signal: EligibilitySignal) -> Option<bool> {
    answers
        .get(signal.answer_id())
        .and_then(|answer| answer.as_bool())
}

fn driver_age(age: f64, config: &EligibilityConfig) -> EligibilityFactor {
    let signal = EligibilitySignal::DriverAge;
    if age < config.young_driver_age {
        factor(
            signal,
            config.young_driver_delta,
            format!("drivers under {} carry a young-driver surcharge", config.young_driver_age),
        )
    } else if age <= config.mature_driver_max_age {
        factor(
            signal,
            config.mature_driver_delta,
            format!("age {age} is in the lowest-risk bracket"),
        )
    } else if age > config.senior_driver_age {
        factor(
            signal,
            config.senior_driver_delta,
            format!("drivers over {} are priced with a senior loading", config.senior_driver_age),
        )
    } else {
        factor(signal, 0, format!("age {age} is priced neutrally"))
    }
}

fn claims(count: f64, config: &EligibilityConfig) -> EligibilityFactor {
    let signal = EligibilitySignal::ClaimsHistory;
    if count <= 0.0 {
        factor(
            signal,
            config.no_claims_delta,
            "no claims in the last five years".to_string(),
        )
    } else if count < 2.0 {
        factor(
            signal,
            config.single_claim_delta,
            "one claim in the last five years".to_string(),
        )
    } else {
        factor(
            signal,
            config.multiple_claims_delta,
            format!("{count} claims in the last five years"),
        )
    }
}

fn budget(amount: f64, config: &EligibilityConfig) -> EligibilityFactor {
    let signal = EligibilitySignal::MonthlyBudget;
    if amount >= config.comfortable_budget {
        factor(
            signal,
            config.comfortable_budget_delta,
            format!("budget of {amount} EUR/month opens the full product range"),
        )
    } else if amount < config.tight_budget {
        factor(
            signal,
            config.tight_budget_delta,
            format!("budget of {amount} EUR/month limits the available covers"),
        )
    } else {
        factor(signal, 0, format!("budget of {amount} EUR/month fits standard covers"))
    }
}

fn licence(years: f64, config: &EligibilityConfig) -> EligibilityFactor {
    let signal = EligibilitySignal::YearsLicensed;
    if years >= config.seasoned_licence_years {
        factor(
            signal,
            config.seasoned_licence_delta,
            format!("{years} years of driving experience"),
        )
    } else if years < config.novice_licence_years {
        factor(
            signal,
            config.novice_licence_delta,
            format!("novice licence held for {years} year(s)"),
        )
    } else {
        factor(signal, 0, format!("licence held for {years} years"))
    }
}

fn bonus_malus(coefficient: f64, config: &EligibilityConfig) -> EligibilityFactor {
    let signal = EligibilitySignal::BonusMalus;
    if coefficient <= config.bonus_coefficient {
        factor(
            signal,
            config.bonus_delta,
            format!("bonus coefficient {coefficient:.2}"),
        )
    } else if coefficient > config.malus_coefficient {
        factor(
            signal,
            config.malus_delta,
            format!("malus coefficient {coefficient:.2}"),
        )
    } else {
        factor(signal, 0, format!("coefficient {coefficient:.2} is near neutral"))
    }
}

fn coverage(months: f64, config: &EligibilityConfig) -> EligibilityFactor {
    let signal = EligibilitySignal::ContinuousCoverage;
    if months >= config.long_coverage_months {
        factor(
            signal,
            config.long_coverage_delta,
            format!("{months} months of uninterrupted cover"),
        )
    } else if months < config.short_coverage_months {
        factor(
            signal,
            config.short_coverage_delta,
            format!("only {months} months of continuous cover"),
        )
    } else {
        factor(signal, 0, format!("{months} months of continuous cover"))
    }
}

/// One factor per recognised answer; absent or unreadable answers contribute nothing.
pub(crate) fn score_answers(
    answers: &Answers,
    config: &EligibilityConfig,
) -> (Vec<EligibilityFactor>, i16) {
    let mut factors = Vec::new();

    if let Some(age) = number(answers, EligibilitySignal::DriverAge) {
        factors.push(driver_age(age, config));
    }
    if let Some(count) = number(answers, EligibilitySignal::ClaimsHistory) {
        factors.push(claims(count, config));
    }
    if let Some(amount) = number(answers, EligibilitySignal::MonthlyBudget) {
        factors.push(budget(amount, config));
    }
    if let Some(years) = number(answers, EligibilitySignal::YearsLicensed) {
        factors.push(licence(years, config));
    }
    if let Some(coefficient) = number(answers, EligibilitySignal::BonusMalus) {
        factors.push(bonus_malus(coefficient, config));
    }
    if flag(answers, EligibilitySignal::PreviousCancellation) == Some(true) {
        factors.push(factor(
            EligibilitySignal::PreviousCancellation,
            config.cancellation_delta,
            "a previous insurer cancelled the policy".to_string(),
        ));
    }
    if let Some(months) = number(answers, EligibilitySignal::ContinuousCoverage) {
        factors.push(coverage(months, config));
    }
    if flag(answers, EligibilitySignal::Smoker) == Some(true) {
        factors.push(factor(
            EligibilitySignal::Smoker,
            config.smoker_delta,
            "smokers are rated on the smoker table".to_string(),
        ));
    }
    if flag(answers, EligibilitySignal::SecuritySystem) == Some(true) {
        factors.push(factor(
            EligibilitySignal::SecuritySystem,
            config.security_system_delta,
            "a security system is installed".to_string(),
        ));
    }

    let total = factors
        .iter()
        .fold(config.base_score, |total, factor| total + factor.score);

    (factors, total)
}
