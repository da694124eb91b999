mod config;
mod rules;

pub use config::EligibilityConfig;

use serde::{Deserialize, Serialize};

use super::domain::Answers;

/// Answer-backed input the scorer recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilitySignal {
    DriverAge,
    ClaimsHistory,
    MonthlyBudget,
    YearsLicensed,
    BonusMalus,
    PreviousCancellation,
    ContinuousCoverage,
    Smoker,
    SecuritySystem,
}

impl EligibilitySignal {
    pub const fn answer_id(self) -> &'static str {
        match self {
            EligibilitySignal::DriverAge => "driver_age",
            EligibilitySignal::ClaimsHistory => "claims_last_5_years",
            EligibilitySignal::MonthlyBudget => "monthly_budget",
            EligibilitySignal::YearsLicensed => "years_licensed",
            EligibilitySignal::BonusMalus => "bonus_malus",
            EligibilitySignal::PreviousCancellation => "previous_insurer_cancelled",
            EligibilitySignal::ContinuousCoverage => "continuous_coverage_months",
            EligibilitySignal::Smoker => "smoker",
            EligibilitySignal::SecuritySystem => "security_system",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EligibilitySignal::DriverAge => "Driver age",
            EligibilitySignal::ClaimsHistory => "Claims history",
            EligibilitySignal::MonthlyBudget => "Budget",
            EligibilitySignal::YearsLicensed => "Driving experience",
            EligibilitySignal::BonusMalus => "Bonus-malus",
            EligibilitySignal::PreviousCancellation => "Previous cancellation",
            EligibilitySignal::ContinuousCoverage => "Continuous cover",
            EligibilitySignal::Smoker => "Smoking status",
            EligibilitySignal::SecuritySystem => "Security system",
        }
    }

    /// Relative weight shown alongside the factor; the weights sum to 1.
    pub const fn weight(self) -> f64 {
        match self {
            EligibilitySignal::DriverAge => 0.15,
            EligibilitySignal::ClaimsHistory => 0.25,
            EligibilitySignal::MonthlyBudget => 0.10,
            EligibilitySignal::YearsLicensed => 0.10,
            EligibilitySignal::BonusMalus => 0.15,
            EligibilitySignal::PreviousCancellation => 0.10,
            EligibilitySignal::ContinuousCoverage => 0.10,
            EligibilitySignal::Smoker => 0.03,
            EligibilitySignal::SecuritySystem => 0.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

/// Scored contribution kept for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityFactor {
    pub signal: EligibilitySignal,
    pub name: String,
    pub score: i16,
    pub weight: f64,
    pub polarity: Polarity,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub action: String,
    /// Points the score would gain.
    pub impact: u8,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityAnalysis {
    pub score: u8,
    pub factors: Vec<EligibilityFactor>,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub improvements: Vec<Improvement>,
}

/// Stateless scorer; the same answers always produce the same analysis.
#[derive(Debug, Clone, Default)]
pub struct EligibilityScorer {
    config: EligibilityConfig,
}

fn improvement_for(factor: &EligibilityFactor, config: &EligibilityConfig) -> Improvement {
    let impact = factor.score.unsigned_abs().min(100) as u8;
    let (action, difficulty) = match factor.signal {
        EligibilitySignal::DriverAge if factor.score == config.young_driver_delta => (
            "Add an experienced named driver to the policy",
            Difficulty::Medium,
        ),
        EligibilitySignal::DriverAge => ("Complete a driving refresher course", Difficulty::Easy),
        EligibilitySignal::ClaimsHistory => (
            "Complete a certified defensive-driving course",
            Difficulty::Medium,
        ),
        EligibilitySignal::MonthlyBudget => (
            "Raise the monthly budget or accept a higher deductible",
            Difficulty::Easy,
        ),
        EligibilitySignal::YearsLicensed => (
            "Accept a telematics box during the first year",
            Difficulty::Medium,
        ),
        EligibilitySignal::BonusMalus => (
            "Stay claim-free to bring the coefficient back under 1.00",
            Difficulty::Hard,
        ),
        EligibilitySignal::PreviousCancellation => (
            "Provide proof that the cancelled policy's arrears are settled",
            Difficulty::Medium,
        ),
        EligibilitySignal::ContinuousCoverage => (
            "Provide certificates covering previous insurance periods",
            Difficulty::Easy,
        ),
        EligibilitySignal::Smoker => (
            "Qualify for non-smoker rates after 12 smoke-free months",
            Difficulty::Hard,
        ),
        EligibilitySignal::SecuritySystem => ("Install a certified alarm", Difficulty::Easy),
    };

    Improvement {
        action: action.to_string(),
        impact,
        difficulty,
    }
}

impl EligibilityScorer {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn analyze(&self, answers: &Answers) -> EligibilityAnalysis {
        let config = &self.config;
        let (factors, total) = rules::score_answers(answers, config);
        let score = total.clamp(0, 100) as u8;

        let mut warnings: Vec<String> = factors
            .iter()
            .filter(|factor| factor.score <= config.severe_factor_delta)
            .map(|factor| format!("{}: {}", factor.name, factor.explanation))
            .collect();
        let mut improvements: Vec<Improvement> = factors
            .iter()
            .filter(|factor| factor.polarity == Polarity::Negative)
            .map(|factor| improvement_for(factor, config))
            .collect();
        let mut recommendations = Vec::new();

        if score < config.low_score_threshold {
            warnings.push(format!(
                "Eligibility score {score} is below {}; expect restricted offers",
                config.low_score_threshold
            ));
            if improvements.is_empty() {
                improvements.push(Improvement {
                    action: "Answer the remaining questions so every signal can be scored"
                        .to_string(),
                    impact: config.low_score_threshold - score,
                    difficulty: Difficulty::Easy,
                });
            }
        } else if score > config.high_score_threshold {
            recommendations.push(
                "Profile qualifies for preferred-tier pricing with most insurers".to_string(),
            );
            recommendations.push("Lock in the rate with annual payment".to_string());
        } else {
            recommendations.push("Standard pricing expected".to_string());
        }

        improvements.sort_by(|a, b| b.impact.cmp(&a.impact));

        EligibilityAnalysis {
            score,
            factors,
            recommendations,
            warnings,
            improvements,
        }
    }
}
