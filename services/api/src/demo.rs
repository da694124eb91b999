use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use underwrite_ai::error::AppError;
use underwrite_ai::workflows::derogation::router::DerogationRequest;
use underwrite_ai::workflows::derogation::{
    Circumstance, CircumstanceKind, DerogationAdvisor, DerogationReport, IncomeStability,
    PersonalContext, Requirement, Situation,
};
use underwrite_ai::workflows::quote::{
    AnswerBatch, AnswerValue, EligibilityConfig, JsonSessionStore, QuoteServiceError,
    QuoteSessionService, Session, SessionRepository,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the derogation portion of the demo.
    #[arg(long)]
    pub(crate) skip_derogation: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// JSON file holding `{ "situation": ..., "requirement": ... }`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the full report as JSON instead of the summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Underwriting advisory demo");

    println!("\nAuto quote session");
    let service = QuoteSessionService::new(
        Arc::new(JsonSessionStore::new()),
        EligibilityConfig::default(),
    );
    match walk_sample_quote(&service) {
        Ok(session) => render_session(&session),
        Err(err) => println!("  Quote session unavailable: {err}"),
    }

    if args.skip_derogation {
        return Ok(());
    }

    println!("\nDerogation case: vehicle sold, coverage gap");
    let advisor = DerogationAdvisor::default();
    let report = advisor.advise(&sample_situation(), &sample_requirement());
    render_report(&report);

    Ok(())
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let request = load_case(&args.input)?;
    let advisor = DerogationAdvisor::default();
    let report = advisor.advise(&request.situation, &request.requirement);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Derogation analysis for {}", args.input.display());
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn load_case(path: &Path) -> Result<DerogationRequest, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn text(value: &str) -> AnswerValue {
    AnswerValue::text(value)
}

fn sample_auto_answers() -> Vec<(&'static str, AnswerValue)> {
    vec![
        ("product_type", text("auto")),
        ("first_name", text("Camille")),
        ("last_name", text("Durand")),
        ("email", text("camille.durand@example.com")),
        ("birth_date", text("1986-04-12")),
        ("street", text("12 rue des Lilas")),
        ("postal_code", text("69003")),
        ("city", text("Lyon")),
        ("housing_status", text("owner")),
        ("monthly_budget", AnswerValue::Number(75.0)),
        ("payment_frequency", text("monthly")),
        ("vehicle_type", text("car")),
        ("vehicle_count", AnswerValue::Number(2.0)),
        ("annual_mileage", AnswerValue::Number(6_500.0)),
        ("driver_age", AnswerValue::Number(38.0)),
        ("years_licensed", AnswerValue::Number(20.0)),
        ("bonus_malus", AnswerValue::Number(0.68)),
        ("claims_last_5_years", AnswerValue::Number(1.0)),
        ("claim_details", text("Parking scrape, 2022")),
        ("continuous_coverage_months", AnswerValue::Number(30.0)),
        ("previous_insurer_cancelled", text("no")),
        ("contact_preference", text("email")),
        ("consent", AnswerValue::List(vec!["data_processing".to_string()])),
    ]
}

/// Submit the sample answers one questionnaire step at a time, then complete the session.
pub(crate) fn walk_sample_quote<R>(service: &QuoteSessionService<R>) -> Result<Session, QuoteServiceError>
where
    R: SessionRepository + 'static,
{
    let mut session = service.create_session(Some("demo-broker".to_string()))?;
    let answers = sample_auto_answers();

    for _ in 0..session.step_count.max(1) * 2 {
        let steps = service.get_adaptive_questionnaire(session.product_type, &session);
        let Some(step) = steps.get(session.current_step) else {
            break;
        };
        let batch = AnswerBatch {
            answers: answers
                .iter()
                .filter(|(id, _)| step.question(id).is_some())
                .map(|(id, value)| (id.to_string(), value.clone()))
                .collect(),
            advance: true,
        };

        let outcome = service.submit_answers(&session.id, batch)?;
        let stalled = outcome.session.current_step == session.current_step;
        for issue in &outcome.issues {
            println!("  ! {}: {}", issue.question_id, issue.message);
        }
        session = outcome.session;
        if stalled {
            break;
        }
    }

    service.complete(&session.id)
}

fn render_session(session: &Session) {
    println!(
        "- Session {} ({}) -> {} after {} steps",
        session.id,
        session.product_type.label(),
        session.status.label(),
        session.step_count
    );

    let Some(eligibility) = &session.eligibility else {
        println!("  Eligibility not scored");
        return;
    };
    println!("  Eligibility score: {}", eligibility.score);
    for factor in &eligibility.factors {
        println!(
            "    - {}: {:+} ({})",
            factor.name, factor.score, factor.explanation
        );
    }
    for warning in &eligibility.warnings {
        println!("  Warning: {warning}");
    }
    for improvement in &eligibility.improvements {
        println!(
            "  Improve: {} (+{} points, {:?})",
            improvement.action, improvement.impact, improvement.difficulty
        );
    }

    if session.recommendations.is_empty() {
        println!("  Recommendations: none");
    } else {
        println!("  Recommendations:");
        for hint in &session.recommendations {
            match hint.expected_saving_pct {
                Some(saving) => println!(
                    "    - [{:?}] {} (about {saving:.0}% saving)",
                    hint.priority, hint.title
                ),
                None => println!("    - [{:?}] {}", hint.priority, hint.title),
            }
        }
    }
}

fn sample_requirement() -> Requirement {
    Requirement::continuous_coverage_months(36.0)
}

fn sample_situation() -> Situation {
    Situation::new(Some(33.0))
        .with_circumstance(
            Circumstance::new(
                CircumstanceKind::VehicleSale,
                "Sold the previous car and went four months without a vehicle",
            )
            .verified_with(&["certificate_of_sale.pdf"]),
        )
        .with_context(PersonalContext {
            income_stability: Some(IncomeStability::Stable),
            responsible_claims: Some(0),
            payment_incidents: Some(0),
            years_licensed: Some(15),
            currently_employed: Some(true),
        })
}

fn render_report(report: &DerogationReport) {
    let analysis = &report.analysis;
    println!("- Legitimacy score: {}", analysis.legitimacy_score);
    if let Some(gap) = &analysis.gap {
        println!(
            "  Gap: {:.1} of {:.1} ({:?})",
            gap.actual_value, gap.required_value, gap.severity
        );
    }
    println!(
        "  Risk: {:?} (score {}, {:+.1}% premium)",
        analysis.risk_assessment.level,
        analysis.risk_assessment.score,
        analysis.risk_assessment.premium_adjustment_pct
    );
    match &analysis.recommended_strategy {
        Some(strategy) => println!(
            "  Strategy: {} -> {} ({}% expected)",
            strategy.scenario_name, strategy.approach, strategy.success_probability
        ),
        None => println!("  Strategy: no catalog scenario matched"),
    }

    if report.proposals.is_empty() {
        println!("  Proposals: none cleared the compatibility cutoff");
    } else {
        println!("  Proposals:");
        for proposal in &report.proposals {
            println!(
                "    - {}: {} | {}% success | compatibility {} | {:+.1}% premium | {}",
                proposal.counterparty_name,
                proposal.proposal_type.label(),
                proposal.success_probability,
                proposal.compatibility_score,
                proposal.premium_adjustment_pct,
                proposal.expected_timeline
            );
        }
    }

    if !report.similar_cases.is_empty() {
        println!("  Precedents:");
        for case in &report.similar_cases {
            println!(
                "    - {}% similar: {} ({})",
                case.similarity, case.situation, case.counterparty
            );
        }
    }
}
