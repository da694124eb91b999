//! Adaptive quote questionnaire with eligibility scoring over a persisted session.
//!
//! Every answer batch is validated per question, merged into the [`Session`], rescored by the
//! [`EligibilityScorer`] and the recommendation rules, then written to the Session Store.

pub mod domain;
pub mod eligibility;
pub mod questionnaire;
pub mod recommendations;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{AnswerValue, Answers, ProductType, Session, SessionId, SessionStatus, SessionSummary};
pub use eligibility::{
    Difficulty, EligibilityAnalysis, EligibilityConfig, EligibilityFactor, EligibilityScorer,
    EligibilitySignal, Improvement, Polarity,
};
pub use questionnaire::{
    assemble_steps, QuestionnaireCache, RenderedStep, Step, ValidationIssue,
};
pub use recommendations::{generate_recommendations, Priority, Recommendation, RecommendationKind};
pub use repository::{JsonSessionStore, RepositoryError, SessionRepository};
pub use router::quote_router;
pub use service::{AnswerBatch, AnswerOutcome, QuestionnaireView, QuoteServiceError, QuoteSessionService};
