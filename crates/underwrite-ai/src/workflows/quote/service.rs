use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{Answers, ProductType, Session, SessionId, SessionStatus, SessionSummary};
use super::eligibility::{EligibilityAnalysis, EligibilityConfig, EligibilityScorer};
use super::questionnaire::{
    find_question, render, validate_answer, validate_step, QuestionnaireCache, RenderedStep,
    Step, ValidationIssue,
};
use super::recommendations::{generate_recommendations, Recommendation};
use super::repository::{RepositoryError, SessionRepository};

/// One batch of answers from the client. `advance` moves to the next step when the current
/// step validates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerBatch {
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub advance: bool,
}

/// Result of an answer batch. `persisted` is false when the store rejected the write; the
/// previously stored record is then still the authoritative one.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub session: Session,
    pub issues: Vec<ValidationIssue>,
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub session_id: SessionId,
    pub product_type: ProductType,
    pub current_step: usize,
    pub step_count: usize,
    pub steps: Vec<RenderedStep>,
}

/// Service composing the Session Store, the questionnaire cache, and the eligibility scorer.
pub struct QuoteSessionService<R> {
    repository: Arc<R>,
    scorer: EligibilityScorer,
    questionnaire: QuestionnaireCache,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let sequence = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!(
        "qs-{}-{sequence:04}",
        Utc::now().timestamp_millis()
    ))
}

fn ensure_open(session: &Session) -> Result<(), QuoteServiceError> {
    if session.status.is_open() {
        Ok(())
    } else {
        Err(QuoteServiceError::Closed {
            id: session.id.clone(),
            status: session.status.label(),
        })
    }
}

impl<R> QuoteSessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: EligibilityConfig) -> Self {
        Self {
            repository,
            scorer: EligibilityScorer::new(config),
            questionnaire: QuestionnaireCache::new(),
        }
    }

    pub fn questionnaire_cache(&self) -> &QuestionnaireCache {
        &self.questionnaire
    }

    /// Start an empty session on the default product and persist it.
    pub fn create_session(&self, subject_id: Option<String>) -> Result<Session, QuoteServiceError> {
        let mut session = Session::new(next_session_id(), subject_id, Utc::now());
        session.step_count = self
            .questionnaire
            .steps_for(session.product_type, session.step_count)
            .len();

        self.repository.save(&session)?;
        info!(
            session_id = %session.id,
            product = session.product_type.label(),
            "quote session created"
        );
        Ok(session)
    }

    pub fn save_session(&self, session: &Session) -> Result<(), QuoteServiceError> {
        self.repository.save(session)?;
        info!(session_id = %session.id, status = session.status.label(), "quote session saved");
        Ok(())
    }

    pub fn get_session(&self, id: &SessionId) -> Result<Session, QuoteServiceError> {
        self.repository
            .get(id)?
            .ok_or_else(|| QuoteServiceError::NotFound(id.clone()))
    }

    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>, QuoteServiceError> {
        Ok(self
            .repository
            .list()?
            .iter()
            .map(Session::summary)
            .collect())
    }

    pub fn delete_session(&self, id: &SessionId) -> Result<(), QuoteServiceError> {
        if self.repository.delete(id)? {
            info!(session_id = %id, "quote session deleted");
            Ok(())
        } else {
            Err(QuoteServiceError::NotFound(id.clone()))
        }
    }

    /// Step list for the product; served from the cache while the session's step count
    /// still matches.
    pub fn get_adaptive_questionnaire(
        &self,
        product_type: ProductType,
        session: &Session,
    ) -> Arc<Vec<Step>> {
        self.questionnaire.steps_for(product_type, session.step_count)
    }

    /// Steps with dependencies applied to the stored answers.
    ///
    /// A stored step count that no longer matches the assembled list is corrected and written
    /// back; a failed write is logged and the view is still returned.
    pub fn render_questionnaire(&self, id: &SessionId) -> Result<QuestionnaireView, QuoteServiceError> {
        let mut session = self.get_session(id)?;
        let steps = self.get_adaptive_questionnaire(session.product_type, &session);
        if session.step_count != steps.len() {
            session.step_count = steps.len();
            if let Err(error) = self.repository.save(&session) {
                warn!(session_id = %session.id, %error, "refreshed step count not persisted");
            }
        }
        Ok(QuestionnaireView {
            session_id: session.id.clone(),
            product_type: session.product_type,
            current_step: session.current_step,
            step_count: steps.len(),
            steps: render(&steps, &session.answers),
        })
    }

    pub fn analyze_eligibility(&self, session: &Session) -> EligibilityAnalysis {
        self.scorer.analyze(&session.answers)
    }

    pub fn generate_ai_recommendations(&self, session: &Session) -> Vec<Recommendation> {
        let score = match &session.eligibility {
            Some(analysis) => analysis.score,
            None => self.analyze_eligibility(session).score,
        };
        generate_recommendations(session.product_type, &session.answers, score)
    }

    /// Merge a batch of answers, rescore, and persist.
    ///
    /// Invalid answers are reported per question and left out; the rest are stored. A failed
    /// write is logged and reported through `persisted` instead of failing the call.
    pub fn submit_answers(
        &self,
        id: &SessionId,
        batch: AnswerBatch,
    ) -> Result<AnswerOutcome, QuoteServiceError> {
        let mut session = self.get_session(id)?;
        ensure_open(&session)?;

        let previous_product = session.product_type;
        if let Some(product) = batch
            .answers
            .get("product_type")
            .and_then(|answer| answer.as_text())
            .and_then(ProductType::from_label)
        {
            session.product_type = product;
        }

        let steps = self
            .questionnaire
            .steps_for(session.product_type, session.step_count);

        let mut issues = Vec::new();
        for (question_id, answer) in batch.answers {
            if answer.is_blank() {
                session.answers.remove(&question_id);
                continue;
            }
            match find_question(&steps, &question_id).and_then(|q| validate_answer(q, &answer)) {
                Some(issue) => issues.push(issue),
                None => {
                    session.answers.insert(question_id, answer);
                }
            }
        }

        session.step_count = steps.len();
        session.current_step = session.current_step.min(steps.len().saturating_sub(1));

        if batch.advance {
            if let Some(step) = steps.get(session.current_step) {
                let rejected_here = issues
                    .iter()
                    .any(|issue| step.question(&issue.question_id).is_some());
                let step_issues = validate_step(step, &session.answers);
                if step_issues.is_empty() && !rejected_here {
                    session.current_step =
                        (session.current_step + 1).min(steps.len().saturating_sub(1));
                } else {
                    for issue in step_issues {
                        if !issues.iter().any(|known| known.question_id == issue.question_id) {
                            issues.push(issue);
                        }
                    }
                }
            }
        }

        if session.status == SessionStatus::Created {
            session.status = SessionStatus::InProgress;
        }
        session.eligibility = Some(self.analyze_eligibility(&session));
        session.recommendations = self.generate_ai_recommendations(&session);
        session.updated_at = Utc::now();

        if previous_product != session.product_type {
            info!(
                session_id = %session.id,
                from = previous_product.label(),
                to = session.product_type.label(),
                step_count = session.step_count,
                "quote product switched"
            );
        }

        let persisted = match self.repository.save(&session) {
            Ok(()) => {
                info!(
                    session_id = %session.id,
                    step = session.current_step,
                    issues = issues.len(),
                    score = session.eligibility.as_ref().map(|analysis| analysis.score),
                    "answers persisted"
                );
                true
            }
            Err(error) => {
                warn!(
                    session_id = %session.id,
                    %error,
                    "answer batch not persisted; last stored state remains authoritative"
                );
                false
            }
        };

        Ok(AnswerOutcome {
            session,
            issues,
            persisted,
        })
    }

    /// Close the session once every visible required question is answered and valid.
    pub fn complete(&self, id: &SessionId) -> Result<Session, QuoteServiceError> {
        let mut session = self.get_session(id)?;
        ensure_open(&session)?;

        let steps = self.get_adaptive_questionnaire(session.product_type, &session);
        let issues: Vec<ValidationIssue> = steps
            .iter()
            .flat_map(|step| validate_step(step, &session.answers))
            .collect();
        if !issues.is_empty() {
            return Err(QuoteServiceError::Incomplete {
                id: session.id,
                issues,
            });
        }

        session.status = SessionStatus::Completed;
        session.eligibility = Some(self.analyze_eligibility(&session));
        session.recommendations = self.generate_ai_recommendations(&session);
        session.updated_at = Utc::now();
        self.repository.save(&session)?;

        info!(
            session_id = %session.id,
            score = session.eligibility.as_ref().map(|analysis| analysis.score),
            "quote session completed"
        );
        Ok(session)
    }

    pub fn abandon(&self, id: &SessionId) -> Result<Session, QuoteServiceError> {
        let mut session = self.get_session(id)?;
        ensure_open(&session)?;

        session.status = SessionStatus::Abandoned;
        session.updated_at = Utc::now();
        self.repository.save(&session)?;

        info!(session_id = %session.id, step = session.current_step, "quote session abandoned");
        Ok(session)
    }
}

/// Error raised by the quote session service.
#[derive(Debug, thiserror::Error)]
pub enum QuoteServiceError {
    #[error("quote session {0} not found")]
    NotFound(SessionId),
    #[error("quote session {id} is {status} and no longer accepts changes")]
    Closed { id: SessionId, status: &'static str },
    #[error("quote session {id} has {} unanswered or invalid question(s)", .issues.len())]
    Incomplete {
        id: SessionId,
        issues: Vec<ValidationIssue>,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
