//! Adaptive questionnaire: pure step assembly, explicit caching, render-time visibility and
//! per-question validation.

mod blueprint;
mod validation;
mod visibility;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::debug;

use super::domain::{AnswerValue, Answers, ProductType};

pub use blueprint::assemble_steps;
pub use validation::{validate_answer, validate_step, ValidationIssue};
pub use visibility::{dependency_holds, question_state, QuestionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Number,
    Select,
    Radio,
    Checkbox,
    Date,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepGroup {
    Base,
    Product,
    Closing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Includes,
    Answered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExpectedValue {
    Bool(bool),
    Number(f64),
    Text(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyAction {
    Show,
    Hide,
    Require,
}

/// Visibility rule evaluated against another question's answer at render time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency {
    pub question_id: &'static str,
    pub comparison: Comparison,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ExpectedValue>,
    pub action: DependencyAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: QuestionKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub group: StepGroup,
    pub questions: Vec<Question>,
}

impl Step {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }
}

/// Finds a question anywhere in an assembled questionnaire.
pub fn find_question<'a>(steps: &'a [Step], id: &str) -> Option<&'a Question> {
    steps.iter().find_map(|step| step.question(id))
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub visible: bool,
    pub effective_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub group: StepGroup,
    pub questions: Vec<RenderedQuestion>,
}

/// Applies dependencies to the current answers. Hidden questions stay in the output so the
/// client can animate them in when they become visible.
pub fn render(steps: &[Step], answers: &Answers) -> Vec<RenderedStep> {
    steps
        .iter()
        .map(|step| RenderedStep {
            id: step.id,
            title: step.title,
            description: step.description,
            group: step.group,
            questions: step
                .questions
                .iter()
                .map(|question| {
                    let state = question_state(question, answers);
                    RenderedQuestion {
                        question: question.clone(),
                        visible: state.visible,
                        effective_required: state.required,
                        answer: answers.get(question.id).cloned(),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Assembled step lists keyed by `(product_type, step_count)`.
///
/// A session carrying the step count it last saw hits the cache until either its product
/// changes or the assembled count differs. A miss stores the list under both the assembled
/// count and the count it was looked up with, so a caller holding a stale count triggers one
/// assembly rather than one per call. Invalidation is explicit.
#[derive(Debug, Default)]
pub struct QuestionnaireCache {
    entries: Mutex<HashMap<(ProductType, usize), Arc<Vec<Step>>>>,
    assemblies: AtomicUsize,
}

impl QuestionnaireCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps_for(&self, product: ProductType, cached_step_count: usize) -> Arc<Vec<Step>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(steps) = entries.get(&(product, cached_step_count)) {
            return Arc::clone(steps);
        }

        let steps = Arc::new(assemble_steps(product));
        self.assemblies.fetch_add(1, Ordering::Relaxed);
        debug!(
            product = product.label(),
            previous_step_count = cached_step_count,
            step_count = steps.len(),
            "questionnaire assembled"
        );
        entries.insert((product, steps.len()), Arc::clone(&steps));
        entries.insert((product, cached_step_count), Arc::clone(&steps));
        steps
    }

    pub fn invalidate(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn invalidate_product(&self, product: ProductType) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(cached, _), _| *cached != product);
    }

    /// Number of times a step list was actually assembled.
    pub fn assemblies(&self) -> usize {
        self.assemblies.load(Ordering::Relaxed)
    }
}
