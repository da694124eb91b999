use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::super::domain::{AnswerValue, Answers};
use super::visibility::question_state;
use super::{Question, QuestionKind, Step};

/// User-visible problem with one answer. Never blocks other questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub question_id: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(question: &Question, message: impl Into<String>) -> Self {
        Self {
            question_id: question.id.to_string(),
            message: message.into(),
        }
    }
}

fn custom_or(question: &Question, fallback: String) -> String {
    question
        .validation
        .as_ref()
        .and_then(|validation| validation.message)
        .map(str::to_string)
        .unwrap_or(fallback)
}

fn check_bounds(question: &Question, value: f64) -> Option<String> {
    let validation = question.validation.as_ref()?;
    if let Some(min) = validation.min.filter(|min| value < *min) {
        return Some(custom_or(question, format!("must be at least {min}")));
    }
    if let Some(max) = validation.max.filter(|max| value > *max) {
        return Some(custom_or(question, format!("must be at most {max}")));
    }
    None
}

fn check_pattern(question: &Question, text: &str) -> Option<String> {
    let pattern = question.validation.as_ref()?.pattern?;
    match Regex::new(pattern) {
        Ok(regex) if regex.is_match(text) => None,
        Ok(_) => Some(custom_or(question, "has an invalid format".to_string())),
        Err(error) => {
            warn!(question = question.id, %error, "skipping unparseable validation pattern");
            None
        }
    }
}

fn is_option(question: &Question, key: &str) -> bool {
    question.options.iter().any(|option| option.value == key)
}

/// Value-level checks for one answer: type, bounds, pattern, options, dates.
pub fn validate_answer(question: &Question, answer: &AnswerValue) -> Option<ValidationIssue> {
    let problem = match question.kind {
        QuestionKind::Number | QuestionKind::Range => match answer.as_number() {
            Some(value) if value.is_finite() => check_bounds(question, value),
            _ => Some("must be a number".to_string()),
        },
        QuestionKind::Text => match answer {
            AnswerValue::Text(text) => check_pattern(question, text.trim()),
            AnswerValue::Number(_) => None,
            _ => Some("must be text".to_string()),
        },
        QuestionKind::Select | QuestionKind::Radio => match answer.option_key() {
            Some(key) if is_option(question, &key) => None,
            Some(key) => Some(format!("'{key}' is not one of the offered options")),
            None => Some("must be a single option".to_string()),
        },
        QuestionKind::Checkbox => match answer {
            AnswerValue::List(items) => items
                .iter()
                .find(|item| !is_option(question, item))
                .map(|item| format!("'{item}' is not one of the offered options")),
            _ => Some("must be a list of options".to_string()),
        },
        QuestionKind::Date => match answer.as_text() {
            Some(text) if NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").is_ok() => None,
            _ => Some("must be a date formatted YYYY-MM-DD".to_string()),
        },
    };

    problem.map(|message| ValidationIssue::new(question, message))
}

/// Validates the visible questions of one step; missing required answers are reported
/// alongside value-level problems.
pub fn validate_step(step: &Step, answers: &Answers) -> Vec<ValidationIssue> {
    step.questions
        .iter()
        .filter_map(|question| {
            let state = question_state(question, answers);
            if !state.visible {
                return None;
            }
            match answers.get(question.id).filter(|answer| !answer.is_blank()) {
                Some(answer) => validate_answer(question, answer),
                None if state.required => {
                    Some(ValidationIssue::new(question, "this question is required"))
                }
                None => None,
            }
        })
        .collect()
}
