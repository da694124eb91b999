use serde::Serialize;

use super::super::domain::{AnswerValue, Answers};
use super::{Comparison, Dependency, DependencyAction, ExpectedValue, Question};

/// Effective render state of one question for the current answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionState {
    pub visible: bool,
    pub required: bool,
}

fn matches_expected(answer: &AnswerValue, expected: ExpectedValue) -> bool {
    match expected {
        ExpectedValue::Bool(flag) => answer.as_bool() == Some(flag),
        ExpectedValue::Number(number) => answer
            .as_number()
            .is_some_and(|value| (value - number).abs() < f64::EPSILON),
        ExpectedValue::Text(text) => answer
            .option_key()
            .is_some_and(|key| key.eq_ignore_ascii_case(text)),
    }
}

/// A dependency on an unanswered question never holds, except `not_equals`.
pub fn dependency_holds(dependency: &Dependency, answers: &Answers) -> bool {
    let answer = answers
        .get(dependency.question_id)
        .filter(|answer| !answer.is_blank());

    match (dependency.comparison, answer, dependency.value) {
        (Comparison::Answered, answer, _) => answer.is_some(),
        (Comparison::NotEquals, None, _) => true,
        (_, None, _) | (_, _, None) => false,
        (Comparison::Equals, Some(answer), Some(expected)) => matches_expected(answer, expected),
        (Comparison::NotEquals, Some(answer), Some(expected)) => {
            !matches_expected(answer, expected)
        }
        (Comparison::GreaterThan, Some(answer), Some(ExpectedValue::Number(bound))) => {
            answer.as_number().is_some_and(|value| value > bound)
        }
        (Comparison::LessThan, Some(answer), Some(ExpectedValue::Number(bound))) => {
            answer.as_number().is_some_and(|value| value < bound)
        }
        (Comparison::Includes, Some(answer), Some(ExpectedValue::Text(item))) => answer
            .items()
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(item)),
        _ => false,
    }
}

/// `show` dependencies must all hold, any holding `hide` wins, any holding `require` makes
/// the question mandatory. Hidden questions are never required.
pub fn question_state(question: &Question, answers: &Answers) -> QuestionState {
    let mut shown = true;
    let mut hidden = false;
    let mut required = question.required;

    for dependency in &question.dependencies {
        let holds = dependency_holds(dependency, answers);
        match dependency.action {
            DependencyAction::Show => shown &= holds,
            DependencyAction::Hide => hidden |= holds,
            DependencyAction::Require => required |= holds,
        }
    }

    let visible = shown && !hidden;
    QuestionState {
        visible,
        required: visible && required,
    }
}
