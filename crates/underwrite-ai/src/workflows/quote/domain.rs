use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::eligibility::EligibilityAnalysis;
use super::recommendations::Recommendation;

/// Stable session identifier used as the Session Store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Auto,
    Home,
    Health,
    Life,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Auto,
        ProductType::Home,
        ProductType::Health,
        ProductType::Life,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ProductType::Auto => "auto",
            ProductType::Home => "home",
            ProductType::Health => "health",
            ProductType::Life => "life",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|product| product.label().eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Created,
    InProgress,
    Completed,
    Abandoned,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SessionStatus::Created => "created",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Abandoned => "abandoned",
        }
    }

    /// Completed and abandoned sessions no longer accept answers.
    pub const fn is_open(self) -> bool {
        matches!(self, SessionStatus::Created | SessionStatus::InProgress)
    }
}

/// Self-describing answer value as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    /// Numbers, or text that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(value) => Some(*value),
            AnswerValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Booleans, or the `yes`/`no` option values used by radio questions.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(value) => Some(*value),
            AnswerValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" => Some(true),
                "no" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Key compared against a question's option values.
    pub fn option_key(&self) -> Option<String> {
        match self {
            AnswerValue::Text(text) => Some(text.trim().to_string()),
            AnswerValue::Bool(true) => Some("yes".to_string()),
            AnswerValue::Bool(false) => Some("no".to_string()),
            AnswerValue::Number(value) => Some(value.to_string()),
            AnswerValue::List(_) => None,
        }
    }

    pub fn items(&self) -> &[String] {
        match self {
            AnswerValue::List(items) => items,
            _ => &[],
        }
    }

    /// Blank answers clear a previously stored value.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

pub type Answers = BTreeMap<String, AnswerValue>;

/// Mutable aggregate tying answers, questionnaire position, and derived scoring together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    #[serde(default)]
    pub subject_id: Option<String>,
    pub product_type: ProductType,
    pub status: SessionStatus,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub current_step: usize,
    /// Step count of the questionnaire last assembled for this session.
    #[serde(default)]
    pub step_count: usize,
    #[serde(default)]
    pub eligibility: Option<EligibilityAnalysis>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, subject_id: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            subject_id,
            product_type: ProductType::default(),
            status: SessionStatus::Created,
            answers: Answers::new(),
            current_step: 0,
            step_count: 0,
            eligibility: None,
            recommendations: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Compact listing view.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            product_type: self.product_type,
            status: self.status.label(),
            current_step: self.current_step,
            step_count: self.step_count,
            eligibility_score: self.eligibility.as_ref().map(|analysis| analysis.score),
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub product_type: ProductType,
    pub status: &'static str,
    pub current_step: usize,
    pub step_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility_score: Option<u8>,
    pub updated_at: DateTime<Utc>,
}
