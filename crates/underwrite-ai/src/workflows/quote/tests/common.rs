use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::quote::domain::{AnswerValue, Answers, Session, SessionId};
use crate::workflows::quote::repository::{JsonSessionStore, RepositoryError, SessionRepository};
use crate::workflows::quote::service::{AnswerBatch, QuoteSessionService};
use crate::workflows::quote::EligibilityConfig;

/// Store whose reads or writes can be switched off to simulate a storage outage.
#[derive(Default)]
pub(super) struct FlakyStore {
    inner: JsonSessionStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub(super) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(super) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("store offline".to_string()));
        }
        Ok(())
    }
}

impl SessionRepository for FlakyStore {
    fn get(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        self.check_reads()?;
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<Session>, RepositoryError> {
        self.check_reads()?;
        self.inner.list()
    }

    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("disk full".to_string()));
        }
        self.inner.save(session)
    }

    fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        self.inner.delete(id)
    }
}

pub(super) fn build_service() -> (Arc<QuoteSessionService<JsonSessionStore>>, Arc<JsonSessionStore>) {
    let store = Arc::new(JsonSessionStore::new());
    let service = Arc::new(QuoteSessionService::new(
        store.clone(),
        EligibilityConfig::default(),
    ));
    (service, store)
}

pub(super) fn build_flaky_service() -> (Arc<QuoteSessionService<FlakyStore>>, Arc<FlakyStore>) {
    let store = Arc::new(FlakyStore::default());
    let service = Arc::new(QuoteSessionService::new(
        store.clone(),
        EligibilityConfig::default(),
    ));
    (service, store)
}

pub(super) fn text(value: &str) -> AnswerValue {
    AnswerValue::text(value)
}

pub(super) fn number(value: f64) -> AnswerValue {
    AnswerValue::Number(value)
}

pub(super) fn list(items: &[&str]) -> AnswerValue {
    AnswerValue::List(items.iter().map(|item| item.to_string()).collect())
}

pub(super) fn answers(pairs: &[(&str, AnswerValue)]) -> Answers {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect()
}

pub(super) fn batch(pairs: &[(&str, AnswerValue)], advance: bool) -> AnswerBatch {
    AnswerBatch {
        answers: answers(pairs),
        advance,
    }
}

/// Every required auto question answered with a low-risk profile.
pub(super) fn complete_auto_answers() -> Vec<(&'static str, AnswerValue)> {
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
        ("monthly_budget", number(120.0)),
        ("payment_frequency", text("monthly")),
        ("vehicle_type", text("car")),
        ("vehicle_count", number(1.0)),
        ("annual_mileage", number(12_000.0)),
        ("driver_age", number(38.0)),
        ("years_licensed", number(20.0)),
        ("bonus_malus", number(0.68)),
        ("claims_last_5_years", number(0.0)),
        ("continuous_coverage_months", number(48.0)),
        ("previous_insurer_cancelled", text("no")),
        ("contact_preference", text("email")),
        ("consent", list(&["data_processing"])),
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 512 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
