use std::collections::BTreeMap;
use std::sync::RwLock;

use super::domain::{Session, SessionId};

/// Storage abstraction for quote sessions. Implementations must leave the previous record
/// readable when a write fails.
pub trait SessionRepository: Send + Sync {
    fn get(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;
    fn list(&self) -> Result<Vec<Session>, RepositoryError>;
    fn save(&self, session: &Session) -> Result<(), RepositoryError>;
    /// Returns whether a record was removed.
    fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
    #[error("session record could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// In-memory store holding each session as its serialized JSON record, so reads go through
/// the same encoding a durable backend would use.
#[derive(Debug, Default)]
pub struct JsonSessionStore {
    records: RwLock<BTreeMap<SessionId, serde_json::Value>>,
}

impl JsonSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored record, mainly for inspection in tests.
    pub fn record(&self, id: &SessionId) -> Option<serde_json::Value> {
        self.records.read().ok()?.get(id).cloned()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("session store lock poisoned".to_string())
}

impl SessionRepository for JsonSessionStore {
    fn get(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        records
            .get(id)
            .map(|record| serde_json::from_value(record.clone()).map_err(RepositoryError::from))
            .transpose()
    }

    fn list(&self) -> Result<Vec<Session>, RepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        records
            .values()
            .map(|record| serde_json::from_value(record.clone()).map_err(RepositoryError::from))
            .collect()
    }

    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let record = serde_json::to_value(session)?;
        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(session.id.clone(), record);
        Ok(())
    }

    fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records.remove(id).is_some())
    }
}
