use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use underwrite_ai::workflows::quote::{
    JsonSessionStore, RepositoryError, Session, SessionId, SessionRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Durable store keeping one `<session id>.json` file per session.
///
/// Writes go to a sibling temp file that is renamed over the record, so an interrupted
/// write leaves the previous version in place.
#[derive(Debug, Clone)]
pub(crate) struct FileSessionStore {
    dir: PathBuf,
}

const RECORD_EXTENSION: &str = "json";

fn io_unavailable(action: &str, path: &Path, err: io::Error) -> RepositoryError {
    RepositoryError::Unavailable(format!("failed to {action} {}: {err}", path.display()))
}

/// Ids become file names, so only a conservative character set is accepted.
fn is_safe_id(id: &SessionId) -> bool {
    !id.0.is_empty()
        && id
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FileSessionStore {
    pub(crate) fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn record_path(&self, id: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.{RECORD_EXTENSION}", id.0))
    }

    fn read_record(path: &Path) -> Result<Session, RepositoryError> {
        let bytes = fs::read(path).map_err(|err| io_unavailable("read", path, err))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl SessionRepository for FileSessionStore {
    fn get(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        if !is_safe_id(id) {
            return Ok(None);
        }
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_record(&path).map(Some)
    }

    fn list(&self) -> Result<Vec<Session>, RepositoryError> {
        let entries =
            fs::read_dir(&self.dir).map_err(|err| io_unavailable("list", &self.dir, err))?;

        let mut sessions = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|err| io_unavailable("list", &self.dir, err))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION) {
                sessions.push(Self::read_record(&path)?);
            }
        }
        sessions.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(sessions)
    }

    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        if !is_safe_id(&session.id) {
            return Err(RepositoryError::Unavailable(format!(
                "session id '{}' cannot be stored as a file name",
                session.id
            )));
        }

        let encoded = serde_json::to_vec_pretty(session)?;
        let path = self.record_path(&session.id);
        let staging = path.with_extension("json.tmp");

        let mut file =
            fs::File::create(&staging).map_err(|err| io_unavailable("create", &staging, err))?;
        let written = file
            .write_all(&encoded)
            .and_then(|()| file.sync_all())
            .map_err(|err| io_unavailable("write", &staging, err))
            .and_then(|()| {
                fs::rename(&staging, &path).map_err(|err| io_unavailable("replace", &path, err))
            });
        drop(file);
        if written.is_err() {
            let _ = fs::remove_file(&staging);
        }
        written
    }

    fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        if !is_safe_id(id) {
            return Ok(false);
        }
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_unavailable("delete", &path, err)),
        }
    }
}

/// Session Store chosen at startup from `SESSION_STORE_DIR`.
pub(crate) enum SessionBackend {
    Memory(JsonSessionStore),
    Files(FileSessionStore),
}

impl SessionBackend {
    pub(crate) fn from_dir(dir: Option<&Path>) -> io::Result<Self> {
        match dir {
            Some(dir) => FileSessionStore::open(dir).map(Self::Files),
            None => Ok(Self::Memory(JsonSessionStore::new())),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            SessionBackend::Memory(_) => "memory",
            SessionBackend::Files(_) => "files",
        }
    }

    fn store(&self) -> &dyn SessionRepository {
        match self {
            SessionBackend::Memory(store) => store,
            SessionBackend::Files(store) => store,
        }
    }
}

impl SessionRepository for SessionBackend {
    fn get(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        self.store().get(id)
    }

    fn list(&self) -> Result<Vec<Session>, RepositoryError> {
        self.store().list()
    }

    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        self.store().save(session)
    }

    fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        self.store().delete(id)
    }
}
