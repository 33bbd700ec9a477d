use chrono::{Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use unstuck::diagnosis::{
    CopyError, PromptSink, SessionId, SessionRecord, SessionStore, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session storage; everything is lost on restart.
///
/// Sessions untouched for longer than `idle_ttl` are dropped the next time a
/// session is created.
#[derive(Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
    idle_ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_idle_ttl(Duration::minutes(30))
    }
}

impl InMemorySessionStore {
    pub(crate) fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            records: Arc::default(),
            idle_ttl,
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, SessionRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("session store mutex poisoned".to_string()))
    }
}

#[cfg(test)]
impl InMemorySessionStore {
    pub(crate) fn is_empty(&self) -> bool {
        self.records.lock().map(|guard| guard.is_empty()).unwrap_or(false)
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.lock()?;
        let now = Utc::now();
        let before = guard.len();
        guard.retain(|_, existing| now - existing.updated_at <= self.idle_ttl);
        let evicted = before - guard.len();
        if evicted > 0 {
            tracing::debug!(evicted, "dropped idle sessions");
        }

        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn modify<F, E>(&self, id: &SessionId, change: F) -> Result<SessionRecord, E>
    where
        F: FnOnce(&SessionRecord) -> Result<SessionRecord, E>,
        E: From<StoreError>,
    {
        let mut guard = self.lock()?;
        let current = guard.get(id).ok_or(StoreError::NotFound)?;
        let next = change(current)?;
        guard.insert(id.clone(), next.clone());
        Ok(next)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

/// Server-side stand-in for a clipboard: keeps the most recent prompt.
#[derive(Default, Clone)]
pub(crate) struct PromptBuffer {
    latest: Arc<Mutex<Option<String>>>,
}

impl PromptBuffer {
    #[cfg(test)]
    pub(crate) fn latest(&self) -> Option<String> {
        self.latest.lock().ok().and_then(|guard| guard.clone())
    }
}

impl PromptSink for PromptBuffer {
    fn copy(&self, prompt: &str) -> Result<(), CopyError> {
        let mut guard = self
            .latest
            .lock()
            .map_err(|_| CopyError::ClipboardWrite("prompt buffer poisoned".to_string()))?;
        *guard = Some(prompt.to_string());
        Ok(())
    }
}

/// Writes the prompt to a file, for terminals without clipboard access.
#[derive(Debug, Clone)]
pub(crate) struct FilePromptSink {
    path: PathBuf,
}

impl FilePromptSink {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PromptSink for FilePromptSink {
    fn copy(&self, prompt: &str) -> Result<(), CopyError> {
        fs::write(&self.path, prompt).map_err(|err| {
            CopyError::ClipboardWrite(format!("{}: {err}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unstuck::diagnosis::Session;

    fn record(id: &str) -> SessionRecord {
        let now = Utc::now();
        SessionRecord {
            id: SessionId(id.to_string()),
            started_at: now,
            updated_at: now,
            session: Session::default(),
        }
    }

    #[test]
    fn store_rejects_duplicates_and_unknown_updates() {
        let store = InMemorySessionStore::default();
        store.insert(record("ses-1")).expect("insert");

        assert!(matches!(
            store.insert(record("ses-1")),
            Err(StoreError::Conflict)
        ));
        let missing = store.modify(&SessionId("ses-2".to_string()), |current| {
            Ok::<_, StoreError>(current.clone())
        });
        assert!(matches!(missing, Err(StoreError::NotFound)));
        store.remove(&SessionId("ses-1".to_string())).expect("remove");
        assert!(store
            .fetch(&SessionId("ses-1".to_string()))
            .expect("fetch")
            .is_none());
    }

    #[test]
    fn modify_leaves_record_untouched_when_change_fails() {
        let store = InMemorySessionStore::default();
        let original = store.insert(record("ses-1")).expect("insert");
        let id = original.id.clone();

        let failed = store.modify(&id, |_| Err::<SessionRecord, _>(StoreError::Conflict));
        assert!(matches!(failed, Err(StoreError::Conflict)));

        let stored = store.fetch(&id).expect("fetch").expect("still present");
        assert_eq!(stored.updated_at, original.updated_at);
    }

    #[test]
    fn idle_sessions_are_evicted_on_next_insert() {
        let store = InMemorySessionStore::with_idle_ttl(Duration::minutes(30));
        let mut stale = record("ses-old");
        stale.updated_at = Utc::now() - Duration::hours(2);
        store.insert(stale).expect("insert stale");
        store.insert(record("ses-recent")).expect("insert recent");

        store.insert(record("ses-new")).expect("insert new");

        assert!(store
            .fetch(&SessionId("ses-old".to_string()))
            .expect("fetch")
            .is_none());
        assert!(store
            .fetch(&SessionId("ses-recent".to_string()))
            .expect("fetch")
            .is_some());
    }

    #[test]
    fn prompt_buffer_keeps_latest_prompt() {
        let buffer = PromptBuffer::default();
        buffer.copy("first").expect("copy");
        buffer.copy("second").expect("copy");
        assert_eq!(buffer.latest().as_deref(), Some("second"));
    }

    #[test]
    fn file_sink_reports_unwritable_targets() {
        let sink = FilePromptSink::new(PathBuf::from("/nonexistent-dir/prompt.txt"));
        let err = sink.copy("prompt").expect_err("cannot write");
        assert!(err.to_string().contains("/nonexistent-dir/prompt.txt"));
    }

    #[test]
    fn file_sink_writes_prompt() {
        let path = std::env::temp_dir().join(format!("unstuck-prompt-{}.txt", std::process::id()));
        let sink = FilePromptSink::new(path.clone());
        sink.copy("copy me").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "copy me");
        let _ = fs::remove_file(path);
    }
}
