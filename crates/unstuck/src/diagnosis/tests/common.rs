use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::diagnosis::domain::{Choice, TimeBucket, Trouble};
use crate::diagnosis::registry::Registry;
use crate::diagnosis::session::{Session, SessionAction};
use crate::diagnosis::sessions::{
    CopyError, DiagnosisService, PromptSink, SessionId, SessionRecord, SessionStore, StoreError,
};
use crate::diagnosis::DiagnosisPolicy;

pub(super) fn registry() -> Registry {
    Registry::standard().expect("standard registry compiles")
}

/// Parses a string such as `"BBAB"` into answers.
pub(super) fn choices(script: &str) -> Vec<Choice> {
    script
        .chars()
        .map(|letter| Choice::try_from(letter).expect("script uses A/B only"))
        .collect()
}

/// Walks a fresh session through the context questions and the given answers.
pub(super) fn run_script(
    registry: &Registry,
    trouble: Trouble,
    time: TimeBucket,
    answers: &str,
) -> Session {
    let mut session = Session::default();
    let mut actions = vec![
        SessionAction::Start,
        SessionAction::SelectTrouble { trouble },
        SessionAction::SelectTime { time },
    ];
    actions.extend(
        choices(answers)
            .into_iter()
            .map(|choice| SessionAction::Answer { choice }),
    );

    for action in actions {
        session = session
            .advance(registry, action)
            .unwrap_or_else(|err| panic!("{action:?} accepted: {err}"));
    }
    session
}

pub(super) fn build_service() -> (
    DiagnosisService<MemoryStore, MemorySink>,
    Arc<MemoryStore>,
    Arc<MemorySink>,
) {
    let store = Arc::new(MemoryStore::default());
    let sink = Arc::new(MemorySink::default());
    let service = DiagnosisService::new(
        Arc::new(registry()),
        store.clone(),
        sink.clone(),
        DiagnosisPolicy::default(),
    );
    (service, store, sink)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
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
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let current = guard.get(id).ok_or(StoreError::NotFound)?;
        let next = change(current)?;
        guard.insert(id.clone(), next.clone());
        Ok(next)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn modify<F, E>(&self, _id: &SessionId, _change: F) -> Result<SessionRecord, E>
    where
        F: FnOnce(&SessionRecord) -> Result<SessionRecord, E>,
        E: From<StoreError>,
    {
        Err(StoreError::Unavailable("store offline".to_string()).into())
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    copied: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub(super) fn copied(&self) -> Vec<String> {
        self.copied.lock().expect("sink mutex poisoned").clone()
    }
}

impl PromptSink for MemorySink {
    fn copy(&self, prompt: &str) -> Result<(), CopyError> {
        self.copied
            .lock()
            .expect("sink mutex poisoned")
            .push(prompt.to_string());
        Ok(())
    }
}

pub(super) struct DeniedSink;

impl PromptSink for DeniedSink {
    fn copy(&self, _prompt: &str) -> Result<(), CopyError> {
        Err(CopyError::ClipboardWrite("permission denied".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
