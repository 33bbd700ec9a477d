use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::diagnosis::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored session plus bookkeeping timestamps. Lives only as long as the process.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub session: Session,
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError>;
    fn remove(&self, id: &SessionId) -> Result<(), StoreError>;

    /// Replaces the stored record with `change(current)` as one step: no other
    /// call for the same session may observe or write in between. When `change`
    /// fails nothing is written.
    fn modify<F, E>(&self, id: &SessionId, change: F) -> Result<SessionRecord, E>
    where
        F: FnOnce(&SessionRecord) -> Result<SessionRecord, E>,
        E: From<StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the copy-prompt action (system clipboard, file, ...).
pub trait PromptSink: Send + Sync {
    fn copy(&self, prompt: &str) -> Result<(), CopyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("clipboard write failed: {0}")]
    ClipboardWrite(String),
}

/// User-facing outcome of a copy request. A failed copy never fails the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyNotice {
    pub copied: bool,
    pub message: String,
}
