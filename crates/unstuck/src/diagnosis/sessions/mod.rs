//! Session lifecycle facade: storage, prompt copy, and HTTP routing.

pub mod repository;
pub mod router;
pub mod service;
pub mod views;

pub use repository::{
    CopyError, CopyNotice, PromptSink, SessionId, SessionRecord, SessionStore, StoreError,
};
pub use router::diagnosis_router;
pub use service::{DiagnosisService, DiagnosisServiceError};
pub use views::SessionView;
