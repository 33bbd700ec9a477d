//! Stuck-pattern diagnosis: weighted two-choice questionnaire, adaptive
//! follow-up questions and the rendered action report.

pub mod domain;
mod policy;
pub mod registry;
pub mod report;
pub mod scoring;
pub mod selector;
pub mod session;
pub mod sessions;

#[cfg(test)]
mod tests;

pub use domain::{Category, Choice, TimeBucket, Trouble, UnknownOption, WeightVector};
pub use policy::DiagnosisPolicy;
pub use registry::{AnswerOption, CategoryProfile, Question, Registry, RegistryError};
pub use report::DiagnosisReport;
pub use scoring::{confidence_pct, RankedCategory, Ranking, ScoreState};
pub use selector::select_supplementary;
pub use session::{
    AnswerRecord, Progress, QuestionPhase, Session, SessionAction, SessionError, SessionStep,
};
pub use sessions::{
    diagnosis_router, CopyError, CopyNotice, DiagnosisService, DiagnosisServiceError, PromptSink,
    SessionId, SessionRecord, SessionStore, SessionView, StoreError,
};
