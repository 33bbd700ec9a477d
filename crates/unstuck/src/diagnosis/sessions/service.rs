use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::repository::{
    CopyNotice, PromptSink, SessionId, SessionRecord, SessionStore, StoreError,
};
use super::views::SessionView;
use crate::diagnosis::policy::DiagnosisPolicy;
use crate::diagnosis::registry::Registry;
use crate::diagnosis::report::DiagnosisReport;
use crate::diagnosis::session::{Session, SessionAction, SessionError, SessionStep};

/// Service composing the registry, the session store, and the prompt sink.
pub struct DiagnosisService<S, P> {
    registry: Arc<Registry>,
    store: Arc<S>,
    sink: Arc<P>,
    policy: DiagnosisPolicy,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("ses-{id:06}"))
}

impl<S, P> DiagnosisService<S, P>
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    pub fn new(
        registry: Arc<Registry>,
        store: Arc<S>,
        sink: Arc<P>,
        policy: DiagnosisPolicy,
    ) -> Self {
        Self {
            registry,
            store,
            sink,
            policy,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn policy(&self) -> &DiagnosisPolicy {
        &self.policy
    }

    /// Open a fresh session in the intro step.
    pub fn start(&self) -> Result<SessionRecord, DiagnosisServiceError> {
        let now = Utc::now();
        let record = SessionRecord {
            id: next_session_id(),
            started_at: now,
            updated_at: now,
            session: Session::new(self.policy),
        };

        let stored = self.store.insert(record)?;
        info!(session_id = %stored.id, "diagnosis session started");
        Ok(stored)
    }

    /// Apply one user action and persist the successor session. Actions on one
    /// session are serialized by the store, so concurrent answers are never lost.
    pub fn apply(
        &self,
        session_id: &SessionId,
        action: SessionAction,
    ) -> Result<SessionRecord, DiagnosisServiceError> {
        let mut previous = SessionStep::Intro;

        let record = self.store.modify(session_id, |current| {
            previous = current.session.step();
            let next = current
                .session
                .advance(&self.registry, action)
                .inspect_err(|err| debug!(session_id = %session_id, error = %err, "action rejected"))?;

            Ok::<_, DiagnosisServiceError>(SessionRecord {
                session: next,
                updated_at: Utc::now(),
                ..current.clone()
            })
        })?;

        let next = &record.session;
        let step = next.step();
        if matches!(step, SessionStep::SupplementaryQuestions { index: 0 })
            && !matches!(previous, SessionStep::SupplementaryQuestions { .. })
        {
            info!(
                session_id = %session_id,
                confidence = next.confidence(),
                questions = ?next.supplementary_ids(),
                "confidence below threshold, asking supplementary questions"
            );
        }
        if step == SessionStep::Result && previous != SessionStep::Result {
            let ranking = next.ranking();
            info!(
                session_id = %session_id,
                primary = %ranking.primary().category,
                secondary = %ranking.secondary().category,
                confidence = ranking.confidence(),
                "diagnosis complete"
            );
        }
        debug!(
            session_id = %session_id,
            action = action.name(),
            from = previous.name(),
            to = step.name(),
            "session advanced"
        );

        Ok(record)
    }

    /// Fetch a session for API responses.
    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, DiagnosisServiceError> {
        let record = self
            .store
            .fetch(session_id)?
            .ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    pub fn view(&self, record: &SessionRecord) -> SessionView {
        SessionView::from_record(record, &self.registry)
    }

    pub fn report(&self, session_id: &SessionId) -> Result<DiagnosisReport, DiagnosisServiceError> {
        let record = self.get(session_id)?;
        Ok(record.session.report(&self.registry)?)
    }

    /// Hand the finished session's prompt to the sink. A sink failure is
    /// reported in the notice and leaves the session as it was.
    pub fn copy_prompt(&self, session_id: &SessionId) -> Result<CopyNotice, DiagnosisServiceError> {
        let report = self.report(session_id)?;

        match self.sink.copy(&report.prompt) {
            Ok(()) => Ok(CopyNotice {
                copied: true,
                message: "Prompt copied.".to_string(),
            }),
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "prompt copy failed");
                Ok(CopyNotice {
                    copied: false,
                    message: format!(
                        "Could not copy the prompt ({err}). Check clipboard permissions or copy it manually."
                    ),
                })
            }
        }
    }

    /// Drop a session the user navigated away from.
    pub fn discard(&self, session_id: &SessionId) -> Result<(), DiagnosisServiceError> {
        self.store.remove(session_id)?;
        info!(session_id = %session_id, "diagnosis session discarded");
        Ok(())
    }
}

/// Error raised by the diagnosis service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
