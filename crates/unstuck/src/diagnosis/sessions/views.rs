use chrono::{DateTime, Utc};
use serde::Serialize;

use super::repository::{SessionId, SessionRecord};
use crate::diagnosis::domain::{Category, TimeBucket, Trouble};
use crate::diagnosis::registry::{Question, Registry};
use crate::diagnosis::report::CategorySummary;
use crate::diagnosis::scoring::{confidence_pct, ScoreState};
use crate::diagnosis::session::{Progress, SessionStep};

/// API snapshot of a session, including the interim leader readout.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    #[serde(flatten)]
    pub step: SessionStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trouble: Option<Trouble>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_bucket: Option<TimeBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    pub scores: ScoreState,
    pub confidence: f64,
    pub confidence_pct: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading: Option<CategorySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner_up: Option<CategorySummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub supplementary: Vec<&'static str>,
}

impl SessionView {
    pub fn from_record(record: &SessionRecord, registry: &Registry) -> Self {
        let session = &record.session;
        let ranking = session.ranking();
        let confidence = ranking.confidence();

        let readout = matches!(
            session.step(),
            SessionStep::CoreQuestions { .. }
                | SessionStep::SupplementaryQuestions { .. }
                | SessionStep::Result
        );
        let summary = |category: Category, score: u32| CategorySummary {
            category,
            name: registry.profile(category).name,
            score,
        };
        let (leading, runner_up) = if readout {
            (
                Some(summary(ranking.primary().category, ranking.primary().score)),
                Some(summary(ranking.secondary().category, ranking.secondary().score)),
            )
        } else {
            (None, None)
        };

        Self {
            session_id: record.id.clone(),
            started_at: record.started_at,
            step: session.step(),
            trouble: session.trouble(),
            time_bucket: session.time_bucket(),
            progress: session.progress(registry),
            question: session.current_question(registry).cloned(),
            scores: *session.scores(),
            confidence,
            confidence_pct: confidence_pct(confidence),
            leading,
            runner_up,
            supplementary: session.supplementary_ids().to_vec(),
        }
    }
}
