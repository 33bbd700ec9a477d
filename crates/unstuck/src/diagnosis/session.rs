//! Questionnaire state machine.
//!
//! A [`Session`] is a plain value: every transition goes through
//! [`Session::advance`], which returns the successor and leaves the receiver
//! untouched. Scores, ranking and confidence are always derived from the
//! accumulated [`ScoreState`] on demand.

use super::domain::{Choice, TimeBucket, Trouble};
use super::policy::DiagnosisPolicy;
use super::registry::{Question, Registry};
use super::report::DiagnosisReport;
use super::scoring::{Ranking, ScoreState};
use super::selector::select_supplementary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SessionStep {
    Intro,
    ContextTrouble,
    ContextTime,
    CoreQuestions { index: usize },
    SupplementaryQuestions { index: usize },
    Result,
}

impl SessionStep {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::ContextTrouble => "context_trouble",
            Self::ContextTime => "context_time",
            Self::CoreQuestions { .. } => "core_questions",
            Self::SupplementaryQuestions { .. } => "supplementary_questions",
            Self::Result => "result",
        }
    }
}

/// Discrete user input accepted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    Start,
    SelectTrouble { trouble: Trouble },
    SelectTime { time: TimeBucket },
    Answer { choice: Choice },
    Reset,
}

impl SessionAction {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::SelectTrouble { .. } => "select_trouble",
            Self::SelectTime { .. } => "select_time",
            Self::Answer { .. } => "answer",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionPhase {
    Core,
    Supplementary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question_id: &'static str,
    pub phase: QuestionPhase,
    pub choice: Choice,
}

/// One-based position within the active question phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub phase: QuestionPhase,
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    policy: DiagnosisPolicy,
    step: SessionStep,
    scores: ScoreState,
    trouble: Option<Trouble>,
    time_bucket: Option<TimeBucket>,
    answers: Vec<AnswerRecord>,
    supplementary: Vec<&'static str>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DiagnosisPolicy::default())
    }
}

impl Session {
    pub fn new(policy: DiagnosisPolicy) -> Self {
        Self {
            policy,
            step: SessionStep::Intro,
            scores: ScoreState::zero(),
            trouble: None,
            time_bucket: None,
            answers: Vec::new(),
            supplementary: Vec::new(),
        }
    }

    /// Applies one action and returns the successor session.
    ///
    /// `Reset` is accepted from every step. Any other action must match the
    /// current step or the call fails with [`SessionError::UnexpectedAction`].
    pub fn advance(
        &self,
        registry: &Registry,
        action: SessionAction,
    ) -> Result<Session, SessionError> {
        let mut next = self.clone();

        match (self.step, action) {
            (_, SessionAction::Reset) => return Ok(Session::new(self.policy)),
            (SessionStep::Intro, SessionAction::Start) => {
                next.step = SessionStep::ContextTrouble;
            }
            (SessionStep::ContextTrouble, SessionAction::SelectTrouble { trouble }) => {
                next.trouble = Some(trouble);
                next.scores = self.scores.merge(&registry.trouble_bonus(trouble));
                next.step = SessionStep::ContextTime;
            }
            (SessionStep::ContextTime, SessionAction::SelectTime { time }) => {
                next.time_bucket = Some(time);
                next.scores = self.scores.merge(&registry.time_bonus(time));
                next.step = SessionStep::CoreQuestions { index: 0 };
            }
            (SessionStep::CoreQuestions { index }, SessionAction::Answer { choice }) => {
                let questions = registry.core_questions();
                let question = questions
                    .get(index)
                    .ok_or_else(|| SessionError::UnknownQuestion(format!("core #{}", index + 1)))?;
                next.record(question, QuestionPhase::Core, choice);

                if index + 1 < questions.len() {
                    next.step = SessionStep::CoreQuestions { index: index + 1 };
                } else {
                    next.finish_core(registry);
                }
            }
            (SessionStep::SupplementaryQuestions { index }, SessionAction::Answer { choice }) => {
                let id = self
                    .supplementary
                    .get(index)
                    .copied()
                    .ok_or_else(|| SessionError::UnknownQuestion(format!("supplementary #{}", index + 1)))?;
                let question = registry
                    .supplementary_by_id(id)
                    .ok_or_else(|| SessionError::UnknownQuestion(id.to_string()))?;
                next.record(question, QuestionPhase::Supplementary, choice);

                next.step = if index + 1 < self.supplementary.len() {
                    SessionStep::SupplementaryQuestions { index: index + 1 }
                } else {
                    SessionStep::Result
                };
            }
            (step, action) => {
                return Err(SessionError::UnexpectedAction {
                    step: step.name(),
                    action: action.name(),
                })
            }
        }

        Ok(next)
    }

    fn record(&mut self, question: &Question, phase: QuestionPhase, choice: Choice) {
        self.scores = self.scores.merge(&question.option(choice).weights);
        self.answers.push(AnswerRecord {
            question_id: question.id,
            phase,
            choice,
        });
    }

    /// Decides between the supplementary phase and the result once the last
    /// mandatory answer is in. The supplementary set is fixed here.
    fn finish_core(&mut self, registry: &Registry) {
        if !self.policy.needs_supplementary(self.confidence()) {
            self.step = SessionStep::Result;
            return;
        }

        self.supplementary =
            select_supplementary(&self.scores, registry, self.policy.supplementary_limit)
                .into_iter()
                .map(|question| question.id)
                .collect();

        self.step = if self.supplementary.is_empty() {
            SessionStep::Result
        } else {
            SessionStep::SupplementaryQuestions { index: 0 }
        };
    }

    pub fn step(&self) -> SessionStep {
        self.step
    }

    pub fn policy(&self) -> &DiagnosisPolicy {
        &self.policy
    }

    pub fn scores(&self) -> &ScoreState {
        &self.scores
    }

    pub fn ranking(&self) -> Ranking {
        self.scores.rank()
    }

    pub fn confidence(&self) -> f64 {
        self.scores.confidence()
    }

    pub fn trouble(&self) -> Option<Trouble> {
        self.trouble
    }

    pub fn time_bucket(&self) -> Option<TimeBucket> {
        self.time_bucket
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Supplementary question ids chosen when the phase began; empty otherwise.
    pub fn supplementary_ids(&self) -> &[&'static str] {
        &self.supplementary
    }

    pub fn is_complete(&self) -> bool {
        self.step == SessionStep::Result
    }

    pub fn current_question<'r>(&self, registry: &'r Registry) -> Option<&'r Question> {
        match self.step {
            SessionStep::CoreQuestions { index } => registry.core_questions().get(index),
            SessionStep::SupplementaryQuestions { index } => self
                .supplementary
                .get(index)
                .and_then(|id| registry.supplementary_by_id(id)),
            _ => None,
        }
    }

    pub fn progress(&self, registry: &Registry) -> Option<Progress> {
        match self.step {
            SessionStep::CoreQuestions { index } => Some(Progress {
                phase: QuestionPhase::Core,
                position: index + 1,
                total: registry.core_questions().len(),
            }),
            SessionStep::SupplementaryQuestions { index } => Some(Progress {
                phase: QuestionPhase::Supplementary,
                position: index + 1,
                total: self.supplementary.len(),
            }),
            _ => None,
        }
    }

    pub fn report(&self, registry: &Registry) -> Result<DiagnosisReport, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::NotFinished {
                step: self.step.name(),
            });
        }
        Ok(DiagnosisReport::build(self, registry))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("action '{action}' is not accepted during the {step} step")]
    UnexpectedAction {
        step: &'static str,
        action: &'static str,
    },
    #[error("no report yet: session is still in the {step} step")]
    NotFinished { step: &'static str },
    #[error("question {0} is not registered")]
    UnknownQuestion(String),
}
