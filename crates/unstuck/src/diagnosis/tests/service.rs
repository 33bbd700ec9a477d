use std::sync::{Arc, Barrier};
use std::thread;

use super::common::*;
use crate::diagnosis::domain::{Category, Choice, TimeBucket, Trouble};
use crate::diagnosis::sessions::{
    DiagnosisService, DiagnosisServiceError, PromptSink, SessionId, SessionRecord, SessionStore,
    StoreError,
};
use crate::diagnosis::session::{SessionAction, SessionError, SessionStep};
use crate::diagnosis::DiagnosisPolicy;

fn drive<S, P>(
    service: &DiagnosisService<S, P>,
    id: &SessionId,
    trouble: Trouble,
    time: TimeBucket,
    answers: &str,
) -> SessionRecord
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
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

    let mut last = None;
    for action in actions {
        last = Some(service.apply(id, action).expect("action accepted"));
    }
    last.expect("at least one action")
}

#[test]
fn start_persists_a_fresh_session() {
    let (service, store, _) = build_service();

    let record = service.start().expect("session started");

    assert!(record.id.0.starts_with("ses-"));
    assert_eq!(record.session.step(), SessionStep::Intro);
    let stored = store
        .fetch(&record.id)
        .expect("fetch")
        .expect("stored session");
    assert_eq!(stored.session, record.session);
}

#[test]
fn apply_persists_every_transition() {
    let (service, store, _) = build_service();
    let record = service.start().expect("session started");

    let finished = drive(
        &service,
        &record.id,
        Trouble::Tired,
        TimeBucket::HourOrMore,
        "BBBBBBBBBB",
    );

    assert_eq!(finished.session.step(), SessionStep::Result);
    assert!(finished.updated_at >= record.started_at);
    let stored = store
        .fetch(&record.id)
        .expect("fetch")
        .expect("stored session");
    assert_eq!(stored.session.scores().get(Category::Energy), 10);
}

#[test]
fn rejected_action_leaves_stored_session_unchanged() {
    let (service, store, _) = build_service();
    let record = service.start().expect("session started");

    let err = service
        .apply(
            &record.id,
            SessionAction::SelectTime {
                time: TimeBucket::AboutThirty,
            },
        )
        .expect_err("time before start is rejected");

    assert!(matches!(
        err,
        DiagnosisServiceError::Session(SessionError::UnexpectedAction { .. })
    ));
    let stored = store
        .fetch(&record.id)
        .expect("fetch")
        .expect("stored session");
    assert_eq!(stored.session.step(), SessionStep::Intro);
}

#[test]
fn concurrent_answers_on_one_session_are_all_recorded() {
    let (service, store, _) = build_service();
    let record = service.start().expect("session started");
    drive(&service, &record.id, Trouble::Tired, TimeBucket::HourOrMore, "");

    let barrier = Barrier::new(2);
    let outcomes: Vec<bool> = thread::scope(|scope| {
        let (barrier, service, id) = (&barrier, &service, &record.id);
        let handles: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    service
                        .apply(id, SessionAction::Answer { choice: Choice::A })
                        .is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker finished"))
            .collect()
    });

    assert_eq!(outcomes, vec![true, true]);
    let stored = store
        .fetch(&record.id)
        .expect("fetch")
        .expect("stored session");
    assert_eq!(stored.session.answers().len(), 2);
    assert_eq!(
        stored.session.step(),
        SessionStep::CoreQuestions { index: 2 }
    );
}

#[test]
fn unknown_session_is_not_found() {
    let (service, _, _) = build_service();
    let missing = SessionId("ses-missing".to_string());

    assert!(matches!(
        service.get(&missing),
        Err(DiagnosisServiceError::Store(StoreError::NotFound))
    ));
    assert!(matches!(
        service.apply(&missing, SessionAction::Start),
        Err(DiagnosisServiceError::Store(StoreError::NotFound))
    ));
}

#[test]
fn report_requires_result_step() {
    let (service, _, _) = build_service();
    let record = service.start().expect("session started");

    assert!(matches!(
        service.report(&record.id),
        Err(DiagnosisServiceError::Session(SessionError::NotFinished { step: "intro" }))
    ));

    drive(
        &service,
        &record.id,
        Trouble::Tired,
        TimeBucket::HourOrMore,
        "BBBBBBBBBB",
    );
    let report = service.report(&record.id).expect("report available");
    assert_eq!(report.primary.category, Category::Energy);
    assert_eq!(report.confidence_pct, 40);
}

#[test]
fn copy_prompt_hands_the_prompt_to_the_sink() {
    let (service, _, sink) = build_service();
    let record = service.start().expect("session started");
    drive(
        &service,
        &record.id,
        Trouble::Tired,
        TimeBucket::HourOrMore,
        "BBBBBBBBBB",
    );

    let notice = service.copy_prompt(&record.id).expect("copy handled");

    assert!(notice.copied);
    assert_eq!(notice.message, "Prompt copied.");
    let copied = sink.copied();
    assert_eq!(copied.len(), 1);
    assert!(copied[0].contains("- Estimated stuck pattern: Running on Empty"));
}

#[test]
fn copy_failure_is_reported_without_touching_the_session() {
    let store = Arc::new(MemoryStore::default());
    let service = DiagnosisService::new(
        Arc::new(registry()),
        store.clone(),
        Arc::new(DeniedSink),
        DiagnosisPolicy::default(),
    );
    let record = service.start().expect("session started");
    let finished = drive(
        &service,
        &record.id,
        Trouble::Tired,
        TimeBucket::HourOrMore,
        "BBBBBBBBBB",
    );

    let notice = service.copy_prompt(&record.id).expect("copy handled");

    assert!(!notice.copied);
    assert!(notice.message.contains("permission denied"));
    let stored = store
        .fetch(&record.id)
        .expect("fetch")
        .expect("stored session");
    assert_eq!(stored.session, finished.session);
}

#[test]
fn copy_before_result_is_rejected() {
    let (service, _, sink) = build_service();
    let record = service.start().expect("session started");

    assert!(matches!(
        service.copy_prompt(&record.id),
        Err(DiagnosisServiceError::Session(SessionError::NotFinished { .. }))
    ));
    assert!(sink.copied().is_empty());
}

#[test]
fn discard_removes_the_session() {
    let (service, store, _) = build_service();
    let record = service.start().expect("session started");

    service.discard(&record.id).expect("discarded");

    assert!(store.fetch(&record.id).expect("fetch").is_none());
    assert!(matches!(
        service.discard(&record.id),
        Err(DiagnosisServiceError::Store(StoreError::NotFound))
    ));
}

#[test]
fn store_outage_surfaces_as_store_error() {
    let service = DiagnosisService::new(
        Arc::new(registry()),
        Arc::new(UnavailableStore),
        Arc::new(MemorySink::default()),
        DiagnosisPolicy::default(),
    );

    assert!(matches!(
        service.start(),
        Err(DiagnosisServiceError::Store(StoreError::Unavailable(_)))
    ));
}

#[test]
fn policy_threshold_reaches_new_sessions() {
    let policy = DiagnosisPolicy {
        confidence_threshold: 0.5,
        supplementary_limit: 1,
    };
    let service = DiagnosisService::new(
        Arc::new(registry()),
        Arc::new(MemoryStore::default()),
        Arc::new(MemorySink::default()),
        policy,
    );
    let record = service.start().expect("session started");

    let record = drive(
        &service,
        &record.id,
        Trouble::Tired,
        TimeBucket::HourOrMore,
        "BBBBBBBBBB",
    );

    assert_eq!(
        record.session.step(),
        SessionStep::SupplementaryQuestions { index: 0 }
    );
    assert_eq!(record.session.supplementary_ids(), &["ex_energy_1"]);
}
