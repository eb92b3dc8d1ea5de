//! Integration test: Controller → Session → Generator → simulated service.
//!
//! Drives whole request cycles through the event queue the way the terminal
//! does, with a deterministic service and a simulated clock.

use std::sync::Arc;

use async_trait::async_trait;
use cw_core::{
    ApiKey, Controller, ErrorKind, Event, GenerationRequest, GenerationResult, GenerationService,
    HintCount, Locale, RequestState, TransportError, COPY_INDICATOR_MS,
};
use cw_dst::{DeterministicRng, FaultConfig, FaultInjector, ServiceFault, SimClock, SimReply, SimService};
use cw_generator::{ClueGenerator, MemoryClipboard, PromptBuilder, Session, StaticCredentials};

const PAYLOAD: &str = r#"{"clues":["a","b"],"synonyms":["c"],"antonyms":[]}"#;

struct Harness {
    session: Session<Arc<SimClock>>,
    service: Arc<SimService>,
    clipboard: Arc<MemoryClipboard>,
    clock: Arc<SimClock>,
}

fn harness(key: Option<&str>, replies: Vec<SimReply>) -> Harness {
    let fault = FaultInjector::new(DeterministicRng::new(21), FaultConfig::none());
    let service = Arc::new(SimService::new(DeterministicRng::new(21), fault).with_script(replies));
    let clipboard = Arc::new(MemoryClipboard::new());
    let clock = Arc::new(SimClock::new());

    let generator = ClueGenerator::new(service.clone(), Arc::new(StaticCredentials::new(key)));
    let controller = Controller::new(Arc::clone(&clock), Locale::Ar);
    let session = Session::new(controller, generator, clipboard.clone());

    Harness {
        session,
        service,
        clipboard,
        clock,
    }
}

fn submit(session: &mut Session<Arc<SimClock>>, word: &str) {
    session.dispatch(Event::WordChanged(word.to_string()));
    session.dispatch(Event::Submit);
}

#[tokio::test]
async fn test_submit_enters_loading_before_the_call_resolves() {
    let mut h = harness(Some("key"), vec![SimReply::Payload(PAYLOAD.to_string())]);

    submit(&mut h.session, "بحر");
    assert!(h.session.controller().state().is_loading());

    h.session.settle().await;
    let result = h.session.controller().state().result().cloned();
    assert_eq!(
        result,
        Some(GenerationResult {
            clues: vec!["a".into(), "b".into()],
            synonyms: vec!["c".into()],
            antonyms: vec![],
        })
    );
}

#[tokio::test]
async fn test_blank_word_never_reaches_the_service() {
    let mut h = harness(Some("key"), vec![]);

    submit(&mut h.session, "   ");
    assert_eq!(h.session.controller().state(), &RequestState::Idle);
    assert_eq!(h.service.calls_count(), 0);
}

#[tokio::test]
async fn test_missing_credential_fails_without_calling_service() {
    let mut h = harness(None, vec![SimReply::Payload(PAYLOAD.to_string())]);

    submit(&mut h.session, "شمس");
    h.session.settle().await;

    let failure = h.session.controller().state().failure().cloned().unwrap();
    assert_eq!(failure.kind, ErrorKind::Configuration);
    assert_eq!(
        failure.message,
        "مفتاح API مفقود. يرجى إضافة GEMINI_API_KEY في إعدادات البيئة (Environment Variables) في Netlify وإعادة بناء المشروع (Trigger Deploy)."
    );
    assert_eq!(h.service.calls_count(), 0);
}

#[tokio::test]
async fn test_failure_then_retry_by_hand() {
    let mut h = harness(
        Some("key"),
        vec![
            SimReply::Fault(ServiceFault::QuotaExceeded),
            SimReply::Payload(PAYLOAD.to_string()),
        ],
    );

    submit(&mut h.session, "قمر");
    h.session.settle().await;
    let failure = h.session.controller().state().failure().cloned().unwrap();
    assert_eq!(failure.kind, ErrorKind::Quota);
    assert_eq!(h.service.calls_count(), 1);

    // Controls stay usable; resubmitting clears the failure immediately.
    h.session.dispatch(Event::Submit);
    assert!(h.session.controller().state().failure().is_none());
    h.session.settle().await;
    assert!(h.session.controller().state().result().is_some());
    assert_eq!(h.service.calls_count(), 2);
}

#[tokio::test]
async fn test_empty_payload_is_not_a_parse_error() {
    let mut h = harness(Some("key"), vec![SimReply::Fault(ServiceFault::EmptyPayload)]);

    submit(&mut h.session, "نجم");
    h.session.settle().await;

    let failure = h.session.controller().state().failure().cloned().unwrap();
    assert_eq!(failure.kind, ErrorKind::EmptyResult);
    assert_eq!(failure.message, "لم يتم إرجاع أي نتيجة. حاول مرة أخرى.");
}

#[tokio::test]
async fn test_prompt_reflects_selected_count() {
    let mut h = harness(Some("key"), vec![SimReply::Payload(PAYLOAD.to_string())]);

    h.session.dispatch(Event::HintCountSelected(HintCount::Ten));
    submit(&mut h.session, "جبل");
    h.session.settle().await;

    let sent = h.service.last_request().unwrap();
    assert!(sent.prompt.starts_with("أعطني 10 تلميحات"));
    assert_eq!(sent.response_schema, PromptBuilder::response_schema());
}

#[tokio::test(start_paused = true)]
async fn test_copy_writes_clipboard_and_indicator_expires() {
    let mut h = harness(Some("key"), vec![SimReply::Payload(PAYLOAD.to_string())]);

    submit(&mut h.session, "بحر");
    h.session.settle().await;

    h.session.dispatch(Event::CopyClue(1));
    assert_eq!(h.session.controller().copied_index(), Some(1));

    // The clipboard write and the expiry timer both report through the runtime.
    let tick = h.session.next_event().await;
    assert_eq!(tick, Some(Event::Tick));
    assert_eq!(h.clipboard.entries(), vec!["b"]);

    h.clock.advance_ms(COPY_INDICATOR_MS);
    h.session.dispatch(Event::Tick);
    assert_eq!(h.session.controller().copied_index(), None);
}

#[tokio::test]
async fn test_clear_discards_in_flight_completion() {
    let mut h = harness(
        Some("key"),
        vec![
            SimReply::Payload(r#"{"clues":["stale"]}"#.to_string()),
            SimReply::Payload(r#"{"clues":["fresh"]}"#.to_string()),
        ],
    );

    submit(&mut h.session, "old");
    h.session.dispatch(Event::Clear);
    submit(&mut h.session, "new");

    // Two completions arrive; only the one for the live request may land.
    for _ in 0..2 {
        let event = h.session.next_event().await.unwrap();
        h.session.dispatch(event);
    }

    let clues = h.session.controller().state().result().map(|r| r.clues.clone());
    assert_eq!(clues, Some(vec!["fresh".to_string()]));
}

/// Service whose call task dies before producing an outcome.
struct CrashingService;

#[async_trait]
impl GenerationService for CrashingService {
    async fn generate(
        &self,
        _api_key: &ApiKey,
        _request: &GenerationRequest,
    ) -> Result<Option<String>, TransportError> {
        panic!("service crashed mid-call");
    }
}

#[tokio::test]
async fn test_crashed_call_still_resolves_the_request() {
    let generator = ClueGenerator::new(
        Arc::new(CrashingService),
        Arc::new(StaticCredentials::new(Some("key"))),
    );
    let controller = Controller::new(Arc::new(SimClock::new()), Locale::En);
    let mut session = Session::new(controller, generator, Arc::new(MemoryClipboard::new()));

    submit(&mut session, "sea");
    session.settle().await;

    let failure = session.controller().state().failure().cloned().unwrap();
    assert_eq!(failure.kind, ErrorKind::Generic);
    assert!(failure.message.starts_with("Error: "));
    assert!(failure.message.contains("panicked"));

    // The session stays usable afterwards.
    assert!(session.controller().can_submit());
}
