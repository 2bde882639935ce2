//! Chat session serialization and end-to-end flow

mod common;

use async_trait::async_trait;
use serde_json::json;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trading_mentor::advisor::{AdviceService, Advisor, REAUTHORIZE_MESSAGE};
use trading_mentor::chat::{ChatSession, Conversation, SubmitOutcome};
use trading_mentor::credentials::ApiKey;
use trading_mentor::providers::{GeminiProvider, Message};

/// Advisor that counts calls and holds each reply until released
struct GatedAdvisor {
    calls: AtomicUsize,
    release: Notify,
}

impl GatedAdvisor {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl Advisor for GatedAdvisor {
    async fn get_advice(&self, history: &[Message]) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        format!("reply after {} messages", history.len())
    }
}

#[tokio::test]
async fn test_second_submission_ignored_while_loading() {
    let advisor = Arc::new(GatedAdvisor::new());
    let session = ChatSession::new(advisor.clone(), Conversation::new());

    let first = session.submit("first question");
    let second = async {
        while !session.is_loading() {
            tokio::task::yield_now().await;
        }
        let outcome = session.submit("second question").await;
        advisor.release.notify_one();
        outcome
    };

    let (first_outcome, second_outcome) = tokio::join!(first, second);

    assert_eq!(
        first_outcome,
        SubmitOutcome::Replied("reply after 1 messages".to_string())
    );
    assert_eq!(second_outcome, SubmitOutcome::Busy);
    assert_eq!(advisor.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        session.messages(),
        vec![
            Message::user("first question"),
            Message::assistant("reply after 1 messages"),
        ]
    );
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_clear_refused_while_loading() {
    let advisor = Arc::new(GatedAdvisor::new());
    let session = ChatSession::new(advisor.clone(), Conversation::with_greeting("Welcome!"));

    let first = session.submit("question");
    let attempt_clear = async {
        while !session.is_loading() {
            tokio::task::yield_now().await;
        }
        let cleared = session.clear();
        advisor.release.notify_one();
        cleared
    };

    let (_, cleared) = tokio::join!(first, attempt_clear);
    assert!(!cleared);
    assert_eq!(session.len(), 3);
}

#[tokio::test]
async fn test_dropped_submission_releases_loading_flag() {
    let advisor = Arc::new(GatedAdvisor::new());
    let session = ChatSession::new(advisor.clone(), Conversation::new());

    {
        let pending = session.submit("never answered");
        tokio::pin!(pending);
        let polled = poll_once(pending.as_mut()).await;
        assert!(polled.is_none());
        assert!(session.is_loading());
    }

    assert!(!session.is_loading());
}

/// Poll a future exactly once
async fn poll_once<F: Future + Unpin>(fut: F) -> Option<F::Output> {
    let mut fut = fut;
    std::future::poll_fn(|cx| {
        std::task::Poll::Ready(match std::pin::Pin::new(&mut fut).poll(cx) {
            std::task::Poll::Ready(v) => Some(v),
            std::task::Poll::Pending => None,
        })
    })
    .await
}

#[tokio::test]
async fn test_session_against_mock_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Use a 2% stop."}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        GeminiProvider::new(common::gemini_config(&server.uri()), ApiKey::new("test-key"))
            .unwrap();
    let service = AdviceService::new(Box::new(provider), &common::mentor_config());
    let session = ChatSession::new(Arc::new(service), Conversation::with_greeting("Welcome!"));

    let outcome = session.submit("Where do I put my stop loss?").await;
    assert_eq!(outcome, SubmitOutcome::Replied("Use a 2% stop.".to_string()));
    assert_eq!(session.len(), 3);
}

#[tokio::test]
async fn test_session_records_failure_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let provider =
        GeminiProvider::new(common::gemini_config(&server.uri()), ApiKey::new("bad-key"))
            .unwrap();
    let service = AdviceService::new(Box::new(provider), &common::mentor_config());
    let session = ChatSession::new(Arc::new(service), Conversation::new());

    let outcome = session.submit("hello").await;
    assert_eq!(outcome, SubmitOutcome::Replied(REAUTHORIZE_MESSAGE.to_string()));
    assert_eq!(
        session.messages().last(),
        Some(&Message::assistant(REAUTHORIZE_MESSAGE))
    );
}
