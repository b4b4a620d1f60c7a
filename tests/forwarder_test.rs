//! Integration tests for the forwarding pipeline
//!
//! These exercise translation, policy, truncation, and dispatch through the
//! public API with an in-process push sender; no NATS or FCM connection is
//! needed.

use std::sync::{Arc, Mutex};

use pushbridge::auth::TopicPolicy;
use pushbridge::event::{EventKind, Message};
use pushbridge::push::{FCM_MESSAGE_LIMIT, Forwarder, PushError, PushMessage, PushSender};

/// Push sender double that records every payload it is handed
#[derive(Clone)]
struct RecordingSender {
    sent: Arc<Mutex<Vec<PushMessage>>>,
}

impl RecordingSender {
    fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl PushSender for RecordingSender {
    async fn send(&self, message: PushMessage) -> Result<(), PushError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

struct FailingSender;

impl PushSender for FailingSender {
    async fn send(&self, _message: PushMessage) -> Result<(), PushError> {
        Err(PushError::Rejected {
            status: 503,
            detail: "quota exceeded".to_string(),
        })
    }
}

fn text_message(topic: &str, body: &str) -> Message {
    Message {
        id: "m1".to_string(),
        time: 200,
        event: EventKind::Message,
        topic: topic.to_string(),
        priority: 3,
        tags: vec!["a".to_string(), "b".to_string()],
        click: String::new(),
        title: "hi".to_string(),
        message: body.to_string(),
        encoding: String::new(),
        attachment: None,
    }
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_message_reaches_sender_with_full_data() {
    let sender = RecordingSender::new();
    let forwarder = Forwarder::new(sender.clone(), None);

    forwarder
        .forward(&text_message("alerts", "disk full"))
        .await
        .unwrap();

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].topic, "alerts");

    let data = sent[0].data.as_ref().unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(data.get("event"), Some(&"message".to_string()));
    assert_eq!(data.get("message"), Some(&"disk full".to_string()));
    assert_eq!(data.get("tags"), Some(&"a,b".to_string()));
}

#[tokio::test]
async fn test_protected_topic_reaches_sender_as_poll_request() {
    let sender = RecordingSender::new();
    let policy = TopicPolicy::new(vec!["secret*".to_string()]);
    let forwarder = Forwarder::new(sender.clone(), Some(Arc::new(policy)));

    forwarder
        .forward(&text_message("secret_ops", "launch codes"))
        .await
        .unwrap();

    let sent = sender.sent();
    let data = sent[0].data.as_ref().unwrap();
    assert_eq!(data.len(), 4);
    assert_eq!(data.get("event"), Some(&"poll-request".to_string()));
    assert!(!data.contains_key("message"));
}

#[tokio::test]
async fn test_oversized_message_is_truncated_before_send() {
    let sender = RecordingSender::new();
    let forwarder = Forwarder::new(sender.clone(), None);

    forwarder
        .forward(&text_message("alerts", &"x".repeat(10_000)))
        .await
        .unwrap();

    let sent = sender.sent();
    let serialized = serde_json::to_vec(&sent[0]).unwrap();
    assert!(serialized.len() <= FCM_MESSAGE_LIMIT);

    let data = sent[0].data.as_ref().unwrap();
    assert_eq!(data.get("truncated"), Some(&"1".to_string()));
}

#[tokio::test]
async fn test_send_failure_surfaces_to_caller() {
    let forwarder = Forwarder::new(FailingSender, None);

    let err = forwarder
        .forward(&text_message("alerts", "yo"))
        .await
        .unwrap_err();

    match err {
        PushError::Rejected { status, detail } => {
            assert_eq!(status, 503);
            assert_eq!(detail, "quota exceeded");
        }
        other => panic!("Wrong error kind: {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_forwards_are_independent() {
    let sender = RecordingSender::new();
    let forwarder = Arc::new(Forwarder::new(sender.clone(), None));

    let mut handles = Vec::new();
    for i in 0..16 {
        let forwarder = forwarder.clone();
        handles.push(tokio::spawn(async move {
            let mut m = text_message("alerts", "yo");
            m.id = format!("m{}", i);
            forwarder.forward(&m).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let sent = sender.sent();
    assert_eq!(sent.len(), 16);

    let mut ids: Vec<String> = sent
        .iter()
        .map(|p| p.data.as_ref().unwrap().get("id").unwrap().clone())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16, "Each forward produced its own payload");
}
