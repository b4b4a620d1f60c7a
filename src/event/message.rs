use serde::{Deserialize, Serialize};

/// Event kinds emitted by the notification server.
///
/// `PollRequest` never arrives as an input; it is synthesized on the way out
/// when a message body must not leave the server over the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Keepalive,
    Open,
    Message,
    PollRequest,
}

impl EventKind {
    /// Wire name of the kind, as rendered into push payload data
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Keepalive => "keepalive",
            EventKind::Open => "open",
            EventKind::Message => "message",
            EventKind::PollRequest => "poll-request",
        }
    }
}

/// One event published by the notification server.
///
/// Optional fields default when absent from the wire; empty strings are kept
/// as empty strings, not dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,
    /// Unix timestamp in seconds
    pub time: i64,
    pub event: EventKind,
    /// Routing key subscribers listen on
    pub topic: String,
    /// 1-5, higher is more urgent
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Action URL opened when the notification is tapped
    #[serde(default)]
    pub click: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// Content encoding hint for the message body
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// File attached to a message
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
    /// Unix timestamp in seconds after which the attachment is gone
    pub expires: i64,
    pub url: String,
}
