use std::collections::BTreeMap;
use std::sync::Arc;

use crate::auth::{Authorizer, Permission};
use crate::event::{EventKind, Message};

use super::payload::{AndroidConfig, PushMessage};
use super::truncate::maybe_truncate;
use super::{PushError, PushSender};

/// Events at or above this priority get the platform high-priority hint.
const HIGH_PRIORITY: u8 = 4;

/// Translates server events into push payloads and hands them upstream.
///
/// Holds no mutable state; concurrent forwards are independent.
pub struct Forwarder<S> {
    sender: S,
    policy: Option<Arc<dyn Authorizer>>,
}

impl<S> Forwarder<S> {
    /// Bind a forwarder to a push sender and an optional access policy.
    /// No policy means anonymous reads are always allowed.
    pub fn new(sender: S, policy: Option<Arc<dyn Authorizer>>) -> Self {
        Self { sender, policy }
    }

    /// Build the push payload for an event. Pure; the send happens in
    /// [`Forwarder::forward`].
    pub fn translate(&self, m: &Message) -> PushMessage {
        let data = match m.event {
            EventKind::Keepalive | EventKind::Open => Some(metadata(m, m.event)),
            EventKind::Message => {
                if self.allow_anonymous_read(&m.topic) {
                    Some(full(m))
                } else {
                    // The content must not leave the server in cleartext over
                    // the push channel; tell the client to poll for it over an
                    // authenticated path instead.
                    Some(metadata(m, EventKind::PollRequest))
                }
            }
            // Poll requests are output-only; should one arrive anyway it goes
            // out as a bare topic notification with no data block.
            EventKind::PollRequest => None,
        };
        // Priority is a property of the original message, not of what is
        // visible, so the hint also applies on the poll-request branch.
        let android = (m.priority >= HIGH_PRIORITY).then(|| AndroidConfig {
            priority: "high".to_string(),
        });

        PushMessage {
            topic: m.topic.clone(),
            data,
            android,
        }
    }

    fn allow_anonymous_read(&self, topic: &str) -> bool {
        match &self.policy {
            Some(policy) => policy.authorize(None, topic, Permission::Read).is_ok(),
            None => true,
        }
    }
}

impl<S: PushSender> Forwarder<S> {
    /// Translate one event, fit it to the size cap, and dispatch it upstream.
    ///
    /// Exactly one send per call; the sender's error is returned unchanged.
    pub async fn forward(&self, m: &Message) -> Result<(), PushError> {
        self.sender.send(maybe_truncate(self.translate(m))).await
    }
}

/// Metadata-only data block: what every event reveals about itself
fn metadata(m: &Message, event: EventKind) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("id".to_string(), m.id.clone()),
        ("time".to_string(), m.time.to_string()),
        ("event".to_string(), event.as_str().to_string()),
        ("topic".to_string(), m.topic.clone()),
    ])
}

/// Full data block for a message whose content may be forwarded.
/// Empty optional fields stay present as empty strings.
fn full(m: &Message) -> BTreeMap<String, String> {
    let mut data = metadata(m, m.event);
    data.insert("priority".to_string(), m.priority.to_string());
    data.insert("tags".to_string(), m.tags.join(","));
    data.insert("click".to_string(), m.click.clone());
    data.insert("title".to_string(), m.title.clone());
    data.insert("message".to_string(), m.message.clone());
    data.insert("encoding".to_string(), m.encoding.clone());
    if let Some(attachment) = &m.attachment {
        data.insert("attachment_name".to_string(), attachment.name.clone());
        data.insert(
            "attachment_type".to_string(),
            attachment.content_type.clone(),
        );
        data.insert("attachment_size".to_string(), attachment.size.to_string());
        data.insert(
            "attachment_expires".to_string(),
            attachment.expires.to_string(),
        );
        data.insert("attachment_url".to_string(), attachment.url.clone());
    }
    data
}
