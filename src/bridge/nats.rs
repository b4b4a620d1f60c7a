use async_nats::Client;
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::event::Message;

/// Connection to the notification server's event stream
pub struct EventSource {
    client: Client,
}

impl EventSource {
    /// Connect to the NATS server carrying the event stream
    pub async fn connect(url: &str) -> Result<Self, SourceError> {
        info!("Connecting to NATS at {}", url);
        let client = async_nats::connect(url)
            .await
            .map_err(|e| SourceError::ConnectionFailed(e.to_string()))?;

        info!("Connected to NATS");
        Ok(Self { client })
    }

    /// Subscribe to a subject and forward decoded events to the sender.
    /// Malformed payloads are logged and skipped.
    pub async fn subscribe(
        &self,
        subject: String,
        sender: mpsc::Sender<Message>,
    ) -> Result<SubscriptionHandle, SourceError> {
        let subscriber = self
            .client
            .subscribe(subject.clone())
            .await
            .map_err(|e| SourceError::SubscribeFailed(e.to_string()))?;

        let (cancel_tx, mut cancel_rx) = mpsc::channel::<()>(1);

        let subject_clone = subject.clone();
        tokio::spawn(async move {
            let mut subscriber = subscriber;
            loop {
                tokio::select! {
                    msg = subscriber.next() => {
                        match msg {
                            Some(msg) => {
                                let event = match decode_event(&msg.payload) {
                                    Ok(event) => event,
                                    Err(e) => {
                                        warn!("Discarding malformed event on {}: {}", subject_clone, e);
                                        continue;
                                    }
                                };
                                if sender.send(event).await.is_err() {
                                    debug!("Event channel closed for {}", subject_clone);
                                    break;
                                }
                            }
                            None => {
                                debug!("NATS subscription ended for {}", subject_clone);
                                break;
                            }
                        }
                    }
                    _ = cancel_rx.recv() => {
                        debug!("Subscription cancelled for {}", subject_clone);
                        break;
                    }
                }
            }
        });

        Ok(SubscriptionHandle { cancel_tx })
    }
}

/// Decode one event from its wire form
pub fn decode_event(payload: &[u8]) -> Result<Message, serde_json::Error> {
    serde_json::from_slice(payload)
}

/// Handle to cancel a subscription
pub struct SubscriptionHandle {
    cancel_tx: mpsc::Sender<()>,
}

impl SubscriptionHandle {
    pub async fn unsubscribe(self) {
        let _ = self.cancel_tx.send(()).await;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to connect to NATS: {0}")]
    ConnectionFailed(String),
    #[error("Failed to subscribe: {0}")]
    SubscribeFailed(String),
}
