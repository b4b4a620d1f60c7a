pub mod auth;
pub mod bridge;
pub mod config;
pub mod event;
pub mod push;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use auth::{Authorizer, TopicPolicy};
use bridge::EventSource;
pub use config::BridgeConfig;
use push::{FcmClient, Forwarder};

/// Channel depth between the NATS pump and the forward loop
const EVENT_BUFFER: usize = 256;

/// Forwards notification server events to FCM.
pub struct Bridge {
    config: BridgeConfig,
    forwarder: Arc<Forwarder<FcmClient>>,
    source: EventSource,
}

impl Bridge {
    pub async fn new(
        config: BridgeConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let sender = FcmClient::from_credentials_file(&config.credentials_file)?;
        let policy: Option<Arc<dyn Authorizer>> = if config.protected_topics.is_empty() {
            None
        } else {
            Some(Arc::new(TopicPolicy::new(config.protected_topics.clone())))
        };
        let forwarder = Arc::new(Forwarder::new(sender, policy));
        let source = EventSource::connect(&config.nats_url).await?;

        Ok(Self {
            config,
            forwarder,
            source,
        })
    }

    /// Run the bridge until the shutdown signal fires
    pub async fn run(
        self,
        mut shutdown: oneshot::Receiver<()>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Starting bridge...");

        let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
        let subscription = self
            .source
            .subscribe(self.config.subject.clone(), tx)
            .await?;

        info!("Forwarding events from {} to FCM", self.config.subject);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
                event = rx.recv() => {
                    match event {
                        Some(event) => {
                            let forwarder = self.forwarder.clone();
                            // A failed send is dropped; online subscribers got
                            // the message over other paths already
                            tokio::spawn(async move {
                                if let Err(e) = forwarder.forward(&event).await {
                                    warn!("Dropping push for topic {}: {}", event.topic, e);
                                }
                            });
                        }
                        None => {
                            warn!("Event stream ended");
                            break;
                        }
                    }
                }
            }
        }

        subscription.unsubscribe().await;
        Ok(())
    }

    /// Run without shutdown signal (for production use)
    pub async fn run_forever(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (_shutdown_tx, shutdown_rx) = oneshot::channel();
        self.run(shutdown_rx).await
    }
}
