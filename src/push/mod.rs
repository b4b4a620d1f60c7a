mod fcm;
mod forward;
mod payload;
mod truncate;

use std::future::Future;

pub use fcm::FcmClient;
pub use forward::Forwarder;
pub use payload::{AndroidConfig, PushMessage};
pub use truncate::{FCM_MESSAGE_LIMIT, maybe_truncate};

/// Single-operation send capability over the upstream push service.
///
/// The concrete client is an implementation detail of its construction; tests
/// substitute recording or failing doubles.
pub trait PushSender: Send + Sync {
    fn send(&self, message: PushMessage) -> impl Future<Output = Result<(), PushError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("Failed to load credentials: {0}")]
    Credentials(String),
    #[error("Token exchange failed: {0}")]
    Token(String),
    #[error("Push request failed: {0}")]
    Request(String),
    #[error("Push rejected by upstream ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}
