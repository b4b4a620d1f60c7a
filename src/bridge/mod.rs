mod nats;

pub use nats::{EventSource, SourceError, SubscriptionHandle, decode_event};
