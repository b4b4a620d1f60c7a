mod message;

pub use message::{Attachment, EventKind, Message};
