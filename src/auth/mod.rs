mod policy;

pub use policy::{AccessDenied, Authorizer, Permission, TopicPolicy};
