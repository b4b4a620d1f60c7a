use std::collections::BTreeMap;

use serde::Serialize;

/// Push message handed to the upstream service, shaped like the FCM v1
/// `message` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    /// Topic the upstream service fans out to
    pub topic: String,
    /// Flat string map delivered to the device. Absent for events forwarded
    /// as bare topic-level notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
}

/// Android-specific delivery options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidConfig {
    /// "high" wakes the device's push daemon immediately
    pub priority: String,
}
