use super::payload::PushMessage;

/// FCM rejects messages whose serialized size exceeds this many bytes.
pub const FCM_MESSAGE_LIMIT: usize = 4000;

/// Serialized length of the `"truncated":"1",` marker entry.
const TRUNCATED_MARKER_LEN: usize = 16;

/// Shrink an oversized payload to fit the FCM size cap.
///
/// Only the `message` data field is ever shortened, and only when it is long
/// enough to absorb the overage plus the truncation marker. Payloads that are
/// oversized for any other reason are returned unchanged and left for the
/// upstream service to reject. Deterministic on its input.
pub fn maybe_truncate(mut msg: PushMessage) -> PushMessage {
    let serialized = match serde_json::to_vec(&msg) {
        Ok(serialized) => serialized,
        Err(_) => return msg,
    };
    if serialized.len() <= FCM_MESSAGE_LIMIT {
        return msg;
    }

    let over = serialized.len() - FCM_MESSAGE_LIMIT + TRUNCATED_MARKER_LEN;
    if let Some(data) = msg.data.as_mut() {
        if let Some(body) = data.get("message") {
            if body.len() > over {
                let mut keep = body.len() - over;
                while keep > 0 && !body.is_char_boundary(keep) {
                    keep -= 1;
                }
                let shortened = body[..keep].to_string();
                data.insert("message".to_string(), shortened);
                data.insert("truncated".to_string(), "1".to_string());
            }
        }
    }
    msg
}
