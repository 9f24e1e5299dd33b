//! Inbound frame decoding.
//!
//! Every text frame is decoded here before it can touch the store. A
//! malformed frame is logged and dropped; the connection stays up.

use tracing::warn;

use super::types::{HEARTBEAT_ACK_TAG, Notification, ServerFrame};

/// Result of decoding one inbound frame.
#[derive(Debug)]
pub enum FrameOutcome {
    /// A user-facing notification to insert into the store.
    Notification(Notification),
    /// A heartbeat acknowledgement; suppressed before the store.
    HeartbeatAck,
    /// Unparseable text; dropped.
    Malformed,
}

/// Decode a raw text frame into zero or one notification.
pub fn decode_frame(raw: &str) -> FrameOutcome {
    let frame: ServerFrame = match serde_json::from_str(raw) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(error = %e, "Dropping malformed realtime frame");
            return FrameOutcome::Malformed;
        }
    };

    if frame.tag == HEARTBEAT_ACK_TAG {
        return FrameOutcome::HeartbeatAck;
    }

    FrameOutcome::Notification(Notification::from_frame(frame))
}
