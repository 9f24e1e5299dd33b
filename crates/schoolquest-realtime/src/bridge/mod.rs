//! Bridge to the OS-level notification surface.
//!
//! The pipeline mirrors incoming notifications out through a
//! [`NotificationSink`], gated by a one-shot permission request. Delivery
//! is fire-and-forget: it never blocks the reader and never affects the
//! in-app store.

pub mod desktop;
pub mod push;

use std::fmt;
use std::sync::Mutex;

use tracing::debug;

use crate::message::types::Notification;

/// Permission state for the OS notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Never asked; the single opportunistic request is still available.
    Unasked,
    /// Granted; notifications are mirrored.
    Granted,
    /// Denied or unsupported; the feature is silently unavailable.
    Denied,
}

/// Destination for mirrored notifications.
pub trait NotificationSink: Send + Sync {
    /// Whether the platform surface is available at all.
    fn supported(&self) -> bool {
        true
    }

    /// Deliver one notification. Must not block the caller.
    fn deliver(&self, title: &str, body: &str);
}

/// Permission-gated mirror of incoming notifications.
pub struct NotificationBridge {
    sink: Box<dyn NotificationSink>,
    permission: Mutex<Permission>,
}

impl NotificationBridge {
    /// Wrap a sink; permission starts unasked.
    pub fn new(sink: Box<dyn NotificationSink>) -> Self {
        Self {
            sink,
            permission: Mutex::new(Permission::Unasked),
        }
    }

    /// Current permission state.
    pub fn permission(&self) -> Permission {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The single opportunistic permission request.
    ///
    /// Only transitions out of [`Permission::Unasked`]; an explicit grant or
    /// denial is never re-prompted. Returns the resulting state.
    pub fn request_permission(&self) -> Permission {
        let mut permission = self.permission.lock().unwrap_or_else(|e| e.into_inner());
        if *permission == Permission::Unasked {
            let resolved = if self.sink.supported() {
                Permission::Granted
            } else {
                Permission::Denied
            };
            *permission = resolved;
            debug!(permission = ?resolved, "Notification permission resolved");
        }
        *permission
    }

    /// Mirror a notification when permitted. Fire-and-forget.
    pub fn mirror(&self, notification: &Notification) {
        if self.permission() != Permission::Granted {
            return;
        }
        self.sink.deliver(&notification.title, &notification.message);
    }
}

impl fmt::Debug for NotificationBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBridge")
            .field("permission", &self.permission())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::message::decoder::{FrameOutcome, decode_frame};

    struct CountingSink {
        supported: bool,
        delivered: Arc<AtomicUsize>,
    }

    impl NotificationSink for CountingSink {
        fn supported(&self) -> bool {
            self.supported
        }

        fn deliver(&self, _title: &str, _body: &str) {
            self.delivered.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn sample() -> Notification {
        match decode_frame(r#"{"type": "new_achievement", "title": "Nova conquista!", "message": "Leitor"}"#)
        {
            FrameOutcome::Notification(n) => n,
            other => panic!("expected notification, got {other:?}"),
        }
    }

    #[test]
    fn test_mirror_requires_granted_permission() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let bridge = NotificationBridge::new(Box::new(CountingSink {
            supported: true,
            delivered: delivered.clone(),
        }));

        bridge.mirror(&sample());
        assert_eq!(delivered.load(Ordering::SeqCst), 0);

        assert_eq!(bridge.request_permission(), Permission::Granted);
        bridge.mirror(&sample());
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsupported_sink_is_denied() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let bridge = NotificationBridge::new(Box::new(CountingSink {
            supported: false,
            delivered: delivered.clone(),
        }));

        assert_eq!(bridge.request_permission(), Permission::Denied);
        // Never re-prompts.
        assert_eq!(bridge.request_permission(), Permission::Denied);
        bridge.mirror(&sample());
        assert_eq!(delivered.load(Ordering::SeqCst), 0);
    }
}
