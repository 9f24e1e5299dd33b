//! Toast widget: a transient view of the most recent unread notifications.
//!
//! The view is independent of the store: expiry and individual dismissal
//! only empty the view, never mark anything read.

use std::time::{Duration, Instant};

use schoolquest_core::types::id::NotificationId;

use crate::message::types::Notification;
use crate::notification::store::NotificationStore;

/// Maximum simultaneously visible toasts.
pub const VISIBLE_LIMIT: usize = 3;

/// How long toasts linger after the view last changed.
pub const LINGER: Duration = Duration::from_secs(5);

/// Transient toast state, refreshed from the store on change and ticked by
/// the caller's clock.
#[derive(Debug, Default)]
pub struct ToastView {
    visible: Vec<Notification>,
    deadline: Option<Instant>,
}

impl ToastView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive the visible set from the store.
    ///
    /// Call whenever the store changes. A changed visible set restarts the
    /// linger deadline.
    pub fn refresh(&mut self, store: &NotificationStore, now: Instant) {
        let recent = store.recent_unread(VISIBLE_LIMIT);

        let unchanged = recent.len() == self.visible.len()
            && recent
                .iter()
                .zip(&self.visible)
                .all(|(a, b)| a.id == b.id);
        if unchanged {
            return;
        }

        self.deadline = (!recent.is_empty()).then(|| now + LINGER);
        self.visible = recent;
    }

    /// Expire the view when the linger deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.visible.clear();
                self.deadline = None;
            }
        }
    }

    /// Dismiss one toast. The underlying entry stays unread.
    pub fn dismiss(&mut self, id: NotificationId) {
        self.visible.retain(|n| n.id != id);
        if self.visible.is_empty() {
            self.deadline = None;
        }
    }

    /// Currently visible toasts, newest first.
    pub fn visible(&self) -> &[Notification] {
        &self.visible
    }
}
