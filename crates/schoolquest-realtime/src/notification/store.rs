//! Ordered in-memory notification store.
//!
//! The store is volatile: created empty for each connection, never
//! persisted, and lost on reload. Ordering is newest-received-first and is
//! never changed after insertion. There is no capacity bound; typical
//! notification volumes keep the list small for the life of a session.

use std::collections::HashSet;
use std::sync::Mutex;

use schoolquest_core::types::id::NotificationId;

use crate::message::types::Notification;

#[derive(Debug, Default)]
struct Inner {
    /// Newest first.
    entries: Vec<Notification>,
    /// Merge keys of every entry admitted since the last clear.
    merge_keys: HashSet<String>,
}

/// Session-scoped notification collection shared by all presentation
/// widgets. The event loop serializes mutation; the mutex only guards
/// cross-task handoff.
#[derive(Debug, Default)]
pub struct NotificationStore {
    inner: Mutex<Inner>,
}

impl NotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head.
    ///
    /// At-most-once-per-id rule: an entry whose local id is already present,
    /// or whose server-supplied merge key has already been admitted (the
    /// optimistic chat send arriving a second time over the channel), is
    /// ignored. Returns whether the entry was admitted.
    pub fn insert(&self, notification: Notification) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if inner.entries.iter().any(|n| n.id == notification.id) {
            return false;
        }
        if let Some(key) = notification.merge_key() {
            if !inner.merge_keys.insert(key) {
                return false;
            }
        }

        inner.entries.insert(0, notification);
        true
    }

    /// Mark one entry read. No-op when the id is absent; never reverts.
    pub fn mark_read(&self, id: NotificationId) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = inner.entries.iter_mut().find(|n| n.id == id) {
            entry.read = true;
        }
    }

    /// Mark every entry read.
    pub fn mark_all_read(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        for entry in &mut inner.entries {
            entry.read = true;
        }
    }

    /// Empty the collection, forgetting merge keys with it.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.clear();
        inner.merge_keys.clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of unread entries. Derived, never stored.
    pub fn unread_count(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.iter().filter(|n| !n.read).count()
    }

    /// Snapshot of all entries, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.clone()
    }

    /// The `limit` most recent unread entries, newest first.
    pub fn recent_unread(&self, limit: usize) -> Vec<Notification> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .entries
            .iter()
            .filter(|n| !n.read)
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::decoder::{FrameOutcome, decode_frame};

    fn notification(title: &str) -> Notification {
        match decode_frame(&format!(
            r#"{{"type": "system_announcement", "title": "{title}", "message": "corpo"}}"#
        )) {
            FrameOutcome::Notification(n) => n,
            other => panic!("expected notification, got {other:?}"),
        }
    }

    fn chat_message(message_id: i64) -> Notification {
        match decode_frame(&format!(
            r#"{{"type": "clan_message", "title": "Nova mensagem", "message": "oi",
                "data": {{"clan_id": 1, "message_id": {message_id}}}}}"#
        )) {
            FrameOutcome::Notification(n) => n,
            other => panic!("expected notification, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_orders_newest_first() {
        let store = NotificationStore::new();
        for title in ["primeira", "segunda", "terceira"] {
            assert!(store.insert(notification(title)));
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].title, "terceira");
        assert_eq!(snapshot[2].title, "primeira");

        let ids: HashSet<_> = snapshot.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_duplicate_id_is_ignored() {
        let store = NotificationStore::new();
        let entry = notification("uma");
        assert!(store.insert(entry.clone()));
        assert!(!store.insert(entry));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_merge_key_admits_at_most_once() {
        let store = NotificationStore::new();
        assert!(store.insert(chat_message(44)));
        // Same chat message arriving again via the broadcast path, with a
        // different local id.
        assert!(!store.insert(chat_message(44)));
        assert!(store.insert(chat_message(45)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_read_is_monotonic() {
        let store = NotificationStore::new();
        let entry = notification("uma");
        let id = entry.id;
        store.insert(entry);
        store.insert(notification("outra"));

        store.mark_read(id);
        assert_eq!(store.unread_count(), 1);

        // Re-inserting the same id cannot resurrect an unread copy.
        let mut stale = store.snapshot().pop().expect("entry");
        stale.read = false;
        store.insert(stale);
        assert_eq!(store.unread_count(), 1);

        store.mark_all_read();
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_mark_read_absent_is_noop() {
        let store = NotificationStore::new();
        store.insert(notification("uma"));
        store.mark_read(NotificationId::generate());
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn test_unread_count_tracks_every_mutation() {
        let store = NotificationStore::new();
        assert_eq!(store.unread_count(), 0);

        store.insert(notification("uma"));
        store.insert(notification("duas"));
        assert_eq!(store.unread_count(), 2);

        let first = store.snapshot()[0].id;
        store.mark_read(first);
        assert_eq!(store.unread_count(), 1);

        store.mark_all_read();
        assert_eq!(store.unread_count(), 0);

        store.clear();
        assert_eq!(store.unread_count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_forgets_merge_keys() {
        let store = NotificationStore::new();
        store.insert(chat_message(44));
        store.clear();
        assert!(store.insert(chat_message(44)));
    }

    #[test]
    fn test_recent_unread_limit() {
        let store = NotificationStore::new();
        for title in ["a", "b", "c", "d"] {
            store.insert(notification(title));
        }
        let recent = store.recent_unread(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].title, "d");
        assert_eq!(recent[2].title, "b");
    }
}
