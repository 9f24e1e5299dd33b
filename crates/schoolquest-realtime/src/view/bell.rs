//! Bell widget: the full notification history with badge, per-kind icons,
//! and click navigation.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use schoolquest_core::types::id::NotificationId;

use crate::bridge::NotificationBridge;
use crate::message::types::NotificationKind;
use crate::notification::store::NotificationStore;

/// Badge display cap; anything above renders as `9+`.
const BADGE_CAP: usize = 9;

/// Navigation target for a clicked notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The student dashboard.
    Dashboard,
    /// The clans page.
    Clans,
    /// The achievements page.
    Achievements,
}

impl Route {
    /// Frontend path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Clans => "/clans",
            Self::Achievements => "/achievements",
        }
    }
}

/// Icon for a notification kind. Unknown kinds get the default bell.
pub fn icon(kind: &NotificationKind) -> &'static str {
    match kind {
        NotificationKind::MissionAssigned => "📋",
        NotificationKind::MissionValidated => "✅",
        NotificationKind::MissionRejected => "❌",
        NotificationKind::ClanInvite => "🛡️",
        NotificationKind::ClanMessage => "💬",
        NotificationKind::NewAchievement => "🏆",
        NotificationKind::SystemAnnouncement => "📢",
        _ => "🔔",
    }
}

/// Navigation target for a notification kind; `None` means clicking only
/// marks it read.
pub fn route(kind: &NotificationKind) -> Option<Route> {
    match kind {
        NotificationKind::MissionAssigned
        | NotificationKind::MissionValidated
        | NotificationKind::MissionRejected => Some(Route::Dashboard),
        NotificationKind::ClanInvite | NotificationKind::ClanMessage => Some(Route::Clans),
        NotificationKind::NewAchievement => Some(Route::Achievements),
        _ => None,
    }
}

/// Human-readable age of a notification relative to `now`.
pub fn relative_age(received_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - received_at;
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Agora".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m atrás");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h atrás");
    }
    format!("{}d atrás", elapsed.num_days())
}

/// One rendered dropdown row.
#[derive(Debug, Clone)]
pub struct BellItem {
    /// Backing notification id.
    pub id: NotificationId,
    /// Kind icon.
    pub icon: &'static str,
    /// Title line.
    pub title: String,
    /// Body line.
    pub message: String,
    /// Relative age label.
    pub age: String,
    /// Whether the entry has been read.
    pub read: bool,
}

/// The bell widget over a shared store.
///
/// Constructing the widget performs the single opportunistic permission
/// request for the OS notification surface.
#[derive(Debug)]
pub struct BellView {
    store: Arc<NotificationStore>,
    bridge: Option<Arc<NotificationBridge>>,
}

impl BellView {
    /// Create the widget over the session's store.
    pub fn new(store: Arc<NotificationStore>, bridge: Option<Arc<NotificationBridge>>) -> Self {
        if let Some(bridge) = &bridge {
            bridge.request_permission();
        }
        Self { store, bridge }
    }

    /// Badge label: `None` when everything is read, the count up to 9,
    /// `9+` beyond.
    pub fn badge(&self) -> Option<String> {
        match self.store.unread_count() {
            0 => None,
            n if n > BADGE_CAP => Some("9+".to_string()),
            n => Some(n.to_string()),
        }
    }

    /// All rows, newest first.
    pub fn items(&self, now: DateTime<Utc>) -> Vec<BellItem> {
        self.store
            .snapshot()
            .into_iter()
            .map(|n| BellItem {
                id: n.id,
                icon: icon(&n.kind),
                title: n.title,
                message: n.message,
                age: relative_age(n.received_at, now),
                read: n.read,
            })
            .collect()
    }

    /// Click a row: mark it read and return where to navigate.
    pub fn open(&self, id: NotificationId) -> Option<Route> {
        self.store.mark_read(id);
        self.store
            .snapshot()
            .into_iter()
            .find(|n| n.id == id)
            .and_then(|n| route(&n.kind))
    }

    /// Mark every entry read.
    pub fn mark_all_read(&self) {
        self.store.mark_all_read();
    }

    /// Empty the history.
    pub fn clear_all(&self) {
        self.store.clear();
    }

    /// The bridge this widget requested permission on, if any.
    pub fn bridge(&self) -> Option<&Arc<NotificationBridge>> {
        self.bridge.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::bridge::Permission;
    use crate::message::decoder::{FrameOutcome, decode_frame};

    fn store_with(frames: &[&str]) -> Arc<NotificationStore> {
        let store = Arc::new(NotificationStore::new());
        for frame in frames {
            if let FrameOutcome::Notification(n) = decode_frame(frame) {
                store.insert(n);
            }
        }
        store
    }

    #[test]
    fn test_badge_caps_at_nine_plus() {
        let store = Arc::new(NotificationStore::new());
        let view = BellView::new(store.clone(), None);
        assert_eq!(view.badge(), None);

        for i in 0..12 {
            if let FrameOutcome::Notification(n) = decode_frame(&format!(
                r#"{{"type": "system_announcement", "title": "{i}", "message": "m"}}"#
            )) {
                store.insert(n);
            }
        }
        assert_eq!(view.badge().as_deref(), Some("9+"));

        view.mark_all_read();
        assert_eq!(view.badge(), None);
    }

    #[test]
    fn test_open_marks_read_and_routes() {
        let store = store_with(&[
            r#"{"type": "mission_assigned", "title": "Nova missão", "message": "m"}"#,
        ]);
        let view = BellView::new(store.clone(), None);

        let id = store.snapshot()[0].id;
        assert_eq!(view.open(id), Some(Route::Dashboard));
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_open_unknown_kind_does_not_navigate() {
        let store = store_with(&[r#"{"type": "powerup_expired", "title": "t", "message": "m"}"#]);
        let view = BellView::new(store.clone(), None);

        let id = store.snapshot()[0].id;
        assert_eq!(view.open(id), None);
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_construction_requests_permission_once() {
        let bridge = Arc::new(NotificationBridge::new(Box::new(
            crate::bridge::desktop::DesktopSink::new(),
        )));
        assert_eq!(bridge.permission(), Permission::Unasked);
        let _view = BellView::new(Arc::new(NotificationStore::new()), Some(bridge.clone()));
        assert_ne!(bridge.permission(), Permission::Unasked);
    }

    #[test]
    fn test_relative_age_buckets() {
        let now = Utc::now();
        assert_eq!(relative_age(now, now), "Agora");
        assert_eq!(relative_age(now - Duration::minutes(5), now), "5m atrás");
        assert_eq!(relative_age(now - Duration::hours(3), now), "3h atrás");
        assert_eq!(relative_age(now - Duration::days(2), now), "2d atrás");
    }

    #[test]
    fn test_items_render_icons() {
        let store = store_with(&[
            r#"{"type": "clan_invite", "title": "Convite", "message": "m"}"#,
            r#"{"type": "mystery", "title": "?", "message": "m"}"#,
        ]);
        let view = BellView::new(store, None);
        let items = view.items(Utc::now());
        assert_eq!(items[0].icon, "🔔");
        assert_eq!(items[1].icon, "🛡️");
    }
}
