//! Notification record and wire frame type definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use schoolquest_core::types::id::NotificationId;

/// Literal text sent as the outbound keep-alive.
pub const HEARTBEAT_FRAME: &str = "ping";

/// Reserved tag on inbound frames acknowledging a heartbeat. Frames with
/// this tag carry no user-visible information and never reach the store.
pub const HEARTBEAT_ACK_TAG: &str = "pong";

/// Closed set of server event tags, with a pass-through for tags this
/// client version does not know. Unknown tags are stored as-is and fall
/// back to a default icon and no navigation at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// A mission was assigned to the student.
    MissionAssigned,
    /// A submitted mission was approved.
    MissionValidated,
    /// A submitted mission was rejected.
    MissionRejected,
    /// The student was invited to a clan.
    ClanInvite,
    /// A new message in the student's clan chat.
    ClanMessage,
    /// An achievement was unlocked.
    NewAchievement,
    /// A platform-wide announcement.
    SystemAnnouncement,
    /// A daily challenge became available.
    DailyChallenge,
    /// A school event started.
    EventStarted,
    /// A power-up expired.
    PowerupExpired,
    /// Any tag not in the closed set, preserved verbatim.
    Other(String),
}

impl NotificationKind {
    /// Parse a wire tag. Never fails; unknown tags become [`Self::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "mission_assigned" => Self::MissionAssigned,
            "mission_validated" => Self::MissionValidated,
            "mission_rejected" => Self::MissionRejected,
            "clan_invite" => Self::ClanInvite,
            "clan_message" => Self::ClanMessage,
            "new_achievement" => Self::NewAchievement,
            "system_announcement" => Self::SystemAnnouncement,
            "daily_challenge" => Self::DailyChallenge,
            "event_started" => Self::EventStarted,
            "powerup_expired" => Self::PowerupExpired,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire tag for this kind.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::MissionAssigned => "mission_assigned",
            Self::MissionValidated => "mission_validated",
            Self::MissionRejected => "mission_rejected",
            Self::ClanInvite => "clan_invite",
            Self::ClanMessage => "clan_message",
            Self::NewAchievement => "new_achievement",
            Self::SystemAnnouncement => "system_announcement",
            Self::DailyChallenge => "daily_challenge",
            Self::EventStarted => "event_started",
            Self::PowerupExpired => "powerup_expired",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl Serialize for NotificationKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for NotificationKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Raw shape of an inbound JSON frame.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerFrame {
    /// Event tag.
    #[serde(rename = "type")]
    pub tag: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Display body.
    #[serde(default)]
    pub message: String,
    /// Opaque type-specific context.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// A locally stored notification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Locally generated id, assigned at receipt time.
    pub id: NotificationId,
    /// Event kind, copied through from the server tag.
    pub kind: NotificationKind,
    /// Display title.
    pub title: String,
    /// Display body.
    pub message: String,
    /// Opaque type-specific context, copied through verbatim.
    pub data: Option<serde_json::Value>,
    /// Client-side receipt time.
    pub received_at: DateTime<Utc>,
    /// Read flag; transitions false to true only.
    pub read: bool,
}

impl Notification {
    /// Build a record from a decoded frame, stamped with a fresh local id
    /// and the current receipt time.
    pub fn from_frame(frame: ServerFrame) -> Self {
        Self {
            id: NotificationId::generate(),
            kind: NotificationKind::from_tag(&frame.tag),
            title: frame.title,
            message: frame.message,
            data: frame.data,
            received_at: Utc::now(),
            read: false,
        }
    }

    /// Server-supplied merge key, when the event mirrors an entity that can
    /// also arrive by another path (optimistic chat sends). Entries sharing
    /// a merge key are stored at most once.
    pub fn merge_key(&self) -> Option<String> {
        match &self.kind {
            NotificationKind::ClanMessage => self
                .data
                .as_ref()
                .and_then(|d| d.get("message_id"))
                .and_then(|id| id.as_i64())
                .map(|id| format!("clan_message:{id}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_known_tags() {
        let kind = NotificationKind::from_tag("mission_assigned");
        assert_eq!(kind, NotificationKind::MissionAssigned);
        assert_eq!(kind.as_tag(), "mission_assigned");
    }

    #[test]
    fn test_kind_preserves_unknown_tags() {
        let kind = NotificationKind::from_tag("future_feature");
        assert_eq!(kind, NotificationKind::Other("future_feature".to_string()));
        assert_eq!(kind.as_tag(), "future_feature");
    }

    #[test]
    fn test_merge_key_for_clan_message() {
        let frame: ServerFrame = serde_json::from_str(
            r#"{"type": "clan_message", "title": "Nova mensagem", "message": "Lia: oi",
                "data": {"clan_id": 2, "message_id": 44}}"#,
        )
        .expect("frame");
        let notification = Notification::from_frame(frame);
        assert_eq!(
            notification.merge_key().as_deref(),
            Some("clan_message:44")
        );
    }

    #[test]
    fn test_no_merge_key_without_message_id() {
        let frame: ServerFrame = serde_json::from_str(
            r#"{"type": "mission_assigned", "title": "Nova missão", "message": "Ler um livro"}"#,
        )
        .expect("frame");
        assert!(Notification::from_frame(frame).merge_key().is_none());
    }
}
