//! Push-event shim.
//!
//! Background pushes arrive as an optional JSON payload. Decoding fills in
//! the documented defaults for absent fields, and clicking the displayed
//! notification opens the embedded URL (site root when none was sent).

use serde::Deserialize;
use tracing::warn;

/// Default title when the payload is absent.
pub const DEFAULT_TITLE: &str = "SchoolQuest";
/// Default body when the payload is absent.
pub const DEFAULT_BODY: &str = "Nova notificação!";
/// Default icon asset.
pub const DEFAULT_ICON: &str = "/pwa-192x192.png";
/// Default click target.
pub const DEFAULT_URL: &str = "/";

#[derive(Debug, Deserialize)]
struct PushPayload {
    title: Option<String>,
    body: Option<String>,
    icon: Option<String>,
    url: Option<String>,
}

/// A push notification ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushNotification {
    /// Display title.
    pub title: String,
    /// Display body.
    pub body: String,
    /// Icon asset path.
    pub icon: String,
    url: String,
}

impl PushNotification {
    /// Decode an optional push payload, defaulting every absent field.
    ///
    /// An unparseable payload is treated the same as an absent one.
    pub fn decode(data: Option<&[u8]>) -> Self {
        let payload = data.and_then(|bytes| {
            serde_json::from_slice::<PushPayload>(bytes)
                .map_err(|e| warn!(error = %e, "Dropping malformed push payload"))
                .ok()
        });

        match payload {
            Some(payload) => Self {
                title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                body: payload.body.unwrap_or_else(|| DEFAULT_BODY.to_string()),
                icon: payload.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
                url: payload.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            },
            None => Self {
                title: DEFAULT_TITLE.to_string(),
                body: DEFAULT_BODY.to_string(),
                icon: DEFAULT_ICON.to_string(),
                url: DEFAULT_URL.to_string(),
            },
        }
    }

    /// The target opened when the notification is clicked; the notification
    /// itself is dismissed.
    pub fn click_target(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_payload() {
        let push = PushNotification::decode(Some(
            b"{\"title\": \"Miss\xC3\xA3o validada\", \"body\": \"+50 XP\", \"icon\": \"/icons/xp.png\", \"url\": \"/dashboard\"}",
        ));
        assert_eq!(push.title, "Missão validada");
        assert_eq!(push.body, "+50 XP");
        assert_eq!(push.icon, "/icons/xp.png");
        assert_eq!(push.click_target(), "/dashboard");
    }

    #[test]
    fn test_decode_absent_payload_uses_defaults() {
        let push = PushNotification::decode(None);
        assert_eq!(push.title, DEFAULT_TITLE);
        assert_eq!(push.body, DEFAULT_BODY);
        assert_eq!(push.icon, DEFAULT_ICON);
        assert_eq!(push.click_target(), DEFAULT_URL);
    }

    #[test]
    fn test_decode_partial_payload_fills_gaps() {
        let push = PushNotification::decode(Some(br#"{"title": "Oi"}"#));
        assert_eq!(push.title, "Oi");
        assert_eq!(push.body, DEFAULT_BODY);
        assert_eq!(push.click_target(), DEFAULT_URL);
    }

    #[test]
    fn test_decode_malformed_payload_uses_defaults() {
        let push = PushNotification::decode(Some(b"not json"));
        assert_eq!(push.title, DEFAULT_TITLE);
    }
}
