//! Desktop notification sink.

use notify_rust::Notification;
use tracing::debug;

use super::NotificationSink;

/// How long a desktop notification stays on screen, in milliseconds.
const TIMEOUT_MS: i32 = 5000;

/// Mirrors notifications to the desktop via the platform notification
/// service.
#[derive(Debug, Default)]
pub struct DesktopSink;

impl DesktopSink {
    /// Create a sink.
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for DesktopSink {
    fn deliver(&self, title: &str, body: &str) {
        let title = title.to_string();
        let body = body.to_string();
        // The platform call can block on the notification bus; keep it off
        // the reader task.
        std::thread::spawn(move || {
            if let Err(e) = Notification::new()
                .appname("SchoolQuest")
                .summary(&title)
                .body(&body)
                .timeout(TIMEOUT_MS)
                .show()
            {
                debug!(error = %e, "Desktop notification failed");
            }
        });
    }
}
