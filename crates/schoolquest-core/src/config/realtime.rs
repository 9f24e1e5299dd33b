//! Real-time WebSocket channel configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Heartbeat interval in seconds.
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_seconds: u64,
    /// Internal buffer size for the notification event channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_seconds: default_heartbeat_interval(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_heartbeat_interval() -> u64 {
    30
}

fn default_channel_buffer() -> usize {
    256
}
