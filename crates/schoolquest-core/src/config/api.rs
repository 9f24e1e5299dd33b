//! Remote HTTP API configuration.

use serde::{Deserialize, Serialize};

/// Settings for the SchoolQuest HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL of the web frontend (used for outbound navigation links).
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Request timeout in seconds. Generous to ride out hosting cold starts.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            frontend_url: default_frontend_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    120
}
