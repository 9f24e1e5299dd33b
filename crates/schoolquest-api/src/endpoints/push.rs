//! Web-push subscription management.
//!
//! The backend signs push messages with a VAPID key pair and exposes the
//! public key URL-safe-base64 encoded. Subscribing means registering the
//! platform push endpoint plus its encryption keys with the backend.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use schoolquest_core::error::AppError;
use schoolquest_core::result::AppResult;

use crate::client::ApiClient;

/// Encryption keys of a push subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// Client public key (P-256, base64url).
    pub p256dh: String,
    /// Shared auth secret (base64url).
    pub auth: String,
}

/// A platform push subscription, as registered with the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushSubscription {
    /// Push-service endpoint URL.
    pub endpoint: String,
    /// Encryption keys.
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Deserialize)]
struct VapidKeyResponse {
    #[serde(rename = "publicKey")]
    public_key: String,
}

/// Fetch the server's VAPID public key, decoded to raw bytes.
pub async fn vapid_public_key(client: &ApiClient) -> AppResult<Vec<u8>> {
    let response: VapidKeyResponse = client.get("/notifications/vapid_public_key").await?;
    decode_vapid_key(&response.public_key)
}

/// Decode a URL-safe-base64 VAPID key, tolerating padding.
pub fn decode_vapid_key(encoded: &str) -> AppResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .map_err(|e| AppError::validation(format!("Invalid VAPID public key: {e}")))
}

/// Register a push subscription with the backend.
pub async fn subscribe(
    client: &ApiClient,
    subscription: &PushSubscription,
) -> AppResult<serde_json::Value> {
    client.post("/notifications/subscribe", subscription).await
}

/// Ask the backend to deliver a test push to the current user.
pub async fn send_test(client: &ApiClient) -> AppResult<serde_json::Value> {
    client.post_empty("/notifications/send_test").await
}
