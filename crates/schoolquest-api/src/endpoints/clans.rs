//! Clans: membership, invites, and chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use schoolquest_core::result::AppResult;
use schoolquest_core::types::id::{ClanId, MessageId, SchoolId, UserId};

use crate::client::ApiClient;

/// A student-formed clan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clan {
    /// Clan id.
    pub id: ClanId,
    /// Clan name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Optional description.
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    /// Leader's user id.
    #[serde(rename = "lider_id")]
    pub leader_id: UserId,
    /// School scope.
    #[serde(rename = "escola_id")]
    pub school_id: SchoolId,
    /// Creation time.
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

/// Payload for founding a clan.
#[derive(Debug, Clone, Serialize)]
pub struct ClanCreate {
    /// Clan name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Optional description.
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One clan member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClanMember {
    /// Membership id.
    pub id: i64,
    /// The member's user id.
    pub user_id: UserId,
    /// Display name.
    #[serde(rename = "user_nome")]
    pub user_name: String,
    /// Clan role (`lider` or `membro`).
    #[serde(rename = "papel")]
    pub role: String,
    /// Avatar URL.
    pub user_avatar: Option<String>,
}

/// A pending invite for the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClanInvite {
    /// Invite id.
    pub id: i64,
    /// The inviting clan.
    pub clan_id: ClanId,
    /// Clan display name.
    #[serde(rename = "clan_nome")]
    pub clan_name: String,
    /// Invite status.
    pub status: String,
    /// When it was sent.
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

/// A clan chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message id, the merge key for optimistic/broadcast de-duplication.
    pub id: MessageId,
    /// Owning clan.
    pub clan_id: ClanId,
    /// Sender.
    pub user_id: UserId,
    /// Sender display name.
    pub user_name: String,
    /// Sender avatar URL.
    pub user_avatar: Option<String>,
    /// Message body.
    pub message: String,
    /// Server receive time.
    pub created_at: DateTime<Utc>,
    /// Whether the message was edited.
    pub edited: bool,
}

/// List clans in the current user's school.
pub async fn list(client: &ApiClient) -> AppResult<Vec<Clan>> {
    client.get("/clans/").await
}

/// The current user's clan, if they belong to one.
pub async fn my_clan(client: &ApiClient) -> AppResult<Option<Clan>> {
    client.get("/clans/me").await
}

/// Found a new clan; the creator becomes leader.
pub async fn create(client: &ApiClient, clan: &ClanCreate) -> AppResult<Clan> {
    client.post("/clans/", clan).await
}

/// List a clan's members.
pub async fn members(client: &ApiClient, clan: ClanId) -> AppResult<Vec<ClanMember>> {
    client.get(&format!("/clans/{clan}/members")).await
}

/// Invite a schoolmate by email (leader only).
pub async fn invite(client: &ApiClient, email: &str) -> AppResult<serde_json::Value> {
    client.post_empty(&format!("/clans/invite?email={email}")).await
}

/// Invites pending for the current user.
pub async fn my_invites(client: &ApiClient) -> AppResult<Vec<ClanInvite>> {
    client.get("/clans/invites/my").await
}

/// Accept an invite.
pub async fn accept_invite(client: &ApiClient, invite_id: i64) -> AppResult<serde_json::Value> {
    client.post_empty(&format!("/clans/invites/{invite_id}/accept")).await
}

/// Leave the current clan.
pub async fn leave(client: &ApiClient) -> AppResult<serde_json::Value> {
    client.post_empty("/clans/leave").await
}

/// Fetch a clan's chat history.
pub async fn messages(client: &ApiClient, clan: ClanId) -> AppResult<Vec<ChatMessage>> {
    client.get(&format!("/chat/clan/{clan}/messages")).await
}

#[derive(Debug, Serialize)]
struct MessageCreate<'a> {
    message: &'a str,
}

/// Send a chat message.
///
/// The returned message is what the sender merges locally; the same message
/// also arrives later over the real-time channel for every member, so
/// consumers merge by [`ChatMessage::id`] (the store's at-most-once rule).
pub async fn send_message(
    client: &ApiClient,
    clan: ClanId,
    message: &str,
) -> AppResult<ChatMessage> {
    client
        .post(&format!("/chat/clan/{clan}/messages"), &MessageCreate { message })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_round_trip() {
        let message: ChatMessage = serde_json::from_value(serde_json::json!({
            "id": 44,
            "clan_id": 2,
            "user_id": 9,
            "user_name": "Lia",
            "user_avatar": null,
            "message": "bora missão?",
            "created_at": "2025-03-02T15:30:00Z",
            "edited": false,
        }))
        .expect("message");
        assert_eq!(message.id, MessageId::new(44));
        assert_eq!(message.message, "bora missão?");
    }
}
