//! Mural: the school's social feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use schoolquest_core::result::AppResult;
use schoolquest_core::types::id::{PostId, UserId};

use crate::client::ApiClient;

/// A mural post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post id.
    pub id: PostId,
    /// Text content.
    #[serde(rename = "conteudo")]
    pub content: String,
    /// Attached image URL.
    #[serde(rename = "imagem_url")]
    pub image_url: Option<String>,
    /// Author.
    pub user_id: UserId,
    /// Author display name.
    #[serde(rename = "user_nome")]
    pub user_name: String,
    /// Author avatar URL.
    pub user_avatar: Option<String>,
    /// Like count.
    pub likes: i64,
    /// Whether the current user liked it.
    #[serde(default)]
    pub liked_by_me: bool,
    /// Creation time.
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a post.
#[derive(Debug, Clone, Serialize)]
pub struct PostCreate {
    /// Text content.
    #[serde(rename = "conteudo")]
    pub content: String,
    /// Attached image URL.
    #[serde(rename = "imagem_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// List the school's posts, newest first.
pub async fn list(client: &ApiClient) -> AppResult<Vec<Post>> {
    client.get("/mural/").await
}

/// Publish a post.
pub async fn create(client: &ApiClient, post: &PostCreate) -> AppResult<Post> {
    client.post("/mural/", post).await
}

/// Toggle a like on a post.
pub async fn like(client: &ApiClient, post: PostId) -> AppResult<serde_json::Value> {
    client.post_empty(&format!("/mural/{post}/like")).await
}

/// Delete a post (author or staff).
pub async fn delete(client: &ApiClient, post: PostId) -> AppResult<serde_json::Value> {
    client.delete(&format!("/mural/{post}")).await
}
