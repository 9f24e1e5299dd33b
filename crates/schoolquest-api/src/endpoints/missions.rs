//! Missions: listing, assignment responses, completion, validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use schoolquest_core::result::AppResult;
use schoolquest_core::types::id::{MissionId, SubmissionId, UserId};

use crate::client::ApiClient;

/// A mission as defined by staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    /// Mission id.
    pub id: MissionId,
    /// Title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Full description.
    #[serde(rename = "descricao")]
    pub description: String,
    /// XP awarded on completion.
    #[serde(rename = "pontos")]
    pub points: i64,
    /// Coins awarded on completion.
    #[serde(rename = "moedas")]
    pub coins: i64,
    /// Category tag.
    #[serde(rename = "categoria")]
    pub category: String,
    /// Creating professor.
    #[serde(rename = "criador_id")]
    pub creator_id: UserId,
    /// Availability status.
    #[serde(default)]
    pub status: Option<String>,
    /// Creation time.
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a mission (professor only).
#[derive(Debug, Clone, Serialize)]
pub struct MissionCreate {
    /// Title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Full description.
    #[serde(rename = "descricao")]
    pub description: String,
    /// XP awarded on completion.
    #[serde(rename = "pontos")]
    pub points: i64,
    /// Coins awarded on completion.
    #[serde(rename = "moedas")]
    pub coins: i64,
    /// Category tag.
    #[serde(rename = "categoria")]
    pub category: String,
}

/// A mission assigned to a specific student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedMission {
    /// Assignment id.
    pub id: SubmissionId,
    /// The underlying mission id.
    #[serde(rename = "missao_id")]
    pub mission_id: MissionId,
    /// The student it was assigned to.
    #[serde(rename = "aluno_id")]
    pub student_id: UserId,
    /// Assignment status (pending/accepted/declined/completed).
    pub status: String,
    /// When it was assigned.
    #[serde(rename = "data_atribuicao")]
    pub assigned_at: DateTime<Utc>,
    /// When the student responded, if they have.
    #[serde(rename = "data_resposta")]
    pub responded_at: Option<DateTime<Utc>>,
    /// The full mission, when expanded by the server.
    #[serde(rename = "missao")]
    pub mission: Option<Mission>,
    /// Student display name, on staff-facing listings.
    #[serde(rename = "aluno_nome")]
    pub student_name: Option<String>,
}

/// List missions visible to the current user.
pub async fn list(client: &ApiClient) -> AppResult<Vec<Mission>> {
    client.get("/missoes/").await
}

/// Fetch one mission.
pub async fn get(client: &ApiClient, id: MissionId) -> AppResult<Mission> {
    client.get(&format!("/missoes/{id}")).await
}

/// Create a mission (professor only).
pub async fn create(client: &ApiClient, mission: &MissionCreate) -> AppResult<Mission> {
    client.post("/missoes/", mission).await
}

/// Missions assigned to the current student.
pub async fn received(client: &ApiClient) -> AppResult<Vec<AssignedMission>> {
    client.get("/missoes/recebidas").await
}

/// Accept an assigned mission.
pub async fn accept(client: &ApiClient, id: SubmissionId) -> AppResult<serde_json::Value> {
    client.post_empty(&format!("/missoes/atribuidas/{id}/aceitar")).await
}

/// Decline an assigned mission.
pub async fn decline(client: &ApiClient, id: SubmissionId) -> AppResult<serde_json::Value> {
    client.post_empty(&format!("/missoes/atribuidas/{id}/recusar")).await
}

/// Submit a mission as completed.
pub async fn complete(client: &ApiClient, id: MissionId) -> AppResult<serde_json::Value> {
    client.post_empty(&format!("/missoes/{id}/completar")).await
}

/// Submissions awaiting validation (professor only).
pub async fn pending(client: &ApiClient) -> AppResult<Vec<AssignedMission>> {
    client.get("/missoes/pendentes").await
}

/// Approve or reject a submission (professor only).
pub async fn validate(
    client: &ApiClient,
    submission: SubmissionId,
    approved: bool,
) -> AppResult<serde_json::Value> {
    client
        .post_empty(&format!("/missoes/validar/{submission}?aprovado={approved}"))
        .await
}
