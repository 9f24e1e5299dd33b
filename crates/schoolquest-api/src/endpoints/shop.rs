//! Shop: rewards redeemable with coins.

use serde::{Deserialize, Serialize};

use schoolquest_core::result::AppResult;
use schoolquest_core::types::id::{RewardId, SchoolId};

use crate::client::ApiClient;

/// A redeemable reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    /// Reward id.
    pub id: RewardId,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Description.
    #[serde(rename = "descricao")]
    pub description: String,
    /// Coin cost.
    #[serde(rename = "custo")]
    pub cost: i64,
    /// Remaining stock.
    #[serde(rename = "estoque")]
    pub stock: i64,
    /// Image URL.
    #[serde(rename = "imagem_url")]
    pub image_url: Option<String>,
    /// School scope; `None` means platform-wide.
    #[serde(rename = "escola_id")]
    pub school_id: Option<SchoolId>,
}

/// A past redemption by the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Purchase id.
    pub id: i64,
    /// Reward name at purchase time.
    #[serde(rename = "reward_nome")]
    pub reward_name: String,
    /// Reward description at purchase time.
    #[serde(rename = "reward_descricao")]
    pub reward_description: String,
    /// Reward image at purchase time.
    #[serde(rename = "reward_imagem_url")]
    pub reward_image_url: Option<String>,
    /// Coins paid.
    #[serde(rename = "custo_pago")]
    pub cost_paid: i64,
    /// Purchase date (server-formatted string).
    #[serde(rename = "data_compra")]
    pub purchased_at: String,
    /// Fulfilment status.
    pub status: String,
}

/// Rewards available to the current user.
pub async fn list(client: &ApiClient) -> AppResult<Vec<Reward>> {
    client.get("/shop/").await
}

/// Redeem a reward, spending coins.
pub async fn buy(client: &ApiClient, reward: RewardId) -> AppResult<serde_json::Value> {
    client.post_empty(&format!("/shop/buy/{reward}")).await
}

/// The current user's redemption history.
pub async fn purchases(client: &ApiClient) -> AppResult<Vec<Purchase>> {
    client.get("/shop/purchases").await
}
