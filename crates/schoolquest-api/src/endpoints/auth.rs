//! Authentication: login, registration, profile.

use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolquest_core::error::AppError;
use schoolquest_core::result::AppResult;
use schoolquest_core::types::id::SchoolId;
use schoolquest_core::types::role::UserRole;

use crate::client::{ApiClient, AUTH_TOKEN_PATH};
use crate::session::AuthUser;

/// Login credentials, validated before they leave the client.
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    /// Account email.
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Plaintext password, sent only over the login form.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// New-account payload for `/users/`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    /// Account email.
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Display name.
    #[serde(rename = "nome")]
    #[validate(length(min = 2, message = "name is too short"))]
    pub name: String,
    /// Plaintext password.
    #[serde(rename = "senha")]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    /// Requested role.
    #[serde(rename = "papel")]
    pub role: UserRole,
    /// School to join.
    #[serde(rename = "escola_id", skip_serializing_if = "Option::is_none")]
    pub school_id: Option<SchoolId>,
}

#[derive(Debug, Deserialize)]
struct Token {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
}

/// Authenticate and populate the session.
///
/// Two steps, matching the backend contract: the OAuth2 form login issues
/// the token, then `/users/me` supplies the profile that gets cached for
/// role-based routing.
pub async fn login(client: &ApiClient, credentials: &Credentials) -> AppResult<AuthUser> {
    credentials
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let token: Token = client
        .post_form(
            AUTH_TOKEN_PATH,
            &[
                ("username", credentials.email.as_str()),
                ("password", credentials.password.as_str()),
            ],
        )
        .await?;

    client.session().set_token(token.access_token);

    let user: AuthUser = client.get("/users/me").await?;
    client.session().set_user(user.clone());
    Ok(user)
}

/// Create a new account. Does not log in.
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> AppResult<AuthUser> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    client.post("/users/", request).await
}

/// Fetch the current user's profile.
pub async fn me(client: &ApiClient) -> AppResult<AuthUser> {
    client.get("/users/me").await
}

/// End the session locally. The backend keeps no session state to revoke.
pub fn logout(client: &ApiClient) {
    client.session().clear();
}
