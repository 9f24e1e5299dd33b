//! Session-scoped authentication state.
//!
//! The browser client kept the token and cached user in ambient storage
//! readable from anywhere. Here that state is an explicitly constructed
//! [`SessionStore`] injected into whatever needs it, created on session
//! start and cleared on logout.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use schoolquest_core::types::id::{SchoolId, UserId};
use schoolquest_core::types::role::UserRole;

/// The authenticated user profile as returned by `/users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User id.
    pub id: UserId,
    /// Account email.
    pub email: String,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Platform role.
    #[serde(rename = "papel")]
    pub role: UserRole,
    /// Season points.
    #[serde(rename = "pontos")]
    pub points: i64,
    /// Spendable coins.
    #[serde(rename = "moedas")]
    pub coins: i64,
    /// Lifetime experience points.
    pub xp: i64,
    /// Server-computed level.
    #[serde(rename = "nivel")]
    pub level: u32,
    /// Consecutive-day activity streak.
    #[serde(rename = "streak_count", default)]
    pub streak: u32,
    /// School the user belongs to, if any.
    #[serde(rename = "escola_id")]
    pub school_id: Option<SchoolId>,
    /// School display name.
    #[serde(rename = "escola_nome")]
    pub school_name: Option<String>,
    /// Grade/class display name.
    #[serde(rename = "serie_nome")]
    pub grade_name: Option<String>,
    /// Profile bio.
    pub bio: Option<String>,
    /// Free-form interests text.
    #[serde(rename = "interesses")]
    pub interests: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone)]
struct Session {
    token: String,
    user: Option<AuthUser>,
}

/// Holds the bearer token and cached user for one authenticated session.
///
/// All mutation happens through `set_token` / `set_user` / `clear`; readers
/// get cheap clones. Interior mutability lets one store be shared between
/// the HTTP client and the realtime session.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create an empty (logged-out) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly issued token, starting a new session.
    ///
    /// Any previously cached user is discarded; the profile is re-fetched
    /// after login.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Session {
            token: token.into(),
            user: None,
        });
    }

    /// Cache the authenticated user profile.
    ///
    /// No-op when logged out; a user without a token is meaningless.
    pub fn set_user(&self, user: AuthUser) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(session) = guard.as_mut() {
            session.user = Some(user);
        }
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|s| s.token.clone())
    }

    /// The cached user profile, if fetched.
    pub fn user(&self) -> Option<AuthUser> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().and_then(|s| s.user.clone())
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.is_some()
    }

    /// Drop the token and cached user (logout).
    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthUser {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "aluna@example.com",
            "nome": "Aluna",
            "papel": "aluno",
            "pontos": 120,
            "moedas": 35,
            "xp": 240,
            "nivel": 3,
            "streak_count": 4,
            "escola_id": 2,
            "escola_nome": "Escola Central",
        }))
        .expect("user fixture")
    }

    #[test]
    fn test_token_then_user() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());

        store.set_token("jwt");
        assert_eq!(store.token().as_deref(), Some("jwt"));
        assert!(store.user().is_none());

        store.set_user(sample_user());
        assert_eq!(store.user().expect("user").name, "Aluna");
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = SessionStore::new();
        store.set_token("jwt");
        store.set_user(sample_user());

        store.clear();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_user_without_token_is_noop() {
        let store = SessionStore::new();
        store.set_user(sample_user());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_new_token_discards_stale_user() {
        let store = SessionStore::new();
        store.set_token("first");
        store.set_user(sample_user());

        store.set_token("second");
        assert!(store.user().is_none());
    }
}
