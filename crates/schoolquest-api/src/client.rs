//! HTTP client with bearer-token injection and global error handling.
//!
//! Mirrors the configured-once client of the browser app: every request
//! carries the session token, and any `401` outside the login endpoint
//! forcibly ends the session and redirects to the site root.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

use schoolquest_core::config::api::ApiConfig;
use schoolquest_core::error::AppError;
use schoolquest_core::result::AppResult;

use crate::session::SessionStore;

/// The login endpoint, exempt from the 401 logout policy.
pub const AUTH_TOKEN_PATH: &str = "/auth/token";

/// Callback invoked when the session is forcibly ended by a 401.
///
/// The argument is the navigation target (always the site root).
pub type UnauthorizedHook = Box<dyn Fn(&str) + Send + Sync>;

enum Body<'a, B: Serialize> {
    None,
    Json(&'a B),
    Form(&'a [(&'a str, &'a str)]),
}

/// HTTP client for the SchoolQuest backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    on_unauthorized: RwLock<Option<UnauthorizedHook>>,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            on_unauthorized: RwLock::new(None),
        })
    }

    /// Register the hook invoked when a 401 forces a logout.
    pub fn on_unauthorized(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        let mut guard = self.on_unauthorized.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Box::new(hook));
    }

    /// The shared session store.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute(Method::GET, path, Body::<()>::None).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.execute(Method::POST, path, Body::Json(body)).await
    }

    /// POST without a request body (action endpoints).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute(Method::POST, path, Body::<()>::None).await
    }

    /// POST a URL-encoded form (the OAuth2 login endpoint).
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> AppResult<T> {
        self.execute(Method::POST, path, Body::<()>::Form(form)).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.execute(Method::PUT, path, Body::Json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute(Method::DELETE, path, Body::<()>::None).await
    }

    async fn execute<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body<'_, B>,
    ) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), url.as_str());
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        request = match body {
            Body::None => request,
            Body::Json(b) => request.json(b),
            Body::Form(f) => request.form(f),
        };

        let response = request
            .send()
            .await
            .map_err(|e| AppError::transport(format!("{method} {url} failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| AppError::with_source(
                    schoolquest_core::error::ErrorKind::Serialization,
                    format!("Failed to decode {method} {url} response: {e}"),
                    e,
                ));
        }

        let body_text = response.text().await.unwrap_or_default();
        self.enforce_auth_policy(status, path);

        error!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            body = %body_text,
            "API request failed"
        );

        Err(AppError::from_status(status, detail_message(&body_text)))
    }

    /// The global 401 policy: end the session and navigate to the root,
    /// except when the failing call is the login endpoint itself.
    fn enforce_auth_policy(&self, status: StatusCode, url: &str) {
        if status != StatusCode::UNAUTHORIZED || url.contains(AUTH_TOKEN_PATH) {
            return;
        }
        self.session.clear();
        let guard = self.on_unauthorized.read().unwrap_or_else(|e| e.into_inner());
        if let Some(hook) = guard.as_ref() {
            hook("/");
        }
    }
}

/// Extract the server-provided `detail` message from an error body, falling
/// back to the raw body.
fn detail_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}
