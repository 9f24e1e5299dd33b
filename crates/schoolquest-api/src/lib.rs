//! # schoolquest-api
//!
//! Typed HTTP client for the SchoolQuest backend. Provides:
//!
//! - An [`ApiClient`] that attaches the bearer token to every request and
//!   enforces the global 401 logout policy
//! - A [`SessionStore`] holding the token and cached user for one session
//! - Typed endpoint wrappers per resource (auth, missions, clans, shop,
//!   mural, push subscriptions)

pub mod client;
pub mod endpoints;
pub mod session;

pub use client::ApiClient;
pub use session::{AuthUser, SessionStore};
