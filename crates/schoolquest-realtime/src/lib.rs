//! # schoolquest-realtime
//!
//! Real-time notification pipeline for the SchoolQuest companion. Provides:
//!
//! - A WebSocket connection manager scoped to one authenticated session
//! - A fixed-interval heartbeat with guaranteed single teardown
//! - Frame decoding into locally identified notification records
//! - The in-memory notification store with an at-most-once-per-id merge rule
//! - Bell and toast presentation views derived from the store
//! - A permission-gated bridge to the OS notification surface

pub mod bridge;
pub mod connection;
pub mod message;
pub mod notification;
pub mod view;

pub use bridge::NotificationBridge;
pub use connection::manager::{RealtimeClient, RealtimeSession};
pub use connection::state::ConnectionState;
pub use message::types::{Notification, NotificationKind};
pub use notification::store::NotificationStore;
pub use view::bell::BellView;
pub use view::toast::ToastView;
