//! Connection manager — owns the single realtime connection for one
//! authenticated session.
//!
//! At most one live connection exists per session. There is no automatic
//! reconnect: when the connection drops, the session goes `Closed` and
//! stays there until the caller builds a new one (a fresh login or an
//! explicit re-open).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use schoolquest_core::config::realtime::RealtimeConfig;
use schoolquest_core::error::AppError;
use schoolquest_core::result::AppResult;
use schoolquest_core::types::id::UserId;

use crate::bridge::NotificationBridge;
use crate::message::decoder::{FrameOutcome, decode_frame};
use crate::notification::store::NotificationStore;

use super::heartbeat::run_heartbeat;
use super::state::ConnectionState;

/// Derive the realtime endpoint from the HTTP base URL: scheme translated
/// to the WebSocket equivalent, host preserved, user id embedded in the
/// path.
pub fn websocket_url(base_url: &str, user_id: UserId) -> AppResult<String> {
    let base = base_url.trim_end_matches('/');
    let translated = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        return Err(AppError::configuration(format!(
            "API base URL must be http or https: {base_url}"
        )));
    };
    Ok(format!("{translated}/ws/{user_id}"))
}

/// Factory for realtime sessions.
#[derive(Debug, Clone)]
pub struct RealtimeClient {
    base_url: String,
    config: RealtimeConfig,
    bridge: Option<Arc<NotificationBridge>>,
}

impl RealtimeClient {
    /// Create a client against the given HTTP base URL.
    pub fn new(base_url: impl Into<String>, config: RealtimeConfig) -> Self {
        Self {
            base_url: base_url.into(),
            config,
            bridge: None,
        }
    }

    /// Mirror incoming notifications to an OS-level bridge.
    pub fn with_bridge(mut self, bridge: Arc<NotificationBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Open the connection for the given user and start the pipeline.
    ///
    /// The returned session owns a fresh, empty store; nothing sent while
    /// disconnected is replayed.
    pub async fn connect(&self, user_id: UserId) -> AppResult<RealtimeSession> {
        let url = websocket_url(&self.base_url, user_id)?;
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);

        let (socket, _) = connect_async(url.as_str()).await.map_err(|e| {
            let _ = state_tx.send(ConnectionState::Closed);
            AppError::transport(format!("WebSocket connect to {url} failed: {e}"))
        })?;

        info!(user_id = %user_id, url = %url, "Realtime connection established");
        let _ = state_tx.send(ConnectionState::Open);

        let (sink, stream) = socket.split();
        let store = Arc::new(NotificationStore::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let heartbeat = tokio::spawn(run_heartbeat(
            sink,
            Duration::from_secs(self.config.heartbeat_interval_seconds),
            shutdown_rx.clone(),
        ));

        let reader = tokio::spawn(run_reader(
            stream,
            store.clone(),
            self.bridge.clone(),
            state_tx,
            shutdown_tx.clone(),
            shutdown_rx,
        ));

        Ok(RealtimeSession {
            store,
            state: state_rx,
            shutdown: shutdown_tx,
            tasks: vec![heartbeat, reader],
            closed: AtomicBool::new(false),
        })
    }
}

/// Read inbound frames until the connection ends or shutdown is signalled.
async fn run_reader<S>(
    mut stream: S,
    store: Arc<NotificationStore>,
    bridge: Option<Arc<NotificationBridge>>,
    state: watch::Sender<ConnectionState>,
    shutdown_tx: watch::Sender<bool>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        handle_text(text.as_str(), &store, bridge.as_deref());
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("Realtime connection closed by server");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Realtime transport error");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    // Either side ending the connection flips the flag and stops the
    // heartbeat; the send fails harmlessly when close() already fired.
    let _ = shutdown_tx.send(true);
    let _ = state.send(ConnectionState::Closed);
}

fn handle_text(raw: &str, store: &NotificationStore, bridge: Option<&NotificationBridge>) {
    match decode_frame(raw) {
        FrameOutcome::Notification(notification) => {
            if store.insert(notification.clone()) {
                if let Some(bridge) = bridge {
                    bridge.mirror(&notification);
                }
            }
        }
        FrameOutcome::HeartbeatAck | FrameOutcome::Malformed => {}
    }
}

/// A live (or terminated) realtime session.
///
/// Owns the notification store and the background tasks. Closing is
/// idempotent and guarantees the socket close is issued exactly once and
/// the heartbeat timer is cancelled; no store mutation happens afterwards.
#[derive(Debug)]
pub struct RealtimeSession {
    store: Arc<NotificationStore>,
    state: watch::Receiver<ConnectionState>,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
    closed: AtomicBool,
}

impl RealtimeSession {
    /// The session's notification store.
    pub fn store(&self) -> &Arc<NotificationStore> {
        &self.store
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Whether the connection is open.
    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Wait for the next state change, returning the new state. Returns
    /// `Closed` once the pipeline has fully shut down.
    pub async fn state_changed(&mut self) -> ConnectionState {
        if self.state.changed().await.is_err() {
            return ConnectionState::Closed;
        }
        *self.state.borrow()
    }

    /// Tear the session down: cancel the heartbeat, close the socket, stop
    /// the reader. Idempotent; later calls return immediately.
    pub async fn close(&mut self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self.shutdown.send(true);
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
    }
}

impl Drop for RealtimeSession {
    fn drop(&mut self) {
        // Last-resort teardown for sessions dropped without close().
        if !self.closed.swap(true, Ordering::SeqCst) {
            let _ = self.shutdown.send(true);
            for task in &self.tasks {
                task.abort();
            }
        }
    }
}
