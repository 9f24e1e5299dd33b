//! Outbound keep-alive for the realtime connection.
//!
//! The heartbeat task is the single owner of the write half of the socket:
//! it sends the liveness token on a fixed interval while the connection is
//! open, and sends the close frame exactly once when the shutdown signal
//! fires, regardless of which side initiated the teardown.

use std::time::Duration;

use futures::{Sink, SinkExt};
use tokio::sync::watch;
use tokio::time;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::message::types::HEARTBEAT_FRAME;

/// Run the heartbeat loop until the sink fails or shutdown is signalled.
///
/// Consumes the sink; the close frame sent on exit is the only close ever
/// issued for the connection.
pub(crate) async fn run_heartbeat<S>(
    mut sink: S,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    S: Sink<Message> + Unpin,
{
    let mut ticker = time::interval(interval);
    // The first tick completes immediately; the liveness token is only
    // needed after a full idle interval.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if sink.send(Message::text(HEARTBEAT_FRAME)).await.is_err() {
                    debug!("Heartbeat send failed, stopping");
                    break;
                }
            }
            changed = shutdown.changed() => {
                // A dropped sender means the owning session is gone.
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    let _ = sink.send(Message::Close(None)).await;
    let _ = sink.flush().await;
    debug!("Heartbeat loop ended");
}
