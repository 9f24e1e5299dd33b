//! Integration tests for the realtime pipeline against an in-process
//! WebSocket server.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{Request, Response};

use schoolquest_core::config::realtime::RealtimeConfig;
use schoolquest_core::types::id::UserId;
use schoolquest_realtime::connection::manager::RealtimeClient;
use schoolquest_realtime::connection::state::ConnectionState;

/// What the test server observed and relays back to the test body.
#[derive(Debug)]
enum ServerEvent {
    Path(String),
    Heartbeat,
    Closed,
}

fn test_config() -> RealtimeConfig {
    RealtimeConfig {
        heartbeat_interval_seconds: 1,
        ..RealtimeConfig::default()
    }
}

/// Bind a one-connection server that sends `frames` after the handshake
/// and reports inbound heartbeats and the connection end.
async fn spawn_server(frames: Vec<&'static str>) -> (String, mpsc::UnboundedReceiver<ServerEvent>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let path_tx = events_tx.clone();
        let mut socket = accept_hdr_async(stream, move |req: &Request, resp: Response| {
            let _ = path_tx.send(ServerEvent::Path(req.uri().path().to_string()));
            Ok(resp)
        })
        .await
        .expect("handshake");

        for frame in frames {
            socket.send(Message::text(frame)).await.expect("send frame");
        }

        loop {
            match socket.next().await {
                Some(Ok(Message::Text(text))) if text.as_str() == "ping" => {
                    let _ = events_tx.send(ServerEvent::Heartbeat);
                }
                Some(Ok(Message::Close(_))) | None => {
                    let _ = events_tx.send(ServerEvent::Closed);
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(_)) => {
                    let _ = events_tx.send(ServerEvent::Closed);
                    break;
                }
            }
        }
    });

    (format!("http://{addr}"), events_rx)
}

/// Poll until `cond` holds or two seconds pass.
async fn wait_until(mut cond: impl FnMut() -> bool) {
    timeout(Duration::from_secs(2), async {
        while !cond() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn test_frames_reach_the_store_in_arrival_order() {
    let (base_url, mut events) = spawn_server(vec![
        r#"{"type": "mission_assigned", "title": "primeira", "message": "m"}"#,
        r#"{"type": "pong"}"#,
        "definitely not json",
        r#"{"type": "clan_invite", "title": "segunda", "message": "m"}"#,
    ])
    .await;

    let client = RealtimeClient::new(base_url, test_config());
    let mut session = client.connect(UserId::new(1)).await.expect("connect");
    assert!(session.is_connected());

    // The user id is embedded in the handshake path.
    match events.recv().await.expect("path event") {
        ServerEvent::Path(path) => assert_eq!(path, "/ws/1"),
        other => panic!("expected path, got {other:?}"),
    }

    // Only the two valid notification frames land; the heartbeat ack and
    // the malformed frame are dropped without killing the connection.
    let store = session.store().clone();
    wait_until(|| store.len() == 2).await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot[0].title, "segunda");
    assert_eq!(snapshot[1].title, "primeira");
    assert_ne!(snapshot[0].id, snapshot[1].id);
    assert_eq!(store.unread_count(), 2);

    session.close().await;
}

#[tokio::test]
async fn test_heartbeat_reaches_the_server() {
    let (base_url, mut events) = spawn_server(vec![]).await;

    let client = RealtimeClient::new(base_url, test_config());
    let mut session = client.connect(UserId::new(7)).await.expect("connect");

    // Skip the handshake path event.
    let _ = events.recv().await;

    let event = timeout(Duration::from_secs(3), events.recv())
        .await
        .expect("heartbeat in time")
        .expect("server alive");
    assert!(matches!(event, ServerEvent::Heartbeat));

    session.close().await;
}

#[tokio::test]
async fn test_close_tears_down_exactly_once() {
    let (base_url, mut events) = spawn_server(vec![
        r#"{"type": "system_announcement", "title": "aviso", "message": "m"}"#,
    ])
    .await;

    let client = RealtimeClient::new(base_url, test_config());
    let mut session = client.connect(UserId::new(3)).await.expect("connect");

    let store = session.store().clone();
    wait_until(|| store.len() == 1).await;

    session.close().await;
    assert_eq!(session.state(), ConnectionState::Closed);
    assert!(!session.is_connected());

    // The server sees the connection end once.
    let saw_close = async {
        loop {
            match events.recv().await {
                Some(ServerEvent::Closed) => break,
                Some(_) => {}
                None => panic!("server ended without close"),
            }
        }
    };
    timeout(Duration::from_secs(2), saw_close).await.expect("close observed");

    // Closing again is a no-op, and the store is untouched by teardown.
    session.close().await;
    assert_eq!(store.len(), 1);
    assert_eq!(store.unread_count(), 1);
}

#[tokio::test]
async fn test_server_drop_moves_state_to_closed_without_reconnect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut socket = tokio_tungstenite::accept_async(stream).await.expect("handshake");
        socket
            .send(Message::text(
                r#"{"type": "mission_validated", "title": "ok", "message": "m"}"#,
            ))
            .await
            .expect("send");
        socket.close(None).await.expect("close");
        // One connection only: no further accept, so any reconnect attempt
        // would fail the test by timing out below.
    });

    let client = RealtimeClient::new(format!("http://{addr}"), test_config());
    let mut session = client.connect(UserId::new(9)).await.expect("connect");

    let store = session.store().clone();
    wait_until(|| store.len() == 1).await;

    while session.state() != ConnectionState::Closed {
        if session.state_changed().await == ConnectionState::Closed {
            break;
        }
    }
    assert!(!session.is_connected());

    // No replay, no retry: the store keeps what arrived before the drop.
    sleep(Duration::from_millis(200)).await;
    assert_eq!(store.len(), 1);

    session.close().await;
}
