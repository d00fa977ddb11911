//! Integration tests for the streaming TTS client against an in-process
//! WebSocket stub.
//!
//! These tests verify:
//! - Upgrade request headers (API key, version) and endpoint path
//! - Event delivery order and callback sequencing
//! - Exactly-once disconnect notification on remote closure
//! - Idempotent disconnect and safe behavior after listener drop

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::handshake::server::{Request, Response};
use tokio_tungstenite::tungstenite::protocol::Message;

use cartesia_client::tts::{
    AudioChunkEvent, DoneEvent, ErrorEvent, FlushDoneEvent, GenerationRequest,
    PhonemeTimestampsEvent, TtsListener, TtsWebsocketClient, WordTimestampsEvent,
};
use cartesia_client::{CartesiaConfig, VoiceSpec};

const WAIT: Duration = Duration::from_secs(5);

/// Events observed by the test listener, in callback order.
#[derive(Debug, Clone, PartialEq)]
enum Observed {
    Connected,
    Disconnected(String),
    NetworkError(String),
    Chunk(Vec<u8>),
    Done,
    ServiceError(String),
}

struct ChannelListener {
    tx: mpsc::UnboundedSender<Observed>,
}

impl TtsListener for ChannelListener {
    fn on_connected(&self) {
        let _ = self.tx.send(Observed::Connected);
    }
    fn on_disconnected(&self, reason: &str) {
        let _ = self.tx.send(Observed::Disconnected(reason.to_string()));
    }
    fn on_network_error(&self, message: &str) {
        let _ = self.tx.send(Observed::NetworkError(message.to_string()));
    }
    fn on_audio_chunk(&self, chunk: &AudioChunkEvent) {
        let _ = self.tx.send(Observed::Chunk(chunk.data.to_vec()));
    }
    fn on_word_timestamps(&self, _: &WordTimestampsEvent) {}
    fn on_phoneme_timestamps(&self, _: &PhonemeTimestampsEvent) {}
    fn on_flush_done(&self, _: &FlushDoneEvent) {}
    fn on_done(&self, _: &DoneEvent) {
        let _ = self.tx.send(Observed::Done);
    }
    fn on_error(&self, event: &ErrorEvent) {
        let _ = self.tx.send(Observed::ServiceError(event.error.clone()));
    }
}

fn test_client(host: String) -> TtsWebsocketClient {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    TtsWebsocketClient::new(
        CartesiaConfig::new("test-key")
            .with_host(host)
            .without_tls(),
    )
}

fn channel_listener() -> (Arc<dyn TtsListener>, mpsc::UnboundedReceiver<Observed>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(ChannelListener { tx }), rx)
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<Observed>) -> Observed {
    timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

/// Bind a stub server and return its host:port.
async fn bind_stub() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());
    (listener, host)
}

/// The upgrade request carries the API key and version headers and targets
/// the TTS endpoint; events then arrive in server order, and a remote close
/// produces exactly one disconnect notification.
#[tokio::test]
async fn test_connect_receive_events_and_remote_close() {
    let (listener, host) = bind_stub().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_hdr_async(stream, |req: &Request, resp: Response| {
            assert_eq!(req.uri().path(), "/tts/websocket");
            assert_eq!(
                req.headers().get("X-API-Key").unwrap().to_str().unwrap(),
                "test-key"
            );
            assert_eq!(
                req.headers()
                    .get("Cartesia-Version")
                    .unwrap()
                    .to_str()
                    .unwrap(),
                "2025-04-16"
            );
            Ok(resp)
        })
        .await
        .unwrap();

        let (mut write, _read) = ws.split();
        // "audio" in base64
        write
            .send(Message::text(
                r#"{"type":"chunk","data":"YXVkaW8=","done":false,"status_code":206,"step_time":1.0}"#,
            ))
            .await
            .unwrap();
        write
            .send(Message::text(r#"{"type":"done","done":true,"status_code":200}"#))
            .await
            .unwrap();
        write.send(Message::Close(None)).await.unwrap();
    });

    let mut client = test_client(host);
    let (listener_arc, mut rx) = channel_listener();
    client.register_listener(Arc::downgrade(&listener_arc));
    client.connect_and_start().await.unwrap();

    assert_eq!(next_event(&mut rx).await, Observed::Connected);
    assert_eq!(next_event(&mut rx).await, Observed::Chunk(b"audio".to_vec()));
    assert_eq!(next_event(&mut rx).await, Observed::Done);
    // Remote close: exactly one disconnect, no network error
    assert!(matches!(next_event(&mut rx).await, Observed::Disconnected(_)));
    assert!(rx.try_recv().is_err());

    server.await.unwrap();
    client.disconnect().await;
}

/// Generation and cancel commands arrive at the server as JSON text frames
/// in send order.
#[tokio::test]
async fn test_send_generation_and_cancel_reach_server() {
    let (listener, host) = bind_stub().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let (_write, mut read) = ws.split();

        let first = read.next().await.unwrap().unwrap();
        let generation: serde_json::Value =
            serde_json::from_str(first.to_text().unwrap()).unwrap();
        assert_eq!(generation["transcript"], "Hello");
        assert_eq!(generation["voice"]["id"], "v-1");
        assert_eq!(generation["context_id"], "ctx-1");
        assert!(generation.get("flush").is_none());

        let second = read.next().await.unwrap().unwrap();
        let cancel: serde_json::Value = serde_json::from_str(second.to_text().unwrap()).unwrap();
        assert_eq!(cancel["context_id"], "ctx-1");
        assert_eq!(cancel["cancel"], true);
    });

    let mut client = test_client(host);
    let (listener_arc, mut rx) = channel_listener();
    client.register_listener(Arc::downgrade(&listener_arc));
    client.connect_and_start().await.unwrap();
    assert_eq!(next_event(&mut rx).await, Observed::Connected);

    client
        .send_generation(&GenerationRequest {
            transcript: "Hello".to_string(),
            voice: VoiceSpec::by_id("v-1"),
            context_id: Some("ctx-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    client.cancel_context("ctx-1").await.unwrap();

    server.await.unwrap();
    client.disconnect().await;
}

/// A caller-initiated disconnect returns true once, false afterwards, and
/// fires no listener callbacks.
#[tokio::test]
async fn test_disconnect_is_silent_and_idempotent() {
    let (listener, host) = bind_stub().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        // Serve until the client closes
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    let mut client = test_client(host);
    let (listener_arc, mut rx) = channel_listener();
    client.register_listener(Arc::downgrade(&listener_arc));
    client.connect_and_start().await.unwrap();
    assert_eq!(next_event(&mut rx).await, Observed::Connected);
    assert!(client.is_connected_and_started());

    assert!(client.disconnect().await);
    assert!(!client.disconnect().await);
    assert!(!client.is_connected_and_started());

    // No disconnect or error callbacks for an intentional shutdown
    assert!(rx.try_recv().is_err());
    server.await.unwrap();
}

/// Dropping the listener mid-session must not stall the session loop or
/// crash dispatch; the session still disconnects cleanly.
#[tokio::test]
async fn test_dropped_listener_does_not_stall_session() {
    let (listener, host) = bind_stub().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let (mut write, mut read) = ws.split();
        for _ in 0..10 {
            write
                .send(Message::text(r#"{"type":"done","done":true}"#))
                .await
                .unwrap();
        }
        while let Some(Ok(msg)) = read.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    let mut client = test_client(host);
    let (listener_arc, mut rx) = channel_listener();
    client.register_listener(Arc::downgrade(&listener_arc));
    client.connect_and_start().await.unwrap();
    assert_eq!(next_event(&mut rx).await, Observed::Connected);

    drop(listener_arc);
    // Give the server frames time to flow through dispatch
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(client.disconnect().await);
    server.await.unwrap();
}

/// A second connect on a running client fails without tearing the first
/// session down.
#[tokio::test]
async fn test_connect_while_running_fails() {
    let (listener, host) = bind_stub().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    let mut client = test_client(host);
    let (listener_arc, mut rx) = channel_listener();
    client.register_listener(Arc::downgrade(&listener_arc));
    client.connect_and_start().await.unwrap();
    assert_eq!(next_event(&mut rx).await, Observed::Connected);

    assert!(client.connect_and_start().await.is_err());
    assert!(client.is_connected_and_started());

    client.disconnect().await;
    server.await.unwrap();
}
