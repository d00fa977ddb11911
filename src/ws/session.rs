//! Persistent WebSocket session management.
//!
//! One [`WebSocketSession`] owns one upgraded connection to a streaming
//! endpoint plus the single background task that services it. The task runs
//! a `select!` loop over three sources: the outbound frame channel fed by
//! [`WebSocketSession::send`], the inbound frame stream, and a shutdown
//! signal fired by [`WebSocketSession::disconnect`].
//!
//! # Lifecycle
//!
//! ```text
//! created ──connect()──▶ connected ──start_receive_loop()──▶ running
//!    ▲                                                          │
//!    └──────────────────── disconnect() ◀───────────────────────┘
//! ```
//!
//! A session can be reconnected after a clean disconnect. Exactly one
//! background task exists per running session, and it is the only context
//! that ever invokes the delivery callbacks, so callbacks are never
//! re-entrant and never overlap.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::handshake::client::generate_key;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{Connector, MaybeTlsStream, WebSocketStream, connect_async_tls_with_config};
use tracing::{debug, error, info, warn};

use crate::config::{CartesiaConfig, USER_AGENT};
use crate::error::{CartesiaError, CartesiaResult};
use crate::tls;

/// How long `disconnect` waits for the session task to drain before
/// aborting it.
const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Depth of the outbound frame queue. The caller is responsible for pacing
/// writes; this bound only prevents unbounded memory growth if the remote
/// stalls.
const OUTBOUND_QUEUE_DEPTH: usize = 32;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One frame queued for transmission.
#[derive(Debug)]
pub(crate) enum OutboundFrame {
    /// JSON command or control token
    Text(String),
    /// Raw audio bytes
    Binary(Bytes),
}

/// Raw inbound text payload handler (the event dispatcher).
pub(crate) type DataCallback = Box<dyn Fn(&str) + Send>;
/// Invoked once per session loss with a human-readable reason.
pub(crate) type DisconnectedCallback = Box<dyn Fn(&str) + Send>;
/// Invoked for transport faults that are not clean closures.
pub(crate) type NetworkErrorCallback = Box<dyn Fn(&str) + Send>;

struct ActiveLoop {
    outbound_tx: mpsc::Sender<OutboundFrame>,
    shutdown_tx: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

/// A single logical WebSocket session bound to one service endpoint.
pub(crate) struct WebSocketSession {
    config: CartesiaConfig,
    endpoint: &'static str,
    /// Upgraded connection waiting for `start_receive_loop`
    pending: Option<WsStream>,
    /// Running session loop
    active: Option<ActiveLoop>,
    /// Set before teardown so the loop suppresses callbacks for a
    /// caller-initiated shutdown
    should_stop: Arc<AtomicBool>,
}

impl WebSocketSession {
    pub(crate) fn new(config: CartesiaConfig, endpoint: &'static str) -> Self {
        Self {
            config,
            endpoint,
            pending: None,
            active: None,
            should_stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the session loop is currently running.
    pub(crate) fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| !a.handle.is_finished())
    }

    /// Open the connection: TCP, TLS handshake (SNI = configured host,
    /// verification per config), then the WebSocket upgrade against
    /// `endpoint + query`, with `headers` merged into the upgrade request.
    ///
    /// Fails with [`CartesiaError::AlreadyConnected`] without side effects
    /// if a connection or running loop already exists. Any handshake
    /// failure leaves no partial state behind.
    pub(crate) async fn connect(
        &mut self,
        headers: &[(&str, String)],
        query: &str,
    ) -> CartesiaResult<()> {
        if self.pending.is_some() || self.is_running() {
            warn!(endpoint = self.endpoint, "connect called on an already-connected session");
            return Err(CartesiaError::AlreadyConnected);
        }

        let url = self.config.websocket_url(self.endpoint, query);
        debug!(endpoint = self.endpoint, "opening WebSocket connection");

        let mut builder = tokio_tungstenite::tungstenite::http::Request::builder()
            .method("GET")
            .uri(url)
            .header("Host", self.config.host.as_str())
            .header("Upgrade", "websocket")
            .header("Connection", "upgrade")
            .header("Sec-WebSocket-Key", generate_key())
            .header("Sec-WebSocket-Version", "13")
            .header("User-Agent", USER_AGENT);
        for (name, value) in headers {
            builder = builder.header(*name, value.as_str());
        }
        let request = builder.body(()).map_err(|e| {
            CartesiaError::ConnectionFailed(format!("failed to build upgrade request: {e}"))
        })?;

        let connector = if self.config.use_tls {
            Some(Connector::NativeTls(tls::build_tls_connector(&self.config)?))
        } else {
            None
        };

        let (ws_stream, _response) = connect_async_tls_with_config(request, None, false, connector)
            .await
            .map_err(|e| {
                CartesiaError::ConnectionFailed(format!("WebSocket handshake failed: {e}"))
            })?;

        info!(endpoint = self.endpoint, "WebSocket connected");
        self.should_stop.store(false, Ordering::Release);
        self.pending = Some(ws_stream);
        Ok(())
    }

    /// Start the session loop on the connection opened by `connect`.
    ///
    /// `on_connected` fires synchronously before the loop task exists, so
    /// no inbound frame can be delivered ahead of it.
    pub(crate) fn start_receive_loop(
        &mut self,
        on_data: DataCallback,
        on_connected: impl FnOnce(),
        on_disconnected: DisconnectedCallback,
        on_error: NetworkErrorCallback,
    ) -> CartesiaResult<()> {
        let ws = self.pending.take().ok_or(CartesiaError::NotConnected)?;

        on_connected();

        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_QUEUE_DEPTH);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let should_stop = self.should_stop.clone();
        let endpoint = self.endpoint;

        let handle = tokio::spawn(run_session_loop(
            ws,
            endpoint,
            outbound_rx,
            shutdown_rx,
            should_stop,
            on_data,
            on_disconnected,
            on_error,
        ));

        self.active = Some(ActiveLoop {
            outbound_tx,
            shutdown_tx,
            handle,
        });
        Ok(())
    }

    /// Queue exactly one frame for transmission, in caller order.
    ///
    /// Returns [`CartesiaError::NotConnected`] if no session loop is
    /// running. Write failures inside the loop terminate the session via
    /// the error callbacks; they are never retried.
    pub(crate) async fn send(&self, frame: OutboundFrame) -> CartesiaResult<()> {
        let Some(active) = self.active.as_ref() else {
            warn!(endpoint = self.endpoint, "send called on a disconnected session");
            return Err(CartesiaError::NotConnected);
        };
        active
            .outbound_tx
            .send(frame)
            .await
            .map_err(|_| CartesiaError::NotConnected)
    }

    /// Tear the session down. Returns `false` if already disconnected.
    ///
    /// Teardown order: set the stop flag (suppresses further callbacks),
    /// signal the loop's shutdown channel (which also unblocks a parked
    /// read), then wait for the task to exit, aborting it if it overruns
    /// [`DISCONNECT_TIMEOUT`]. Each step is best-effort; a late failure
    /// cannot prevent the method from returning.
    pub(crate) async fn disconnect(&mut self) -> bool {
        if self.pending.is_none() && self.active.is_none() {
            return false;
        }

        self.should_stop.store(true, Ordering::Release);

        // Connected but the loop was never started: close the handle directly.
        if let Some(mut ws) = self.pending.take() {
            let _ = ws.close(None).await;
        }

        if let Some(active) = self.active.take() {
            let _ = active.shutdown_tx.send(());
            let mut handle = active.handle;
            if timeout(DISCONNECT_TIMEOUT, &mut handle).await.is_err() {
                warn!(
                    endpoint = self.endpoint,
                    "session loop did not exit within {:?}, aborting", DISCONNECT_TIMEOUT
                );
                handle.abort();
                let _ = handle.await;
            }
        }

        info!(endpoint = self.endpoint, "WebSocket disconnected");
        true
    }
}

impl Drop for WebSocketSession {
    fn drop(&mut self) {
        // Dropping without disconnect: stop the loop; the task aborts its
        // socket when the shutdown sender is dropped with it.
        self.should_stop.store(true, Ordering::Release);
        if let Some(active) = self.active.take() {
            let _ = active.shutdown_tx.send(());
        }
    }
}

/// Classify a transport error as an expected disconnect.
///
/// Returns the disconnect reason for closures that are normal session
/// endings (peer close, EOF, reset, abort) and `None` for genuine faults.
fn expected_disconnect(err: &WsError) -> Option<String> {
    use tokio_tungstenite::tungstenite::error::ProtocolError;

    match err {
        WsError::ConnectionClosed => Some("connection closed".to_string()),
        WsError::AlreadyClosed => Some("connection already closed".to_string()),
        WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
            Some("connection reset by peer".to_string())
        }
        WsError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe => Some(format!("connection lost: {io_err}")),
            _ => None,
        },
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_session_loop(
    ws: WsStream,
    endpoint: &'static str,
    mut outbound_rx: mpsc::Receiver<OutboundFrame>,
    mut shutdown_rx: oneshot::Receiver<()>,
    should_stop: Arc<AtomicBool>,
    on_data: DataCallback,
    on_disconnected: DisconnectedCallback,
    on_error: NetworkErrorCallback,
) {
    let (mut ws_sink, mut ws_stream) = ws.split();

    loop {
        tokio::select! {
            Some(frame) = outbound_rx.recv() => {
                let message = match frame {
                    OutboundFrame::Text(text) => Message::Text(text.into()),
                    OutboundFrame::Binary(data) => Message::Binary(data),
                };
                if let Err(e) = ws_sink.send(message).await {
                    if should_stop.load(Ordering::Acquire) {
                        debug!(endpoint, "write failed during shutdown: {e}");
                    } else {
                        let reason = format!("write failed: {e}");
                        error!(endpoint, "{reason}");
                        on_error(&reason);
                        on_disconnected(&reason);
                    }
                    break;
                }
            }

            inbound = ws_stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if !should_stop.load(Ordering::Acquire) && !text.is_empty() {
                            on_data(text.as_str());
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        if !should_stop.load(Ordering::Acquire) {
                            let reason = frame
                                .map(|f| f.reason.to_string())
                                .filter(|r| !r.is_empty())
                                .unwrap_or_else(|| "connection closed by peer".to_string());
                            info!(endpoint, "peer closed session: {reason}");
                            on_disconnected(&reason);
                        }
                        break;
                    }
                    Some(Ok(Message::Binary(data))) => {
                        // Neither streaming endpoint sends binary frames
                        debug!(endpoint, "ignoring {}-byte binary frame", data.len());
                    }
                    Some(Ok(_)) => {
                        // Ping/pong are handled by the protocol layer
                    }
                    Some(Err(e)) => {
                        if should_stop.load(Ordering::Acquire) {
                            debug!(endpoint, "read failed during shutdown: {e}");
                        } else if let Some(reason) = expected_disconnect(&e) {
                            info!(endpoint, "session ended: {reason}");
                            on_disconnected(&reason);
                        } else {
                            let message = format!("WebSocket error: {e}");
                            error!(endpoint, "{message}");
                            on_error(&message);
                            on_disconnected(&message);
                        }
                        break;
                    }
                    None => {
                        if !should_stop.load(Ordering::Acquire) {
                            info!(endpoint, "WebSocket stream ended");
                            on_disconnected("connection closed");
                        }
                        break;
                    }
                }
            }

            _ = &mut shutdown_rx => {
                debug!(endpoint, "shutdown requested");
                // Best-effort graceful close; the handle may already be broken
                let _ = ws_sink.send(Message::Close(None)).await;
                break;
            }
        }
    }

    debug!(endpoint, "session loop exited");
}
