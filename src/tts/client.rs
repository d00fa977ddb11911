//! Streaming text-to-speech client.

use std::sync::Arc;
use std::sync::Weak;

use tracing::{debug, warn};

use crate::config::{CartesiaConfig, HEADER_API_KEY, HEADER_CARTESIA_VERSION};
use crate::error::CartesiaResult;
use crate::tts::messages::{CancelContextRequest, GenerationRequest, TtsEvent};
use crate::ws::{ListenerRegistry, OutboundFrame, WebSocketSession};

/// WebSocket endpoint for streaming synthesis.
const TTS_ENDPOINT: &str = "/tts/websocket";

/// Receives TTS session and synthesis events.
///
/// All callbacks run on the session's background task, one at a time and in
/// arrival order. Implementations must not block for long periods; doing so
/// stalls frame delivery for the whole session.
pub trait TtsListener: Send + Sync {
    /// The session is connected and the event loop is about to start.
    fn on_connected(&self);
    /// The session ended, with a human-readable reason. Fired exactly once
    /// per unsolicited session loss and never for caller-initiated
    /// disconnects.
    fn on_disconnected(&self, reason: &str);
    /// A transport fault occurred that was not a clean closure.
    fn on_network_error(&self, message: &str);
    /// A chunk of synthesized audio arrived (already base64-decoded).
    fn on_audio_chunk(&self, chunk: &super::messages::AudioChunkEvent);
    /// Word-level timestamps arrived.
    fn on_word_timestamps(&self, timestamps: &super::messages::WordTimestampsEvent);
    /// Phoneme-level timestamps arrived.
    fn on_phoneme_timestamps(&self, timestamps: &super::messages::PhonemeTimestampsEvent);
    /// A flush completed.
    fn on_flush_done(&self, event: &super::messages::FlushDoneEvent);
    /// A generation turn finished.
    fn on_done(&self, event: &super::messages::DoneEvent);
    /// The service reported an error for this session or context.
    fn on_error(&self, event: &super::messages::ErrorEvent);
}

/// Persistent streaming synthesis client.
///
/// One client owns one [`WebSocketSession`] against the TTS endpoint and a
/// single weakly-held listener. The client can be reconnected after a
/// disconnect; the listener registration survives reconnects.
pub struct TtsWebsocketClient {
    config: CartesiaConfig,
    session: WebSocketSession,
    registry: Arc<ListenerRegistry<dyn TtsListener>>,
}

impl TtsWebsocketClient {
    /// Create a client. No I/O happens until
    /// [`TtsWebsocketClient::connect_and_start`].
    pub fn new(config: CartesiaConfig) -> Self {
        let session = WebSocketSession::new(config.clone(), TTS_ENDPOINT);
        Self {
            config,
            session,
            registry: Arc::new(ListenerRegistry::new()),
        }
    }

    /// Register the listener, replacing any previous one. The client keeps
    /// only a weak reference; the caller retains ownership.
    pub fn register_listener(&self, listener: Weak<dyn TtsListener>) {
        self.registry.register(listener);
    }

    /// Remove the current listener, if any.
    pub fn unregister_listener(&self) {
        self.registry.unregister();
    }

    /// Whether the session is connected and its event loop is running.
    pub fn is_connected_and_started(&self) -> bool {
        self.session.is_running()
    }

    /// Connect to the TTS endpoint and start the event loop.
    ///
    /// Authentication travels in the upgrade request headers. The
    /// listener's `on_connected` fires synchronously before this method
    /// returns, ahead of any inbound event.
    pub async fn connect_and_start(&mut self) -> CartesiaResult<()> {
        let headers = [
            (HEADER_API_KEY, self.config.api_key.clone()),
            (
                HEADER_CARTESIA_VERSION,
                self.config.api_version.as_str().to_string(),
            ),
        ];
        self.session.connect(&headers, "").await?;

        let data_registry = self.registry.clone();
        let connected_registry = self.registry.clone();
        let disconnected_registry = self.registry.clone();
        let error_registry = self.registry.clone();

        self.session.start_receive_loop(
            Box::new(move |text| dispatch_event(&data_registry, text)),
            move || connected_registry.notify(|l| l.on_connected()),
            Box::new(move |reason| disconnected_registry.notify(|l| l.on_disconnected(reason))),
            Box::new(move |message| error_registry.notify(|l| l.on_network_error(message))),
        )
    }

    /// Send a generation request.
    pub async fn send_generation(&self, request: &GenerationRequest) -> CartesiaResult<()> {
        let payload = serde_json::to_string(request)?;
        self.session.send(OutboundFrame::Text(payload)).await
    }

    /// Cancel all in-flight generations for `context_id`.
    pub async fn cancel_context(&self, context_id: &str) -> CartesiaResult<()> {
        let payload = serde_json::to_string(&CancelContextRequest::new(context_id))?;
        self.session.send(OutboundFrame::Text(payload)).await
    }

    /// Tear the session down. Returns `false` if already disconnected.
    /// No listener callbacks fire for a disconnect initiated here.
    pub async fn disconnect(&mut self) -> bool {
        self.session.disconnect().await
    }
}

/// Route one inbound text frame to the registered listener.
fn dispatch_event(registry: &ListenerRegistry<dyn TtsListener>, text: &str) {
    match TtsEvent::parse(text) {
        Ok(TtsEvent::Chunk(event)) => registry.notify(|l| l.on_audio_chunk(&event)),
        Ok(TtsEvent::WordTimestamps(event)) => registry.notify(|l| l.on_word_timestamps(&event)),
        Ok(TtsEvent::PhonemeTimestamps(event)) => {
            registry.notify(|l| l.on_phoneme_timestamps(&event))
        }
        Ok(TtsEvent::FlushDone(event)) => registry.notify(|l| l.on_flush_done(&event)),
        Ok(TtsEvent::Done(event)) => registry.notify(|l| l.on_done(&event)),
        Ok(TtsEvent::Error(event)) => {
            debug!(context_id = ?event.context_id, "service error event: {}", event.error);
            registry.notify(|l| l.on_error(&event));
        }
        Ok(TtsEvent::Unknown(event_type)) => {
            warn!("ignoring unknown TTS event type: {event_type}");
        }
        Err(e) => {
            warn!("failed to parse TTS event, dropping frame: {e}");
        }
    }
}
