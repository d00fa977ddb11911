//! Streaming speech-to-text client.

use std::sync::Arc;
use std::sync::Weak;

use bytes::Bytes;
use tracing::warn;

use crate::config::CartesiaConfig;
use crate::error::CartesiaResult;
use crate::stt::messages::SttEvent;
use crate::types::{SttEncoding, models, sample_rates};
use crate::ws::{ListenerRegistry, OutboundFrame, WebSocketSession};

/// WebSocket endpoint for streaming transcription.
const STT_ENDPOINT: &str = "/stt/websocket";

/// Signals end of audio input; the service finishes and closes.
const CONTROL_DONE: &str = "done";

/// Forces the service to flush its transcription buffer.
const CONTROL_FINALIZE: &str = "finalize";

/// Stream parameters for a transcription session.
///
/// Sent as query parameters of the upgrade request, which also carries the
/// API key; the STT endpoint does not authenticate via headers.
#[derive(Debug, Clone)]
pub struct SttStreamOptions {
    /// Transcription model
    pub model: String,
    /// Input language code
    pub language: String,
    /// Input audio encoding
    pub encoding: SttEncoding,
    /// Input sample rate in Hz
    pub sample_rate: u32,
    /// Volume floor below which audio is treated as silence (0.0 to 1.0)
    pub min_volume: f64,
}

impl Default for SttStreamOptions {
    fn default() -> Self {
        Self {
            model: models::INK_WHISPER.to_string(),
            language: "en".to_string(),
            encoding: SttEncoding::default(),
            sample_rate: sample_rates::SR_16000,
            min_volume: 0.0,
        }
    }
}

impl SttStreamOptions {
    /// Build the upgrade query string, percent-encoding every value.
    fn to_query(&self, api_key: &str) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("model", &self.model)
            .append_pair("language", &self.language)
            .append_pair("encoding", self.encoding.as_str())
            .append_pair("sample_rate", &self.sample_rate.to_string())
            .append_pair("min_volume", &self.min_volume.to_string())
            .append_pair("api_key", api_key);
        format!("?{}", query.finish())
    }
}

/// Receives STT session and transcription events.
///
/// All callbacks run on the session's background task, one at a time and in
/// arrival order.
pub trait SttListener: Send + Sync {
    /// The session is connected and the event loop is about to start.
    fn on_connected(&self);
    /// The session ended, with a human-readable reason. Fired exactly once
    /// per unsolicited session loss and never for caller-initiated
    /// disconnects.
    fn on_disconnected(&self, reason: &str);
    /// A transport fault occurred that was not a clean closure.
    fn on_network_error(&self, message: &str);
    /// A partial or final transcript arrived.
    fn on_transcription(&self, event: &super::messages::TranscriptionEvent);
    /// The service finished processing after a `done` control token.
    fn on_done(&self, event: &super::messages::SttAckEvent);
    /// The service flushed after a `finalize` control token.
    fn on_flush_done(&self, event: &super::messages::SttAckEvent);
    /// The service reported a transcription error.
    fn on_error(&self, event: &super::messages::SttErrorEvent);
}

/// Persistent streaming transcription client.
///
/// One client owns one [`WebSocketSession`] against the STT endpoint. Audio
/// travels as binary frames via [`SttWebsocketClient::write_audio`]; the
/// session ends with [`SttWebsocketClient::send_done`] followed by the
/// service closing, or an explicit [`SttWebsocketClient::disconnect`].
pub struct SttWebsocketClient {
    config: CartesiaConfig,
    options: SttStreamOptions,
    session: WebSocketSession,
    registry: Arc<ListenerRegistry<dyn SttListener>>,
}

impl SttWebsocketClient {
    /// Create a client. No I/O happens until
    /// [`SttWebsocketClient::connect_and_start`].
    pub fn new(config: CartesiaConfig, options: SttStreamOptions) -> Self {
        let session = WebSocketSession::new(config.clone(), STT_ENDPOINT);
        Self {
            config,
            options,
            session,
            registry: Arc::new(ListenerRegistry::new()),
        }
    }

    /// Register the listener, replacing any previous one. The client keeps
    /// only a weak reference; the caller retains ownership.
    pub fn register_listener(&self, listener: Weak<dyn SttListener>) {
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

    /// Connect to the STT endpoint and start the event loop.
    ///
    /// Stream parameters and the API key travel in the upgrade request's
    /// query string. The listener's `on_connected` fires synchronously
    /// before this method returns, ahead of any inbound event.
    pub async fn connect_and_start(&mut self) -> CartesiaResult<()> {
        let query = self.options.to_query(&self.config.api_key);
        self.session.connect(&[], &query).await?;

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

    /// Stream a slice of audio in the configured encoding. Chunks are
    /// transmitted in call order.
    pub async fn write_audio(&self, audio: Bytes) -> CartesiaResult<()> {
        self.session.send(OutboundFrame::Binary(audio)).await
    }

    /// Signal that no more audio will be sent. The service responds with a
    /// final `done` event and closes the session.
    pub async fn send_done(&self) -> CartesiaResult<()> {
        self.session
            .send(OutboundFrame::Text(CONTROL_DONE.to_string()))
            .await
    }

    /// Force the service to flush buffered audio into a final transcript
    /// without ending the session.
    pub async fn send_finalize(&self) -> CartesiaResult<()> {
        self.session
            .send(OutboundFrame::Text(CONTROL_FINALIZE.to_string()))
            .await
    }

    /// Tear the session down. Returns `false` if already disconnected.
    /// No listener callbacks fire for a disconnect initiated here.
    pub async fn disconnect(&mut self) -> bool {
        self.session.disconnect().await
    }
}

/// Route one inbound text frame to the registered listener.
fn dispatch_event(registry: &ListenerRegistry<dyn SttListener>, text: &str) {
    match SttEvent::parse(text) {
        Ok(SttEvent::Transcription(event)) => registry.notify(|l| l.on_transcription(&event)),
        Ok(SttEvent::Done(event)) => registry.notify(|l| l.on_done(&event)),
        Ok(SttEvent::FlushDone(event)) => registry.notify(|l| l.on_flush_done(&event)),
        Ok(SttEvent::Error(event)) => registry.notify(|l| l.on_error(&event)),
        Ok(SttEvent::Unknown(event_type)) => {
            warn!("ignoring unknown STT event type: {event_type}");
        }
        Err(e) => {
            warn!("failed to parse STT event, dropping frame: {e}");
        }
    }
}
