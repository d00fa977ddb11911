//! Rust client for the Cartesia speech platform.
//!
//! Two surfaces share one [`CartesiaConfig`]:
//!
//! - [`http::CartesiaClient`]: one-shot REST calls (service status, voice
//!   management, non-streaming synthesis, batch transcription)
//! - [`tts::TtsWebsocketClient`] / [`stt::SttWebsocketClient`]: persistent
//!   WebSocket sessions for streaming synthesis and transcription, with
//!   events delivered to weakly-held listeners
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cartesia_client::{CartesiaConfig, GenerationRequest, VoiceSpec};
//! use cartesia_client::tts::{TtsListener, TtsWebsocketClient};
//!
//! struct Printer;
//!
//! impl TtsListener for Printer {
//!     fn on_connected(&self) {}
//!     fn on_disconnected(&self, reason: &str) {
//!         eprintln!("session ended: {reason}");
//!     }
//!     fn on_network_error(&self, message: &str) {
//!         eprintln!("network error: {message}");
//!     }
//!     fn on_audio_chunk(&self, chunk: &cartesia_client::tts::AudioChunkEvent) {
//!         println!("got {} bytes of audio", chunk.data.len());
//!     }
//!     fn on_word_timestamps(&self, _: &cartesia_client::tts::WordTimestampsEvent) {}
//!     fn on_phoneme_timestamps(&self, _: &cartesia_client::tts::PhonemeTimestampsEvent) {}
//!     fn on_flush_done(&self, _: &cartesia_client::tts::FlushDoneEvent) {}
//!     fn on_done(&self, _: &cartesia_client::tts::DoneEvent) {}
//!     fn on_error(&self, event: &cartesia_client::tts::ErrorEvent) {
//!         eprintln!("service error: {}", event.error);
//!     }
//! }
//!
//! # async fn run() -> cartesia_client::CartesiaResult<()> {
//! let config = CartesiaConfig::new(std::env::var("CARTESIA_API_KEY").unwrap_or_default());
//! let mut client = TtsWebsocketClient::new(config);
//!
//! let listener: Arc<dyn TtsListener> = Arc::new(Printer);
//! client.register_listener(Arc::downgrade(&listener));
//! client.connect_and_start().await?;
//!
//! client
//!     .send_generation(&GenerationRequest {
//!         transcript: "Hello from Rust.".to_string(),
//!         voice: VoiceSpec::by_id("your-voice-id"),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod stt;
pub mod tts;
pub mod types;

mod tls;
pub(crate) mod ws;

// Re-export the types most callers need at the crate root
pub use config::{ApiVersion, CartesiaConfig};
pub use error::{CartesiaError, CartesiaResult};
pub use tts::GenerationRequest;
pub use types::{
    GenerationConfig, OutputFormat, SttEncoding, TtsEncoding, VoiceMode, VoiceSpec,
};
