//! Streaming speech-to-text over a persistent WebSocket session.
//!
//! [`SttWebsocketClient`] streams binary audio to the transcription
//! endpoint and delivers decoded events to a registered [`SttListener`].

mod client;
mod messages;

pub use client::{SttListener, SttStreamOptions, SttWebsocketClient};
pub use messages::{SttAckEvent, SttErrorEvent, SttEvent, TranscriptionEvent, WordTiming};
