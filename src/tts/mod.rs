//! Streaming text-to-speech over a persistent WebSocket session.
//!
//! [`TtsWebsocketClient`] opens one session against the synthesis endpoint,
//! sends [`GenerationRequest`] commands, and delivers decoded events to a
//! registered [`TtsListener`].

mod client;
mod messages;

pub use client::{TtsListener, TtsWebsocketClient};
pub use messages::{
    AudioChunkEvent, CancelContextRequest, DoneEvent, ErrorEvent, FlushDoneEvent,
    GenerationRequest, PhonemeTimestamps, PhonemeTimestampsEvent, TtsEvent, WordTimestamps,
    WordTimestampsEvent,
};
