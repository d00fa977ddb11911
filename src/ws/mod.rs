//! WebSocket session core shared by the TTS and STT streaming clients.
//!
//! - [`session`]: connection lifecycle and the background session loop
//! - [`listener`]: weak single-subscriber listener registry

pub(crate) mod listener;
pub(crate) mod session;

pub(crate) use listener::ListenerRegistry;
pub(crate) use session::{OutboundFrame, WebSocketSession};
