//! WebSocket message types for the STT streaming endpoint.
//!
//! Outbound traffic is raw binary audio plus two text control tokens
//! (`done`, `finalize`); there are no outbound JSON commands. Inbound
//! frames are JSON objects keyed by a `type` discriminator and parsed
//! through [`SttEvent::parse`]:
//!
//! - `transcript` → [`TranscriptionEvent`]
//! - `done` → acknowledgement of the `done` control token
//! - `flush_done` → acknowledgement of the `finalize` control token
//! - `error` → [`SttErrorEvent`]
//!
//! Unknown discriminators map to [`SttEvent::Unknown`] for forward
//! compatibility.

use serde::Deserialize;

/// Per-word timing inside a transcript.
#[derive(Debug, Clone, Deserialize)]
pub struct WordTiming {
    /// The recognized word
    pub word: String,
    /// Start time in seconds
    #[serde(default)]
    pub start: f64,
    /// End time in seconds
    #[serde(default)]
    pub end: f64,
}

/// A partial or final transcript (`type == "transcript"`).
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionEvent {
    /// Recognized text; may be empty for a keep-alive partial
    pub text: String,
    /// Whether this transcript is final for its audio span
    #[serde(default)]
    pub is_final: bool,
    /// Seconds of audio transcribed so far
    #[serde(default)]
    pub duration: f64,
    /// Detected or configured language
    #[serde(default)]
    pub language: Option<String>,
    /// Server-side request identifier
    #[serde(default)]
    pub request_id: String,
    /// Word-level timings, when the service provides them
    #[serde(default)]
    pub words: Vec<WordTiming>,
}

/// Session-level acknowledgement carrying only a request id.
#[derive(Debug, Clone, Deserialize)]
pub struct SttAckEvent {
    #[serde(default)]
    pub request_id: String,
}

/// Service-side transcription error.
#[derive(Debug, Clone, Deserialize)]
pub struct SttErrorEvent {
    /// Human-readable error description
    #[serde(rename = "message")]
    pub message: String,
    #[serde(default)]
    pub request_id: String,
}

/// All inbound STT streaming events.
#[derive(Debug)]
pub enum SttEvent {
    /// Partial or final transcript
    Transcription(TranscriptionEvent),
    /// The service finished processing after a `done` token
    Done(SttAckEvent),
    /// The service flushed after a `finalize` token
    FlushDone(SttAckEvent),
    /// Service error
    Error(SttErrorEvent),
    /// Unrecognized discriminator (forward compatibility)
    Unknown(String),
}

impl SttEvent {
    /// Parse one inbound text frame.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct TypePeek {
            #[serde(rename = "type")]
            event_type: String,
        }

        let peek: TypePeek = serde_json::from_str(text)?;

        match peek.event_type.as_str() {
            "transcript" => Ok(Self::Transcription(serde_json::from_str(text)?)),
            "done" => Ok(Self::Done(serde_json::from_str(text)?)),
            "flush_done" => Ok(Self::FlushDone(serde_json::from_str(text)?)),
            "error" => Ok(Self::Error(serde_json::from_str(text)?)),
            _ => Ok(Self::Unknown(peek.event_type)),
        }
    }
}
