//! WebSocket message types for the TTS streaming endpoint.
//!
//! Outbound commands are serialized to single JSON text frames:
//!
//! - [`GenerationRequest`]: start (or continue) a synthesis turn
//! - [`CancelContextRequest`]: cancel all in-flight work for a context
//!
//! Inbound frames are JSON objects keyed by a `type` discriminator and
//! parsed through [`TtsEvent::parse`]:
//!
//! - `chunk` → [`AudioChunkEvent`] (base64 audio, decoded during parsing)
//! - `timestamps` → [`WordTimestampsEvent`]
//! - `phoneme_timestamps` → [`PhonemeTimestampsEvent`]
//! - `flush_done` → [`FlushDoneEvent`]
//! - `done` → [`DoneEvent`]
//! - `error` → [`ErrorEvent`]
//!
//! Unknown discriminators map to [`TtsEvent::Unknown`] for forward
//! compatibility; absent or null optional fields (notably `context_id`)
//! deserialize to `None`, never a parse failure.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{GenerationConfig, OutputFormat, VoiceSpec, models};

// =============================================================================
// Outbound Commands (Client to Server)
// =============================================================================

/// Streaming synthesis request.
///
/// `model_id`, `transcript`, `voice`, `generation_config` and
/// `output_format` are always emitted; every other field is omitted from
/// the wire when unset.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Model to synthesize with
    pub model_id: String,
    /// Text to speak
    pub transcript: String,
    /// Voice selector
    pub voice: VoiceSpec,
    /// Volume/speed/emotion parameters
    pub generation_config: GenerationConfig,
    /// Audio output format
    pub output_format: OutputFormat,
    /// Input language hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Context correlating multi-turn generations over one session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    /// Continue the previous generation in the same context
    #[serde(rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_: Option<bool>,
    /// Maximum buffering delay before audio is emitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_buffer_delay_ms: Option<u32>,
    /// Flush buffered audio for this context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flush: Option<bool>,
    /// Request word-level timestamps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_timestamps: Option<bool>,
    /// Request phoneme-level timestamps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_phoneme_timestamps: Option<bool>,
    /// Normalize timestamps against the original transcript
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_normalized_timestamps: Option<bool>,
    /// Pronunciation dictionary to apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation_dict_id: Option<String>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            model_id: models::SONIC_3.to_string(),
            transcript: String::new(),
            voice: VoiceSpec::default(),
            generation_config: GenerationConfig::default(),
            output_format: OutputFormat::default(),
            language: None,
            context_id: None,
            continue_: None,
            max_buffer_delay_ms: None,
            flush: None,
            add_timestamps: None,
            add_phoneme_timestamps: None,
            use_normalized_timestamps: None,
            pronunciation_dict_id: None,
        }
    }
}

/// Cancels all in-flight generations for one context.
#[derive(Debug, Clone, Serialize)]
pub struct CancelContextRequest {
    /// Context to cancel
    pub context_id: String,
    /// Always `true`
    pub cancel: bool,
}

impl CancelContextRequest {
    /// Build a cancel command for `context_id`.
    pub fn new(context_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
            cancel: true,
        }
    }
}

// =============================================================================
// Inbound Events (Server to Client)
// =============================================================================

fn de_base64_audio<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    BASE64
        .decode(encoded.as_bytes())
        .map(Bytes::from)
        .map_err(serde::de::Error::custom)
}

/// One chunk of synthesized audio.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioChunkEvent {
    /// Decoded audio bytes (the wire carries base64)
    #[serde(deserialize_with = "de_base64_audio")]
    pub data: Bytes,
    /// Whether this is the last chunk of the turn
    #[serde(default)]
    pub done: bool,
    /// Service status code
    #[serde(default)]
    pub status_code: i32,
    /// Model step time in milliseconds
    #[serde(default)]
    pub step_time: f64,
    /// Originating context, if any
    #[serde(default)]
    pub context_id: Option<String>,
}

/// Word-level timing data for a stretch of synthesized speech.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordTimestamps {
    /// Words in emission order
    #[serde(default)]
    pub words: Vec<String>,
    /// Start time per word, in seconds
    #[serde(default)]
    pub start: Vec<f64>,
    /// End time per word, in seconds
    #[serde(default)]
    pub end: Vec<f64>,
}

/// Word timestamps event (`type == "timestamps"`).
#[derive(Debug, Clone, Deserialize)]
pub struct WordTimestampsEvent {
    /// Timing batches, one per flushed span
    #[serde(default)]
    pub word_timestamps: Vec<WordTimestamps>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub context_id: Option<String>,
}

/// Phoneme-level timing data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhonemeTimestamps {
    /// Phonemes in emission order
    #[serde(default)]
    pub phonemes: Vec<String>,
    /// Start time per phoneme, in seconds
    #[serde(default)]
    pub start: Vec<f64>,
    /// End time per phoneme, in seconds
    #[serde(default)]
    pub end: Vec<f64>,
}

/// Phoneme timestamps event (`type == "phoneme_timestamps"`).
#[derive(Debug, Clone, Deserialize)]
pub struct PhonemeTimestampsEvent {
    #[serde(default)]
    pub phoneme_timestamps: PhonemeTimestamps,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub context_id: Option<String>,
}

/// Buffered audio for a context has been flushed.
#[derive(Debug, Clone, Deserialize)]
pub struct FlushDoneEvent {
    /// Identifier of the completed flush
    #[serde(default)]
    pub flush_id: i64,
    #[serde(default)]
    pub flush_done: bool,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub context_id: Option<String>,
}

/// A generation turn has finished.
#[derive(Debug, Clone, Deserialize)]
pub struct DoneEvent {
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub context_id: Option<String>,
}

/// Service-side error for this session or context.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEvent {
    /// Human-readable error description
    pub error: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub context_id: Option<String>,
}

// =============================================================================
// Event Enum and Parsing
// =============================================================================

/// All inbound TTS streaming events.
#[derive(Debug)]
pub enum TtsEvent {
    /// Synthesized audio chunk
    Chunk(AudioChunkEvent),
    /// Word-level timestamps
    WordTimestamps(WordTimestampsEvent),
    /// Phoneme-level timestamps
    PhonemeTimestamps(PhonemeTimestampsEvent),
    /// Flush completion
    FlushDone(FlushDoneEvent),
    /// Turn completion
    Done(DoneEvent),
    /// Service error
    Error(ErrorEvent),
    /// Unrecognized discriminator (forward compatibility)
    Unknown(String),
}

impl TtsEvent {
    /// Parse one inbound text frame.
    ///
    /// Peeks the required `type` field, then deserializes the matching
    /// variant. Unrecognized discriminators become [`TtsEvent::Unknown`];
    /// a missing `type` or missing required variant field is a parse error.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct TypePeek {
            #[serde(rename = "type")]
            event_type: String,
        }

        let peek: TypePeek = serde_json::from_str(text)?;

        match peek.event_type.as_str() {
            "chunk" => Ok(Self::Chunk(serde_json::from_str(text)?)),
            "timestamps" => Ok(Self::WordTimestamps(serde_json::from_str(text)?)),
            "phoneme_timestamps" => Ok(Self::PhonemeTimestamps(serde_json::from_str(text)?)),
            "flush_done" => Ok(Self::FlushDone(serde_json::from_str(text)?)),
            "done" => Ok(Self::Done(serde_json::from_str(text)?)),
            "error" => Ok(Self::Error(serde_json::from_str(text)?)),
            _ => Ok(Self::Unknown(peek.event_type)),
        }
    }
}
