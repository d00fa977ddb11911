//! Request types for the one-shot HTTP endpoints.

use serde::Serialize;

use crate::types::{GenerationConfig, OutputFormat, SttEncoding, VoiceSpec, models};

/// Gender filter values accepted by the voice list endpoint.
pub mod voice_genders {
    pub const MASCULINE: &str = "masculine";
    pub const FEMININE: &str = "feminine";
    pub const GENDER_NEUTRAL: &str = "gender_neutral";
}

/// One-shot synthesis request for `POST /tts/bytes`.
///
/// Mirrors the streaming [`crate::tts::GenerationRequest`] minus the
/// session-scoped fields (contexts, flushes, timestamps).
#[derive(Debug, Clone, Serialize)]
pub struct TtsBytesRequest {
    /// Model to synthesize with
    pub model_id: String,
    /// Text to speak
    pub transcript: String,
    /// Voice selector
    pub voice: VoiceSpec,
    /// Audio output format
    pub output_format: OutputFormat,
    /// Input language hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Target duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Named speed preset (`slow`, `normal`, `fast`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    /// Volume/speed/emotion parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    /// Pronunciation dictionary to apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation_dict_id: Option<String>,
    /// Persist the generation on the service side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save: Option<bool>,
}

impl Default for TtsBytesRequest {
    fn default() -> Self {
        Self {
            model_id: models::SONIC_3.to_string(),
            transcript: String::new(),
            voice: VoiceSpec::default(),
            output_format: OutputFormat::default(),
            language: None,
            duration: None,
            speed: None,
            generation_config: None,
            pronunciation_dict_id: None,
            save: None,
        }
    }
}

/// Filters for `GET /voices`.
///
/// All filters are optional except `gender`, which the endpoint always
/// receives (defaulting to `gender_neutral`).
#[derive(Debug, Clone)]
pub struct VoiceListRequest {
    /// Page size
    pub limit: Option<u32>,
    /// Cursor: return voices after this ID
    pub start_after: Option<String>,
    /// Cursor: return voices before this ID
    pub end_before: Option<String>,
    /// Only voices owned by the caller
    pub is_owner: Option<bool>,
    /// Only starred voices
    pub is_starred: Option<bool>,
    /// Gender filter, see [`voice_genders`]
    pub gender: String,
    /// Extra fields to expand in the response (e.g. `embedding`)
    pub expand: Vec<String>,
}

impl Default for VoiceListRequest {
    fn default() -> Self {
        Self {
            limit: None,
            start_after: None,
            end_before: None,
            is_owner: None,
            is_starred: None,
            gender: voice_genders::GENDER_NEUTRAL.to_string(),
            expand: Vec::new(),
        }
    }
}

impl VoiceListRequest {
    /// Build the query string, `?` included and every value
    /// percent-encoded. `gender` is always emitted.
    pub(crate) fn to_query_params(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        if let Some(start_after) = &self.start_after {
            query.append_pair("start_after", start_after);
        }
        if let Some(end_before) = &self.end_before {
            query.append_pair("end_before", end_before);
        }
        if let Some(is_owner) = self.is_owner {
            query.append_pair("is_owner", if is_owner { "true" } else { "false" });
        }
        if let Some(is_starred) = self.is_starred {
            query.append_pair("is_starred", if is_starred { "true" } else { "false" });
        }
        query.append_pair("gender", &self.gender);
        if !self.expand.is_empty() {
            query.append_pair("expand", &self.expand.join(","));
        }
        format!("?{}", query.finish())
    }
}

/// Parameters for `POST /stt` batch transcription.
///
/// `encoding` and `sample_rate` travel as query parameters; `model` goes
/// into the multipart body next to the audio file.
#[derive(Debug, Clone)]
pub struct SttBatchRequest {
    /// Input audio encoding
    pub encoding: SttEncoding,
    /// Input sample rate in Hz
    pub sample_rate: u32,
    /// Transcription model
    pub model: String,
}

impl Default for SttBatchRequest {
    fn default() -> Self {
        Self {
            encoding: SttEncoding::default(),
            sample_rate: crate::types::sample_rates::SR_16000,
            model: models::INK_WHISPER.to_string(),
        }
    }
}

impl SttBatchRequest {
    pub(crate) fn to_query_params(&self) -> String {
        format!(
            "?encoding={}&sample_rate={}",
            self.encoding.as_str(),
            self.sample_rate
        )
    }
}
