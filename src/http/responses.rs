//! Response types for the one-shot HTTP endpoints.

use serde::Deserialize;

/// Service status for `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfo {
    /// API version string reported by the service
    pub version: String,
    /// Whether the service considers itself healthy
    pub ok: bool,
}

/// A voice as returned by the voice endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub description: String,
    pub gender: String,
    pub language: String,
    pub created_at: String,
    pub is_owner: bool,
    pub is_public: bool,
    /// Only present when the caller starred or unstarred the voice
    #[serde(default)]
    pub is_starred: Option<bool>,
    /// Only present when requested via `expand=embedding`
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

/// One page of `GET /voices` results.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceListPage {
    /// Voices on this page
    #[serde(rename = "data")]
    pub voices: Vec<Voice>,
    /// Whether another page exists past this one
    pub has_more: bool,
}

/// Per-word timing in a batch transcription.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchWordTiming {
    pub word: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
}

/// Result of `POST /stt` batch transcription.
#[derive(Debug, Clone, Deserialize)]
pub struct SttBatchResponse {
    /// Transcribed text
    pub text: String,
    /// Language of the transcription
    #[serde(default)]
    pub language: Option<String>,
    /// Seconds of audio transcribed
    #[serde(default)]
    pub duration: f64,
    /// Server-side request identifier
    #[serde(default)]
    pub request_id: String,
    /// Whether the transcript is final (always true for batch)
    #[serde(default)]
    pub is_final: bool,
    /// Word-level timings, when requested
    #[serde(default)]
    pub words: Vec<BatchWordTiming>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_list_page_renames_data() {
        let json = r#"{
            "data": [{
                "id": "v-1",
                "name": "Ari",
                "description": "calm narrator",
                "gender": "feminine",
                "language": "en",
                "created_at": "2025-01-01T00:00:00Z",
                "is_owner": false,
                "is_public": true
            }],
            "has_more": true
        }"#;
        let page: VoiceListPage = serde_json::from_str(json).unwrap();
        assert!(page.has_more);
        assert_eq!(page.voices.len(), 1);
        assert_eq!(page.voices[0].id, "v-1");
        assert_eq!(page.voices[0].embedding, None);
        assert_eq!(page.voices[0].is_starred, None);
    }

    #[test]
    fn test_voice_with_expanded_embedding() {
        let json = r#"{
            "id": "v-2",
            "name": "Bo",
            "description": "",
            "gender": "masculine",
            "language": "de",
            "created_at": "2025-01-01T00:00:00Z",
            "is_owner": true,
            "is_public": false,
            "is_starred": true,
            "embedding": [0.1, -0.2, 0.3]
        }"#;
        let voice: Voice = serde_json::from_str(json).unwrap();
        assert_eq!(voice.is_starred, Some(true));
        assert_eq!(voice.embedding.as_deref().map(<[f32]>::len), Some(3));
    }

    #[test]
    fn test_stt_batch_response_minimal() {
        let response: SttBatchResponse =
            serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(response.text, "hello");
        assert!(!response.is_final);
        assert!(response.words.is_empty());
    }
}
