//! Shared request value objects for synthesis and transcription.
//!
//! These types are used by both the one-shot HTTP endpoints
//! ([`crate::http`]) and the streaming WebSocket clients ([`crate::tts`],
//! [`crate::stt`]).

use std::str::FromStr;

use serde::Serialize;

// =============================================================================
// Models
// =============================================================================

/// Model identifiers accepted by the service.
pub mod models {
    /// Current TTS flagship model
    pub const SONIC_3: &str = "sonic-3";
    /// Pinned snapshot of sonic-3
    pub const SONIC_3_2025_10_27: &str = "sonic-3-2025-10-27";
    /// Previous TTS generation
    pub const SONIC_2: &str = "sonic-2";
    /// Streaming STT model
    pub const INK_WHISPER: &str = "ink-whisper";
}

/// Common sample rates in Hz.
pub mod sample_rates {
    pub const SR_8000: u32 = 8000;
    pub const SR_16000: u32 = 16000;
    pub const SR_22050: u32 = 22050;
    pub const SR_24000: u32 = 24000;
    pub const SR_44100: u32 = 44100;
    pub const SR_48000: u32 = 48000;
}

/// Emotion tags accepted by [`GenerationConfig::emotion`].
pub mod emotions {
    pub const NEUTRAL: &str = "neutral";
    pub const HAPPY: &str = "happy";
    pub const EXCITED: &str = "excited";
    pub const ENTHUSIASTIC: &str = "enthusiastic";
    pub const ELATED: &str = "elated";
    pub const EUPHORIC: &str = "euphoric";
    pub const TRIUMPHANT: &str = "triumphant";
    pub const AMAZED: &str = "amazed";
    pub const SURPRISED: &str = "surprised";
    pub const FLIRTATIOUS: &str = "flirtatious";
    pub const CURIOUS: &str = "curious";
    pub const CONTENT: &str = "content";
    pub const PEACEFUL: &str = "peaceful";
    pub const SERENE: &str = "serene";
    pub const CALM: &str = "calm";
    pub const GRATEFUL: &str = "grateful";
    pub const AFFECTIONATE: &str = "affectionate";
    pub const TRUST: &str = "trust";
    pub const SYMPATHETIC: &str = "sympathetic";
    pub const ANTICIPATION: &str = "anticipation";
    pub const MYSTERIOUS: &str = "mysterious";
    pub const ANGRY: &str = "angry";
    pub const MAD: &str = "mad";
    pub const OUTRAGED: &str = "outraged";
    pub const FRUSTRATED: &str = "frustrated";
    pub const AGITATED: &str = "agitated";
    pub const THREATENED: &str = "threatened";
    pub const DISGUSTED: &str = "disgusted";
    pub const CONTEMPT: &str = "contempt";
    pub const ENVIOUS: &str = "envious";
    pub const SARCASTIC: &str = "sarcastic";
    pub const IRONIC: &str = "ironic";
    pub const SAD: &str = "sad";
    pub const DEJECTED: &str = "dejected";
    pub const MELANCHOLIC: &str = "melancholic";
    pub const DISAPPOINTED: &str = "disappointed";
    pub const HURT: &str = "hurt";
    pub const GUILTY: &str = "guilty";
    pub const BORED: &str = "bored";
    pub const TIRED: &str = "tired";
    pub const REJECTED: &str = "rejected";
    pub const NOSTALGIC: &str = "nostalgic";
    pub const WISTFUL: &str = "wistful";
    pub const APOLOGETIC: &str = "apologetic";
    pub const HESITANT: &str = "hesitant";
    pub const INSECURE: &str = "insecure";
    pub const CONFUSED: &str = "confused";
    pub const RESIGNED: &str = "resigned";
    pub const ANXIOUS: &str = "anxious";
    pub const PANICKED: &str = "panicked";
    pub const ALARMED: &str = "alarmed";
    pub const SCARED: &str = "scared";
    pub const PROUD: &str = "proud";
    pub const CONFIDENT: &str = "confident";
    pub const DISTANT: &str = "distant";
    pub const SKEPTICAL: &str = "skeptical";
    pub const CONTEMPLATIVE: &str = "contemplative";
    pub const DETERMINED: &str = "determined";
}

// =============================================================================
// Audio Encodings
// =============================================================================

/// Output encodings for synthesized audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TtsEncoding {
    /// PCM 32-bit float little-endian
    #[serde(rename = "pcm_f32le")]
    PcmF32le,
    /// PCM signed 16-bit little-endian (default)
    #[default]
    #[serde(rename = "pcm_s16le")]
    PcmS16le,
    /// PCM mu-law (telephony)
    #[serde(rename = "pcm_mulaw")]
    PcmMulaw,
    /// PCM A-law (telephony)
    #[serde(rename = "pcm_alaw")]
    PcmAlaw,
}

impl TtsEncoding {
    /// Convert to the wire string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PcmF32le => "pcm_f32le",
            Self::PcmS16le => "pcm_s16le",
            Self::PcmMulaw => "pcm_mulaw",
            Self::PcmAlaw => "pcm_alaw",
        }
    }
}

/// Input encodings for speech-to-text audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SttEncoding {
    /// PCM signed 16-bit little-endian (default)
    #[default]
    #[serde(rename = "pcm_s16le")]
    PcmS16le,
    /// PCM signed 32-bit little-endian
    #[serde(rename = "pcm_s32le")]
    PcmS32le,
    /// PCM 16-bit float little-endian
    #[serde(rename = "pcm_f16le")]
    PcmF16le,
    /// PCM 32-bit float little-endian
    #[serde(rename = "pcm_f32le")]
    PcmF32le,
    /// PCM mu-law (telephony)
    #[serde(rename = "pcm_mulaw")]
    PcmMulaw,
    /// PCM A-law (telephony)
    #[serde(rename = "pcm_alaw")]
    PcmAlaw,
}

impl SttEncoding {
    /// Convert to the wire / query-parameter string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PcmS16le => "pcm_s16le",
            Self::PcmS32le => "pcm_s32le",
            Self::PcmF16le => "pcm_f16le",
            Self::PcmF32le => "pcm_f32le",
            Self::PcmMulaw => "pcm_mulaw",
            Self::PcmAlaw => "pcm_alaw",
        }
    }
}

impl FromStr for SttEncoding {
    type Err = ();

    /// Parse from an encoding string (case-insensitive). Unknown values
    /// default to PCM S16LE.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "pcm_s32le" => Self::PcmS32le,
            "pcm_f16le" => Self::PcmF16le,
            "pcm_f32le" => Self::PcmF32le,
            "pcm_mulaw" | "mulaw" | "ulaw" => Self::PcmMulaw,
            "pcm_alaw" | "alaw" => Self::PcmAlaw,
            _ => Self::PcmS16le,
        })
    }
}

// =============================================================================
// Voice Specification
// =============================================================================

/// How a voice is referenced in a synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceMode {
    /// Reference by voice ID (default)
    #[default]
    Id,
    /// Reference by embedded voice description
    Embedded,
}

/// Voice selector sent inside synthesis requests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoiceSpec {
    /// Selection mode
    pub mode: VoiceMode,
    /// Voice identifier
    pub id: String,
}

impl VoiceSpec {
    /// Select a voice by its ID.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            mode: VoiceMode::Id,
            id: id.into(),
        }
    }
}

// =============================================================================
// Output Format
// =============================================================================

/// Output format for synthesized audio.
///
/// Defaults to raw PCM S16LE at 24 kHz.
#[derive(Debug, Clone, Serialize)]
pub struct OutputFormat {
    /// Container format; the streaming endpoints only accept `raw`
    pub container: String,
    /// Sample encoding
    pub encoding: TtsEncoding,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bit rate, only meaningful for compressed containers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            container: "raw".to_string(),
            encoding: TtsEncoding::PcmS16le,
            sample_rate: sample_rates::SR_24000,
            bit_rate: None,
        }
    }
}

// =============================================================================
// Generation Config
// =============================================================================

/// Voice generation parameters.
///
/// All fields carry explicit defaults so the wire encoding never depends on
/// unset state: volume 1.0, speed 1.0, emotion `neutral`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    /// Output volume multiplier
    pub volume: f32,
    /// Speaking speed multiplier
    pub speed: f32,
    /// Emotion tag, see [`emotions`]
    pub emotion: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            speed: 1.0,
            emotion: emotions::NEUTRAL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_spec_serialization() {
        let voice = VoiceSpec::by_id("voice-123");
        let json = serde_json::to_value(&voice).unwrap();
        assert_eq!(json["mode"], "id");
        assert_eq!(json["id"], "voice-123");
    }

    #[test]
    fn test_output_format_defaults() {
        let format = OutputFormat::default();
        let json = serde_json::to_value(&format).unwrap();
        assert_eq!(json["container"], "raw");
        assert_eq!(json["encoding"], "pcm_s16le");
        assert_eq!(json["sample_rate"], 24000);
        // bit_rate is omitted when unset
        assert!(json.get("bit_rate").is_none());
    }

    #[test]
    fn test_output_format_with_bit_rate() {
        let format = OutputFormat {
            bit_rate: Some(128_000),
            ..Default::default()
        };
        let json = serde_json::to_value(&format).unwrap();
        assert_eq!(json["bit_rate"], 128_000);
    }

    #[test]
    fn test_generation_config_defaults_are_explicit() {
        let config = GenerationConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["volume"], 1.0);
        assert_eq!(json["speed"], 1.0);
        assert_eq!(json["emotion"], "neutral");
    }

    #[test]
    fn test_stt_encoding_aliases() {
        assert_eq!("mulaw".parse::<SttEncoding>().unwrap(), SttEncoding::PcmMulaw);
        assert_eq!("ALAW".parse::<SttEncoding>().unwrap(), SttEncoding::PcmAlaw);
        assert_eq!("unknown".parse::<SttEncoding>().unwrap(), SttEncoding::PcmS16le);
    }

    #[test]
    fn test_encoding_wire_strings() {
        assert_eq!(TtsEncoding::PcmF32le.as_str(), "pcm_f32le");
        assert_eq!(SttEncoding::PcmS16le.as_str(), "pcm_s16le");
        let json = serde_json::to_value(TtsEncoding::PcmMulaw).unwrap();
        assert_eq!(json, "pcm_mulaw");
    }
}
