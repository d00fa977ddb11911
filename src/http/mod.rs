//! One-shot REST endpoints: service status, voice management, non-streaming
//! synthesis, and batch transcription.

mod client;
mod requests;
mod responses;

pub use client::CartesiaClient;
pub use requests::{SttBatchRequest, TtsBytesRequest, VoiceListRequest, voice_genders};
pub use responses::{ApiInfo, BatchWordTiming, SttBatchResponse, Voice, VoiceListPage};
