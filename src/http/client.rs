//! One-shot HTTP client for the REST endpoints.

use std::path::Path;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart;
use tracing::debug;

use crate::config::{CartesiaConfig, HEADER_API_KEY, HEADER_CARTESIA_VERSION, USER_AGENT};
use crate::error::{CartesiaError, CartesiaResult};
use crate::http::requests::{SttBatchRequest, TtsBytesRequest, VoiceListRequest};
use crate::http::responses::{ApiInfo, SttBatchResponse, Voice, VoiceListPage};

const ENDPOINT_API_INFO: &str = "/";
const ENDPOINT_VOICES: &str = "/voices";
const ENDPOINT_TTS_BYTES: &str = "/tts/bytes";
const ENDPOINT_STT_BATCH: &str = "/stt";

/// Client for the one-shot REST endpoints.
///
/// Connections are pooled and reused across calls; the client is cheap to
/// clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct CartesiaClient {
    config: CartesiaConfig,
    http: reqwest::Client,
}

impl CartesiaClient {
    /// Build a client from `config`.
    ///
    /// Fails with [`CartesiaError::InvalidConfiguration`] if the API key
    /// contains bytes that cannot appear in an HTTP header.
    pub fn new(config: CartesiaConfig) -> CartesiaResult<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| CartesiaError::InvalidConfiguration("API key is not header-safe".into()))?;
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| CartesiaError::InvalidConfiguration("API key is not header-safe".into()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(HEADER_API_KEY, api_key);
        headers.insert(
            HEADER_CARTESIA_VERSION,
            HeaderValue::from_static(config.api_version.as_str()),
        );

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_certificates)
            .build()?;

        Ok(Self { config, http })
    }

    /// `GET /`: service status and API version.
    pub async fn get_api_info(&self) -> CartesiaResult<ApiInfo> {
        let url = self.config.http_url(ENDPOINT_API_INFO);
        debug!("fetching API info");
        let response = self.http.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /voices`: list voices matching `request`'s filters.
    pub async fn list_voices(&self, request: &VoiceListRequest) -> CartesiaResult<VoiceListPage> {
        let url = format!(
            "{}{}",
            self.config.http_url(ENDPOINT_VOICES),
            request.to_query_params()
        );
        debug!("listing voices");
        let response = self.http.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /voices/{id}`: fetch one voice.
    pub async fn get_voice(&self, voice_id: &str) -> CartesiaResult<Voice> {
        let url = self
            .config
            .http_url(&format!("{ENDPOINT_VOICES}/{voice_id}"));
        debug!(voice_id, "fetching voice");
        let response = self.http.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /tts/bytes`: synthesize `request` and return the raw audio.
    pub async fn tts_bytes(&self, request: &TtsBytesRequest) -> CartesiaResult<Bytes> {
        let url = self.config.http_url(ENDPOINT_TTS_BYTES);
        debug!(model_id = request.model_id, "synthesizing via tts/bytes");
        let response = self.http.post(&url).json(request).send().await?;
        Ok(Self::check(response).await?.bytes().await?)
    }

    /// `POST /stt`: transcribe one in-memory audio buffer.
    pub async fn stt_batch(
        &self,
        request: &SttBatchRequest,
        audio: Bytes,
        file_name: &str,
    ) -> CartesiaResult<SttBatchResponse> {
        let part = multipart::Part::stream(audio).file_name(file_name.to_string());
        self.stt_batch_part(request, part).await
    }

    /// `POST /stt`: transcribe an audio file from disk.
    pub async fn stt_batch_file(
        &self,
        request: &SttBatchRequest,
        path: impl AsRef<Path>,
    ) -> CartesiaResult<SttBatchResponse> {
        let path = path.as_ref();
        let audio = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let part = multipart::Part::bytes(audio).file_name(file_name);
        self.stt_batch_part(request, part).await
    }

    async fn stt_batch_part(
        &self,
        request: &SttBatchRequest,
        file_part: multipart::Part,
    ) -> CartesiaResult<SttBatchResponse> {
        let url = format!(
            "{}{}",
            self.config.http_url(ENDPOINT_STT_BATCH),
            request.to_query_params()
        );
        let form = multipart::Form::new()
            .text("model", request.model.clone())
            .part("file", file_part);
        debug!(model = request.model, "transcribing via stt batch");
        let response = self.http.post(&url).multipart(form).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Map non-2xx responses to [`CartesiaError::ApiError`] with the
    /// response body preserved for diagnostics.
    async fn check(response: reqwest::Response) -> CartesiaResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CartesiaError::ApiError {
            status: status.as_u16(),
            body,
        })
    }
}
