//! Client configuration shared by the HTTP and WebSocket surfaces.

use std::str::FromStr;

/// User agent sent with every HTTP request and WebSocket upgrade.
pub const USER_AGENT: &str = concat!("cartesia-client-rs/", env!("CARGO_PKG_VERSION"));

/// Header carrying the API key.
pub const HEADER_API_KEY: &str = "X-API-Key";

/// Header carrying the API version date.
pub const HEADER_CARTESIA_VERSION: &str = "Cartesia-Version";

/// Default service host.
pub const DEFAULT_HOST: &str = "api.cartesia.ai";

// =============================================================================
// API Version
// =============================================================================

/// Supported Cartesia API versions.
///
/// The version is sent as a date string in the `Cartesia-Version` header
/// (HTTP) or as a query parameter (WebSocket endpoints that take one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    /// 2024-06-10
    V2024_06_10,
    /// 2024-11-13
    V2024_11_13,
    /// 2025-04-16 (latest)
    #[default]
    V2025_04_16,
}

impl ApiVersion {
    /// Convert to the wire date string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2024_06_10 => "2024-06-10",
            Self::V2024_11_13 => "2024-11-13",
            Self::V2025_04_16 => "2025-04-16",
        }
    }

    /// The most recent version supported by this crate.
    #[inline]
    pub fn latest() -> Self {
        Self::V2025_04_16
    }
}

impl FromStr for ApiVersion {
    type Err = ();

    /// Parse from a version date string. Unknown values map to the latest
    /// supported version.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "2024-06-10" => Self::V2024_06_10,
            "2024-11-13" => Self::V2024_11_13,
            _ => Self::V2025_04_16,
        })
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the Cartesia client.
///
/// Shared by [`crate::http::CartesiaClient`] and the streaming clients in
/// [`crate::tts`] and [`crate::stt`].
///
/// # TLS policy
///
/// Peer-certificate verification is **on by default**. Disabling it via
/// [`CartesiaConfig::danger_accept_invalid_certs`] is an explicit opt-in for
/// development setups behind interception proxies and is logged with a
/// warning on every connection.
#[derive(Debug, Clone)]
pub struct CartesiaConfig {
    /// API key used to authenticate every request
    pub api_key: String,

    /// API version sent with every request
    pub api_version: ApiVersion,

    /// Service host, including port if non-standard
    pub host: String,

    /// Verify the peer certificate during the TLS handshake
    pub verify_certificates: bool,

    /// Use TLS (`https`/`wss`). Disable only when targeting a local
    /// plaintext stub, e.g. in tests.
    pub use_tls: bool,
}

impl CartesiaConfig {
    /// Create a configuration with defaults for the production service.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_version: ApiVersion::latest(),
            host: DEFAULT_HOST.to_string(),
            verify_certificates: true,
            use_tls: true,
        }
    }

    /// Set the API version.
    #[must_use]
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = version;
        self
    }

    /// Target a different host (e.g. a local stub in tests).
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Accept invalid TLS certificates. Do not enable in production.
    #[must_use]
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.verify_certificates = !accept;
        self
    }

    /// Disable TLS entirely. Only meaningful for plaintext test stubs.
    #[must_use]
    pub fn without_tls(mut self) -> Self {
        self.use_tls = false;
        self
    }

    /// Base URL for one-shot HTTP requests.
    pub(crate) fn http_url(&self, path: &str) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{scheme}://{}{path}", self.host)
    }

    /// Full URL for a WebSocket endpoint. `query` must be empty or start
    /// with `?`.
    pub(crate) fn websocket_url(&self, endpoint: &str, query: &str) -> String {
        let scheme = if self.use_tls { "wss" } else { "ws" };
        format!("{scheme}://{}{endpoint}{query}", self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartesiaConfig::new("key");
        assert_eq!(config.host, "api.cartesia.ai");
        assert!(config.verify_certificates);
        assert!(config.use_tls);
        assert_eq!(config.api_version, ApiVersion::V2025_04_16);
    }

    #[test]
    fn test_api_version_strings() {
        assert_eq!(ApiVersion::V2024_06_10.as_str(), "2024-06-10");
        assert_eq!(ApiVersion::latest().as_str(), "2025-04-16");
        assert_eq!(
            "2024-11-13".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2024_11_13
        );
        // Unknown versions fall forward to the latest
        assert_eq!("1999-01-01".parse::<ApiVersion>().unwrap(), ApiVersion::latest());
    }

    #[test]
    fn test_url_builders() {
        let config = CartesiaConfig::new("key");
        assert_eq!(config.http_url("/voices"), "https://api.cartesia.ai/voices");
        assert_eq!(
            config.websocket_url("/tts/websocket", ""),
            "wss://api.cartesia.ai/tts/websocket"
        );

        let local = CartesiaConfig::new("key")
            .with_host("127.0.0.1:9090")
            .without_tls();
        assert_eq!(
            local.websocket_url("/stt/websocket", "?model=ink-whisper"),
            "ws://127.0.0.1:9090/stt/websocket?model=ink-whisper"
        );
    }

    #[test]
    fn test_danger_accept_invalid_certs() {
        let config = CartesiaConfig::new("key").danger_accept_invalid_certs(true);
        assert!(!config.verify_certificates);
    }
}
