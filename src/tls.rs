//! TLS connector construction for the WebSocket transport.
//!
//! The HTTP side configures its policy through `reqwest`'s builder; the
//! WebSocket side needs an explicit `native_tls` connector handed to
//! `tokio-tungstenite`. Both honor the same
//! [`CartesiaConfig::verify_certificates`](crate::CartesiaConfig) toggle.

use tracing::warn;

use crate::config::CartesiaConfig;
use crate::error::{CartesiaError, CartesiaResult};

/// Builds a `native_tls::TlsConnector` honoring the configured
/// certificate-verification policy.
///
/// Verification is on by default; disabling it is logged loudly every time a
/// connector is built so it cannot slip into production unnoticed.
pub(crate) fn build_tls_connector(config: &CartesiaConfig) -> CartesiaResult<native_tls::TlsConnector> {
    let mut builder = native_tls::TlsConnector::builder();

    if !config.verify_certificates {
        warn!("TLS certificate verification disabled - do not use against production endpoints");
        builder.danger_accept_invalid_certs(true);
    }

    builder.min_protocol_version(Some(native_tls::Protocol::Tlsv12));

    builder
        .build()
        .map_err(|e| CartesiaError::ConnectionFailed(format!("TLS setup failed: {e}")))
}
