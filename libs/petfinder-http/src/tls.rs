//! TLS helpers for the HTTP client.

use crate::config::TransportSecurity;
use crate::error::HttpError;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use std::sync::Arc;

/// Crypto provider for TLS connections.
///
/// Uses the process default provider when one is installed, otherwise a
/// fresh aws-lc-rs provider. Nothing is installed globally.
pub fn get_crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

/// Build the HTTPS connector backed by the Mozilla (webpki) root store.
///
/// ALPN advertises both h2 and http/1.1. Plain `http://` is only accepted
/// with [`TransportSecurity::AllowInsecureHttp`].
///
/// # Errors
///
/// Returns `HttpError::Tls` if the provider does not support the default
/// protocol versions.
pub fn build_https_connector(
    transport: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, HttpError> {
    let builder = hyper_rustls::HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(get_crypto_provider())
        .map_err(|e| HttpError::Tls(Box::new(e)))?;

    let connector = match transport {
        TransportSecurity::AllowInsecureHttp => {
            builder.https_or_http().enable_all_versions().build()
        }
        TransportSecurity::TlsOnly => builder.https_only().enable_all_versions().build(),
    };
    Ok(connector)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_connector_builds_for_both_modes() {
        assert!(build_https_connector(TransportSecurity::TlsOnly).is_ok());
        assert!(build_https_connector(TransportSecurity::AllowInsecureHttp).is_ok());
    }
}
