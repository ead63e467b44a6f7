use std::fmt;
use std::time::Duration;
use url::Url;

use super::error::TokenError;
use super::types::ClientAuthMethod;
use crate::SecretString;

/// Configuration for an outbound `OAuth2` client credentials flow.
///
/// `Debug` redacts [`client_secret`](Self::client_secret) and the values of
/// [`extra_headers`](Self::extra_headers).
#[derive(Clone)]
pub struct OAuthClientConfig {
    // ---- endpoint -----------------------------------------------------------
    /// Token endpoint URL (required).
    pub token_endpoint: Option<Url>,

    // ---- credentials --------------------------------------------------------
    pub client_id: String,

    /// Redacted in `Debug` output.
    pub client_secret: SecretString,

    /// Requested scopes, sent space separated. Empty means no `scope` field.
    pub scopes: Vec<String>,

    pub auth_method: ClientAuthMethod,

    /// Extra headers attached to every token request.
    pub extra_headers: Vec<(String, String)>,

    // ---- refresh policy -----------------------------------------------------
    /// How long before expiry a cached token is considered stale (default: 60 s).
    ///
    /// Tokens whose lifetime is not longer than the offset go stale at half
    /// their lifetime.
    pub refresh_offset: Duration,

    /// Lifetime assumed when the endpoint omits `expires_in` (default: 5 min).
    pub default_ttl: Duration,

    // ---- HTTP client --------------------------------------------------------
    /// HTTP client settings for token requests.
    /// `None` means [`HttpClientConfig::token_endpoint()`](petfinder_http::HttpClientConfig::token_endpoint).
    pub http_config: Option<petfinder_http::HttpClientConfig>,
}

impl OAuthClientConfig {
    /// Check that credentials and the endpoint are present.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigError`] if `client_id` or `client_secret`
    /// is blank, or `token_endpoint` is not set.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.client_id.trim().is_empty() {
            return Err(TokenError::ConfigError(
                "client_id must not be empty".into(),
            ));
        }
        if self.client_secret.is_blank() {
            return Err(TokenError::ConfigError(
                "client_secret must not be empty".into(),
            ));
        }
        if self.token_endpoint.is_none() {
            return Err(TokenError::ConfigError(
                "token_endpoint must be set".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted_headers: Vec<_> = self
            .extra_headers
            .iter()
            .map(|(k, _)| (k.as_str(), "[REDACTED]"))
            .collect();
        f.debug_struct("OAuthClientConfig")
            .field("token_endpoint", &self.token_endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scopes", &self.scopes)
            .field("auth_method", &self.auth_method)
            .field("extra_headers", &redacted_headers)
            .field("refresh_offset", &self.refresh_offset)
            .field("default_ttl", &self.default_ttl)
            .field("http_config", &self.http_config)
            .finish()
    }
}

impl Default for OAuthClientConfig {
    fn default() -> Self {
        Self {
            token_endpoint: None,
            client_id: String::new(),
            client_secret: SecretString::new(String::new()),
            scopes: Vec::new(),
            auth_method: ClientAuthMethod::default(),
            extra_headers: Vec::new(),
            refresh_offset: Duration::from_secs(60),
            default_ttl: Duration::from_secs(5 * 60),
            http_config: None,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn valid() -> OAuthClientConfig {
        OAuthClientConfig {
            token_endpoint: Some(Url::parse("https://api.petfinder.com/v2/oauth2/token/").unwrap()),
            client_id: "my-client".into(),
            client_secret: SecretString::new("my-secret"),
            ..Default::default()
        }
    }

    // ---- validate -----------------------------------------------------------

    #[test]
    fn validate_ok() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_client_id() {
        let cfg = OAuthClientConfig {
            client_id: "  ".into(),
            ..valid()
        };
        assert_eq!(
            cfg.validate(),
            Err(TokenError::ConfigError("client_id must not be empty".into()))
        );
    }

    #[test]
    fn validate_rejects_empty_secret() {
        let cfg = OAuthClientConfig {
            client_secret: SecretString::new(""),
            ..valid()
        };
        assert_eq!(
            cfg.validate(),
            Err(TokenError::ConfigError(
                "client_secret must not be empty".into()
            ))
        );
    }

    #[test]
    fn validate_rejects_missing_endpoint() {
        let cfg = OAuthClientConfig {
            token_endpoint: None,
            ..valid()
        };
        assert!(matches!(cfg.validate(), Err(TokenError::ConfigError(_))));
    }

    // ---- debug --------------------------------------------------------------

    #[test]
    fn debug_redacts_secrets() {
        let cfg = OAuthClientConfig {
            extra_headers: vec![("x-api-key".into(), "header-secret".into())],
            ..valid()
        };
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("my-secret"));
        assert!(!dbg.contains("header-secret"));
        assert!(dbg.contains("my-client"));
        assert!(dbg.contains("x-api-key"));
    }

    #[test]
    fn defaults() {
        let cfg = OAuthClientConfig::default();
        assert_eq!(cfg.auth_method, ClientAuthMethod::Form);
        assert_eq!(cfg.refresh_offset, Duration::from_secs(60));
        assert_eq!(cfg.default_ttl, Duration::from_secs(300));
    }
}
