use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use http::header::AUTHORIZATION;
use url::Url;
use zeroize::Zeroizing;

use super::config::OAuthClientConfig;
use super::error::TokenError;
use super::types::{ClientAuthMethod, TokenResponse};
use crate::SecretString;
use crate::http_error::format_http_error;

const ERROR_PREFIX: &str = "OAuth2 token";

/// A freshly issued access token and how long the issuer says it is valid.
#[derive(Debug, Clone)]
pub struct AcquiredToken {
    pub access_token: SecretString,
    pub lifetime: Duration,
}

/// Something that can exchange credentials for an access token.
///
/// [`Token`](super::Token) caches what the source returns and decides when to
/// ask again.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn request_token(&self) -> Result<AcquiredToken, TokenError>;
}

/// Client credentials token source backed by [`petfinder_http::HttpClient`].
pub struct OAuthTokenSource {
    client: petfinder_http::HttpClient,
    token_endpoint: Url,
    client_id: String,
    client_secret: SecretString,
    /// Space separated scopes, `None` when empty.
    scopes: Option<String>,
    auth_method: ClientAuthMethod,
    extra_headers: Vec<(String, String)>,
    default_ttl: Duration,
}

impl OAuthTokenSource {
    /// Build a token source from a validated configuration. No network call.
    ///
    /// Must be called inside a tokio runtime (the HTTP client spawns its worker).
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigError`] if `token_endpoint` is `None`, or
    /// [`TokenError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &OAuthClientConfig) -> Result<Self, TokenError> {
        let token_endpoint = config
            .token_endpoint
            .clone()
            .ok_or_else(|| TokenError::ConfigError("token_endpoint must be set".into()))?;

        let http_config = config
            .http_config
            .clone()
            .unwrap_or_else(petfinder_http::HttpClientConfig::token_endpoint);

        let client = petfinder_http::HttpClientBuilder::with_config(http_config)
            .build()
            .map_err(|e| TokenError::Http(format_http_error(&e, ERROR_PREFIX)))?;

        let scopes = (!config.scopes.is_empty()).then(|| config.scopes.join(" "));

        Ok(Self {
            client,
            token_endpoint,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes,
            auth_method: config.auth_method,
            extra_headers: config.extra_headers.clone(),
            default_ttl: config.default_ttl,
        })
    }
}

#[async_trait]
impl TokenSource for OAuthTokenSource {
    async fn request_token(&self) -> Result<AcquiredToken, TokenError> {
        // -- form fields ---------------------------------------------------------
        let mut fields: Vec<(&str, &str)> = vec![("grant_type", "client_credentials")];

        if let Some(ref scope) = self.scopes {
            fields.push(("scope", scope));
        }

        let secret_copy;
        if self.auth_method == ClientAuthMethod::Form {
            secret_copy = Zeroizing::new(self.client_secret.expose().to_owned());
            fields.push(("client_id", &self.client_id));
            fields.push(("client_secret", &secret_copy));
        }

        // -- request -------------------------------------------------------------
        let mut builder = self.client.post(self.token_endpoint.as_str());

        if self.auth_method == ClientAuthMethod::Basic {
            let credentials = Zeroizing::new(format!(
                "{}:{}",
                self.client_id,
                self.client_secret.expose()
            ));
            let encoded = Zeroizing::new(general_purpose::STANDARD.encode(credentials.as_bytes()));
            let header_value = Zeroizing::new(format!("Basic {}", &*encoded));
            builder = builder.sensitive_header(AUTHORIZATION.as_str(), &header_value);
        }

        for (name, value) in &self.extra_headers {
            builder = builder.header(name, value);
        }

        tracing::debug!(endpoint = %self.token_endpoint, "requesting OAuth2 access token");

        let body = builder
            .form(fields.as_slice())
            .map_err(|e| TokenError::Http(format_http_error(&e, ERROR_PREFIX)))?
            .send()
            .await
            .map_err(|e| TokenError::Http(format_http_error(&e, ERROR_PREFIX)))?
            .checked_bytes()
            .await
            .map_err(|e| TokenError::Http(format_http_error(&e, ERROR_PREFIX)))?;

        // -- parse ---------------------------------------------------------------
        let token_resp: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        if token_resp.access_token.is_empty() {
            return Err(TokenError::InvalidResponse(
                "access_token is empty".into(),
            ));
        }

        if let Some(ref tt) = token_resp.token_type
            && !tt.eq_ignore_ascii_case("bearer")
        {
            return Err(TokenError::UnsupportedTokenType(tt.clone()));
        }

        let lifetime = token_resp
            .expires_in
            .map_or(self.default_ttl, Duration::from_secs);

        tracing::debug!(lifetime_secs = lifetime.as_secs(), "OAuth2 access token acquired");

        Ok(AcquiredToken {
            access_token: SecretString::new(token_resp.access_token),
            lifetime,
        })
    }
}
