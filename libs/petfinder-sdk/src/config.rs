use std::fmt;
use std::time::Duration;

use figment::Figment;
use figment::providers::Env;
use petfinder_auth::SecretString;
use serde::Deserialize;

use crate::error::InitError;

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.petfinder.com/v2";

const ENV_PREFIX: &str = "PF_";
const CLIENT_ID_VAR: &str = "PF_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "PF_CLIENT_SECRET";
const BASE_URL_VAR: &str = "PF_BASE_URL";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a [`PetfinderClient`](crate::PetfinderClient).
#[derive(Clone)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    /// Overrides [`DEFAULT_BASE_URL`] (`PF_BASE_URL`).
    pub base_url: Option<String>,
    /// Per-request timeout for token and resource requests (default: 30 s).
    pub request_timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret),
            base_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read `PF_CLIENT_ID`, `PF_CLIENT_SECRET` and optionally `PF_BASE_URL`
    /// and `PF_REQUEST_TIMEOUT` (humantime, e.g. `10s`) from the environment.
    ///
    /// Credentials and the base URL are taken verbatim (surrounding whitespace
    /// trimmed), so values such as `1234567890`, `true` or `[abc]` stay strings.
    ///
    /// # Errors
    ///
    /// [`InitError::MissingCredential`] when the id or secret is unset or
    /// blank, [`InitError::Config`] when the timeout cannot be parsed.
    pub fn from_env() -> Result<Self, InitError> {
        let client_id = Env::var(CLIENT_ID_VAR)
            .filter(|id| !id.is_empty())
            .ok_or(InitError::MissingCredential(CLIENT_ID_VAR))?;
        let client_secret = Env::var(CLIENT_SECRET_VAR)
            .filter(|secret| !secret.is_empty())
            .map(SecretString::new)
            .ok_or(InitError::MissingCredential(CLIENT_SECRET_VAR))?;

        let timing: RawTiming = Figment::from(Env::prefixed(ENV_PREFIX).only(&["request_timeout"]))
            .extract()
            .map_err(|e| InitError::Config(e.to_string()))?;

        Ok(Self {
            client_id,
            client_secret,
            base_url: Env::var(BASE_URL_VAR).filter(|url| !url.is_empty()),
            request_timeout: timing.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }

    /// The effective base URL, without a trailing `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        resolve_base_url(self.base_url.as_deref())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// `override_url` when set, else [`DEFAULT_BASE_URL`]; trailing `/` removed.
#[must_use]
pub fn resolve_base_url(override_url: Option<&str>) -> &str {
    override_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
}

#[derive(Deserialize)]
struct RawTiming {
    #[serde(default, with = "humantime_serde")]
    request_timeout: Option<Duration>,
}
