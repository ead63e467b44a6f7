#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Outbound `OAuth2` client credentials authentication.
//!
//! [`Token`] lazily acquires and caches an access token; [`BearerAuthLayer`]
//! (or [`HttpClientBuilderExt::with_bearer_auth`]) attaches it to every
//! request sent through a [`petfinder_http::HttpClient`].
//!
//! ```ignore
//! use petfinder_auth::{HttpClientBuilderExt, OAuthClientConfig, SecretString, Token};
//!
//! let token = Token::new(OAuthClientConfig {
//!     token_endpoint: Some("https://api.petfinder.com/v2/oauth2/token/".parse()?),
//!     client_id: "id".into(),
//!     client_secret: SecretString::new("secret"),
//!     ..Default::default()
//! })?;
//! let client = petfinder_http::HttpClient::builder()
//!     .with_bearer_auth(token)
//!     .build()?;
//! ```

pub mod http_error;
pub mod oauth2;
mod secret;

pub use http_error::format_http_error;
pub use oauth2::{
    AcquiredToken, BearerAuthLayer, BearerAuthService, ClientAuthMethod, HttpClientBuilderExt,
    MAX_CACHE_LIFETIME, OAuthClientConfig, OAuthTokenSource, Token, TokenError, TokenGeneration,
    TokenSource,
};
pub use secret::SecretString;
