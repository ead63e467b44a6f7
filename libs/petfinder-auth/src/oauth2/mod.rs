//! Outbound `OAuth2` client credentials flow.
//!
//! Token acquisition, lazy caching and injection of the bearer token into
//! outbound requests.

pub mod builder_ext;
pub mod config;
pub mod error;
pub mod layer;
pub mod source;
pub mod token;
pub mod types;

pub use builder_ext::HttpClientBuilderExt;
pub use config::OAuthClientConfig;
pub use error::TokenError;
pub use layer::{BearerAuthLayer, BearerAuthService};
pub use source::{AcquiredToken, OAuthTokenSource, TokenSource};
pub use token::{MAX_CACHE_LIFETIME, Token, TokenGeneration};
pub use types::ClientAuthMethod;
