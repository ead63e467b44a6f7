use thiserror::Error;

/// Errors returned by the outbound `OAuth2` client credentials flow.
///
/// No variant ever carries `client_secret` or an access token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TokenError {
    /// Token endpoint unreachable or answered with a non-success status.
    ///
    /// Built by [`format_http_error`](crate::http_error::format_http_error).
    #[error("{0}")]
    Http(String),

    /// The token endpoint returned an unparseable or incomplete response.
    #[error("invalid token response: {0}")]
    InvalidResponse(String),

    /// The token endpoint returned a `token_type` that is not `Bearer`.
    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),

    /// Invalid configuration (missing credentials or endpoint).
    #[error("OAuth2 config error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn variants_render() {
        assert_eq!(
            TokenError::Http("OAuth2 token HTTP 401 Unauthorized".into()).to_string(),
            "OAuth2 token HTTP 401 Unauthorized"
        );
        assert_eq!(
            TokenError::InvalidResponse("missing access_token".into()).to_string(),
            "invalid token response: missing access_token"
        );
        assert_eq!(
            TokenError::UnsupportedTokenType("mac".into()).to_string(),
            "unsupported token type: mac"
        );
        assert_eq!(
            TokenError::ConfigError("client_id must not be empty".into()).to_string(),
            "OAuth2 config error: client_id must not be empty"
        );
    }
}
