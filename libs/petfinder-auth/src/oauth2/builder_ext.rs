use http::header::HeaderName;
use tower::ServiceExt;

use super::layer::BearerAuthLayer;
use super::token::Token;

/// Extension trait for adding bearer auth to [`petfinder_http::HttpClientBuilder`].
///
/// ```ignore
/// use petfinder_auth::HttpClientBuilderExt;
///
/// let token = Token::new(config)?;
/// let client = HttpClientBuilder::new().with_bearer_auth(token).build()?;
/// ```
pub trait HttpClientBuilderExt {
    /// Add `Authorization: Bearer <token>` injection to the HTTP client.
    #[must_use]
    fn with_bearer_auth(self, token: Token) -> Self;

    /// Add `<header_name>: Bearer <token>` injection to the HTTP client.
    #[must_use]
    fn with_bearer_auth_header(self, token: Token, header_name: HeaderName) -> Self;
}

impl HttpClientBuilderExt for petfinder_http::HttpClientBuilder {
    fn with_bearer_auth(self, token: Token) -> Self {
        wrap(self, BearerAuthLayer::new(token))
    }

    fn with_bearer_auth_header(self, token: Token, header_name: HeaderName) -> Self {
        wrap(self, BearerAuthLayer::with_header_name(token, header_name))
    }
}

fn wrap(
    builder: petfinder_http::HttpClientBuilder,
    layer: BearerAuthLayer,
) -> petfinder_http::HttpClientBuilder {
    builder.with_auth_layer(move |svc| {
        tower::ServiceBuilder::new()
            .layer(layer)
            .service(svc)
            .boxed_clone()
    })
}
