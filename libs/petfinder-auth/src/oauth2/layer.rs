use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use http::header::{AUTHORIZATION, HeaderName};
use http::{HeaderValue, Request, Response};
use petfinder_http::HttpError;
use tower::{Layer, Service};
use zeroize::Zeroizing;

use super::token::Token;

/// Tower layer that puts `Authorization: Bearer <token>` (or a custom header)
/// on every outbound request.
#[derive(Clone, Debug)]
pub struct BearerAuthLayer {
    token: Token,
    header_name: HeaderName,
}

impl BearerAuthLayer {
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self {
            token,
            header_name: AUTHORIZATION,
        }
    }

    /// Inject `<header_name>: Bearer <token>` instead of `Authorization`.
    #[must_use]
    pub fn with_header_name(token: Token, header_name: HeaderName) -> Self {
        Self { token, header_name }
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuthService {
            inner,
            token: self.token.clone(),
            header_name: self.header_name.clone(),
        }
    }
}

/// Service created by [`BearerAuthLayer`].
///
/// Token failures are returned as `HttpError::Transport` wrapping the
/// [`TokenError`](super::TokenError), so callers can downcast the source.
/// Successful responses carry the [`TokenGeneration`](super::TokenGeneration)
/// of the token that was sent in their extensions.
#[derive(Clone, Debug)]
pub struct BearerAuthService<S> {
    inner: S,
    token: Token,
    header_name: HeaderName,
}

impl<S, B, ResBody> Service<Request<B>> for BearerAuthService<S>
where
    S: Service<Request<B>, Response = Response<ResBody>, Error = HttpError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
    B: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = HttpError;
    type Future = Pin<Box<dyn Future<Output = Result<Response<ResBody>, HttpError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let token = self.token.clone();
        let header_name = self.header_name.clone();

        // keep the service that was polled ready
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let (secret, generation) = token
                .lease()
                .await
                .map_err(|e| HttpError::Transport(Box::new(e)))?;
            let raw = Zeroizing::new(format!("Bearer {}", secret.expose()));
            let mut bearer_value = HeaderValue::from_str(&raw)?;
            bearer_value.set_sensitive(true);

            req.headers_mut().insert(header_name, bearer_value);
            let mut response = inner.call(req).await?;
            response.extensions_mut().insert(generation);
            Ok(response)
        })
    }
}
