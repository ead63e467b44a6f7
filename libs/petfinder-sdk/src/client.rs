use std::fmt;

use bytes::Bytes;
use http::StatusCode;
use petfinder_auth::{HttpClientBuilderExt, OAuthClientConfig, Token, TokenError, TokenGeneration};
use petfinder_http::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpError, TransportSecurity};
use url::Url;

use crate::config::{ClientConfig, resolve_base_url};
use crate::decode::{decode_breeds, decode_document, decode_enveloped};
use crate::error::{ApiError, DecodeError};
use crate::models::{
    Animal, AnimalResponse, AnimalType, Breed, Organization, OrganizationResponse,
};
use crate::query::QueryParams;

/// Client identification header sent with every upstream request.
pub const SDK_HEADER_NAME: &str = "x-api-sdk";
pub const SDK_HEADER_VALUE: &str =
    "petfinder-go-sdk (https://github.com/petfinder-com/petfinder-go-sdk)";

const TOKEN_PATH: &str = "/oauth2/token/";

/// Authenticated client for the Petfinder v2 API.
///
/// Cheap to share behind an `Arc`; all methods take `&self` and may run
/// concurrently. The bearer token is owned by this instance.
pub struct PetfinderClient {
    http: HttpClient,
    token: Token,
    base_url: Option<String>,
}

impl fmt::Debug for PetfinderClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetfinderClient")
            .field("base_url", &self.base_url())
            .finish_non_exhaustive()
    }
}

impl PetfinderClient {
    /// Build the client. No request is sent; the token is fetched on first use.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`ApiError::Config`] for blank credentials or an unusable base URL,
    /// [`ApiError::Network`] if the HTTP stack cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url().to_owned();
        let token_endpoint = Url::parse(&format!("{base_url}{TOKEN_PATH}"))
            .map_err(|e| ApiError::Config(format!("invalid base URL `{base_url}`: {e}")))?;

        let http_config = upstream_http_config(&token_endpoint, &config);

        let token = Token::new(OAuthClientConfig {
            token_endpoint: Some(token_endpoint),
            client_id: config.client_id,
            client_secret: config.client_secret,
            extra_headers: vec![(SDK_HEADER_NAME.to_owned(), SDK_HEADER_VALUE.to_owned())],
            http_config: Some(http_config.clone()),
            ..OAuthClientConfig::default()
        })
        .map_err(|e| match e {
            TokenError::ConfigError(msg) => ApiError::Config(msg),
            other => ApiError::Auth(other),
        })?;

        let http = HttpClientBuilder::with_config(http_config)
            .with_bearer_auth(token.clone())
            .build()
            .map_err(ApiError::Network)?;

        tracing::debug!(base_url = %base_url, "Petfinder client created");

        Ok(Self {
            http,
            token,
            base_url: config.base_url,
        })
    }

    /// Effective base URL (override or default), without a trailing `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        resolve_base_url(self.base_url.as_deref())
    }

    /// Drop the cached access token; the next request acquires a new one.
    pub fn refresh_token(&self) {
        self.token.invalidate();
    }

    /// GET `base_url() + path` and return the whole body.
    ///
    /// A 401 from the upstream drops the cached token so the next call
    /// re-authenticates. The request itself is not retried.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Auth`] when no token could be obtained
    /// - [`ApiError::Network`] when the upstream is unreachable or times out
    /// - [`ApiError::Status`] for a non-2xx answer
    /// - [`ApiError::Read`] when the body cannot be read in full
    pub async fn send_get_request(&self, path: &str) -> Result<Bytes, ApiError> {
        let url = format!("{}{path}", self.base_url());
        tracing::debug!(url = %url, "GET upstream");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(classify_send_error)?;
        let sent_generation = response.extensions().get::<TokenGeneration>().copied();

        match response.checked_bytes().await {
            Ok(body) => Ok(body),
            Err(HttpError::HttpStatus {
                status,
                body_preview,
                ..
            }) => {
                if status == StatusCode::UNAUTHORIZED {
                    self.reject_token(sent_generation, &url);
                }
                Err(ApiError::Status {
                    status,
                    body_preview,
                })
            }
            Err(e) => Err(ApiError::Read(e)),
        }
    }

    /// Drop the token a 401 was answered to, unless it was already replaced.
    fn reject_token(&self, sent: Option<TokenGeneration>, url: &str) {
        let invalidated = match sent {
            Some(generation) => self.token.invalidate_generation(generation),
            None => {
                self.token.invalidate();
                true
            }
        };
        tracing::warn!(
            url = %url,
            invalidated,
            "upstream rejected the access token"
        );
    }

    /// `GET /types`
    ///
    /// # Errors
    ///
    /// [`ApiError::Upstream`] wrapping the request or decode failure.
    #[tracing::instrument(skip_all)]
    pub async fn get_all_types(&self) -> Result<Vec<AnimalType>, ApiError> {
        const OP: &str = "get_all_types";
        self.fetch(OP, "/types", |body| decode_enveloped(OP, body, "types"))
            .await
    }

    /// `GET /types/{type}`
    ///
    /// # Errors
    ///
    /// [`ApiError::Upstream`] wrapping the request or decode failure.
    #[tracing::instrument(skip_all, fields(animal_type = %type_name))]
    pub async fn get_type(&self, type_name: &str) -> Result<AnimalType, ApiError> {
        const OP: &str = "get_type";
        let path = format!("/types/{}", segment(type_name));
        self.fetch(OP, &path, |body| decode_enveloped(OP, body, "type"))
            .await
    }

    /// `GET /types/{type}/breeds`
    ///
    /// # Errors
    ///
    /// [`ApiError::Upstream`] wrapping the request or decode failure.
    #[tracing::instrument(skip_all, fields(animal_type = %type_name))]
    pub async fn get_breeds_for_type(&self, type_name: &str) -> Result<Vec<Breed>, ApiError> {
        let path = format!("/types/{}/breeds", segment(type_name));
        self.fetch("get_breeds_for_type", &path, decode_breeds).await
    }

    /// `GET /animals/{id}`
    ///
    /// # Errors
    ///
    /// [`ApiError::Upstream`] wrapping the request or decode failure.
    #[tracing::instrument(skip_all, fields(animal_id = %animal_id))]
    pub async fn get_animal_by_id(&self, animal_id: &str) -> Result<Animal, ApiError> {
        const OP: &str = "get_animal_by_id";
        let path = format!("/animals/{}", segment(animal_id));
        self.fetch(OP, &path, |body| decode_enveloped(OP, body, "animal"))
            .await
    }

    /// `GET /animals?<params>`
    ///
    /// # Errors
    ///
    /// [`ApiError::Upstream`] wrapping the request or decode failure.
    #[tracing::instrument(skip_all, fields(params = params.len()))]
    pub async fn get_animals(&self, params: &QueryParams) -> Result<AnimalResponse, ApiError> {
        const OP: &str = "get_animals";
        let path = format!("/animals{}", params.create_query_string());
        self.fetch(OP, &path, |body| decode_document(OP, body)).await
    }

    /// `GET /organizations?<params>`
    ///
    /// # Errors
    ///
    /// [`ApiError::Upstream`] wrapping the request or decode failure.
    #[tracing::instrument(skip_all, fields(params = params.len()))]
    pub async fn get_organizations(
        &self,
        params: &QueryParams,
    ) -> Result<OrganizationResponse, ApiError> {
        const OP: &str = "get_organizations";
        let path = format!("/organizations{}", params.create_query_string());
        self.fetch(OP, &path, |body| decode_document(OP, body)).await
    }

    /// `GET /organizations/{id}`
    ///
    /// # Errors
    ///
    /// [`ApiError::Upstream`] wrapping the request or decode failure.
    #[tracing::instrument(skip_all, fields(organization_id = %organization_id))]
    pub async fn get_organization_by_id(
        &self,
        organization_id: &str,
    ) -> Result<Organization, ApiError> {
        const OP: &str = "get_organization_by_id";
        let path = format!("/organizations/{}", segment(organization_id));
        self.fetch(OP, &path, |body| decode_enveloped(OP, body, "organization"))
            .await
    }

    async fn fetch<T>(
        &self,
        operation: &'static str,
        path: &str,
        decode: impl FnOnce(&[u8]) -> Result<T, DecodeError>,
    ) -> Result<T, ApiError> {
        let result = self
            .send_get_request(path)
            .await
            .and_then(|body| decode(&body).map_err(ApiError::from));

        result.map_err(|e| {
            tracing::warn!(operation, error = %e, "Petfinder request failed");
            ApiError::upstream(operation, e)
        })
    }
}

/// Transport settings shared by the token and resource requests.
fn upstream_http_config(token_endpoint: &Url, config: &ClientConfig) -> HttpClientConfig {
    let transport = if token_endpoint.scheme() == "http" {
        tracing::warn!(
            base_url = config.base_url(),
            "Petfinder base URL is plain HTTP; traffic will not be encrypted"
        );
        TransportSecurity::AllowInsecureHttp
    } else {
        TransportSecurity::TlsOnly
    };

    HttpClientConfig {
        request_timeout: config.request_timeout,
        transport,
        ..HttpClientConfig::default()
    }
    .with_default_header(SDK_HEADER_NAME, SDK_HEADER_VALUE)
}

/// Token failures come back from the auth layer as `HttpError::Transport`.
fn classify_send_error(err: HttpError) -> ApiError {
    match err {
        HttpError::Transport(source) => match source.downcast::<TokenError>() {
            Ok(token_err) => ApiError::Auth(*token_err),
            Err(source) => ApiError::Network(HttpError::Transport(source)),
        },
        other => ApiError::Network(other),
    }
}

fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
