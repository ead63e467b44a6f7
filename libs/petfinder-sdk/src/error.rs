use http::StatusCode;
use petfinder_auth::TokenError;
use petfinder_http::HttpError;
use thiserror::Error;

/// A response body that does not have the shape an operation expects.
///
/// Every variant names the operation that was decoding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("{operation}: response is not valid JSON: {source}")]
    InvalidJson {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation}: response is not a JSON object")]
    NotAnObject { operation: &'static str },

    #[error("{operation}: response has no `{key}` field")]
    MissingKey {
        operation: &'static str,
        key: &'static str,
    },

    #[error("{operation}: `{path}` is not {expected}: {detail}")]
    WrongShape {
        operation: &'static str,
        /// Location of the offending value, e.g. `breeds[3]`.
        path: String,
        expected: &'static str,
        detail: String,
    },
}

impl DecodeError {
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::InvalidJson { operation, .. }
            | Self::NotAnObject { operation }
            | Self::MissingKey { operation, .. }
            | Self::WrongShape { operation, .. } => operation,
        }
    }
}

/// Error returned by [`PetfinderClient`](crate::PetfinderClient) operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The access token could not be obtained.
    #[error("authentication failed: {0}")]
    Auth(#[source] TokenError),

    /// The upstream could not be reached.
    #[error("network error: {0}")]
    Network(#[source] HttpError),

    /// The response body could not be read in full.
    #[error("failed to read response body: {0}")]
    Read(#[source] HttpError),

    /// The upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    Status {
        status: StatusCode,
        body_preview: String,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Failure of a named resource operation.
    #[error("{operation} failed: {source}")]
    Upstream {
        operation: &'static str,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    pub(crate) fn upstream(operation: &'static str, source: Self) -> Self {
        Self::Upstream {
            operation,
            source: Box::new(source),
        }
    }

    /// Upstream HTTP status, looking through [`ApiError::Upstream`].
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Upstream { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The innermost error, skipping [`ApiError::Upstream`] wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Upstream { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Why a client could not be created.
///
/// `Clone` so a memoized failure can be handed to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InitError {
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("failed to construct Petfinder client: {0}")]
    Construction(String),
}

impl From<ApiError> for InitError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Config(msg) => Self::Config(msg),
            other => Self::Construction(other.to_string()),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn status_looks_through_upstream() {
        let err = ApiError::upstream(
            "get_animal_by_id",
            ApiError::Status {
                status: StatusCode::NOT_FOUND,
                body_preview: String::new(),
            },
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(matches!(err.root(), ApiError::Status { .. }));
        assert_eq!(err.to_string(), "get_animal_by_id failed: upstream returned HTTP 404 Not Found");
    }

    #[test]
    fn decode_error_names_operation() {
        let err = DecodeError::MissingKey {
            operation: "get_type",
            key: "type",
        };
        assert_eq!(err.operation(), "get_type");
        assert_eq!(err.to_string(), "get_type: response has no `type` field");
    }

    #[test]
    fn init_error_from_api_error() {
        assert_eq!(
            InitError::from(ApiError::Config("bad base URL".into())),
            InitError::Config("bad base URL".into())
        );
        assert!(matches!(
            InitError::from(ApiError::Auth(TokenError::Http("boom".into()))),
            InitError::Construction(_)
        ));
    }
}
