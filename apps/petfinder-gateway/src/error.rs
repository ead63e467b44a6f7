use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use petfinder_sdk::{ApiError, InitError};

/// Failure of an inbound request.
///
/// Clients only see the short message; the cause goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Failed to initialize Petfinder client")]
    Init(#[source] InitError),

    #[error("Failed to retrieve animal details")]
    Upstream(#[source] ApiError),
}

impl GatewayError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(e) if e.status() == Some(StatusCode::NOT_FOUND) => StatusCode::NOT_FOUND,
            Self::Init(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Init(cause) => tracing::error!(error = %cause, "petfinder client unavailable"),
            Self::Upstream(cause) if status.is_server_error() => {
                tracing::error!(error = %cause, "upstream request failed");
            }
            Self::Upstream(cause) => tracing::info!(error = %cause, "upstream request failed"),
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn init_failure_is_internal_error() {
        let err = GatewayError::Init(InitError::MissingCredential("PF_CLIENT_ID"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to initialize Petfinder client");
    }

    #[test]
    fn upstream_config_error_is_internal_error() {
        let err = GatewayError::Upstream(ApiError::Config("bad url".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to retrieve animal details");
    }
}
