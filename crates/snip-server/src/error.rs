use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use snip_sdk::SdkError;
use thiserror::Error;

/// Errors from starting or configuring the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] snip_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// An error returned to an HTTP client as `{"error": "..."}`.
///
/// Server-side failures are logged in full and answered with a generic
/// message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server misconfigured")]
    Misconfigured,

    #[error("internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    error: String,
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::Internal
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Misconfigured | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SdkError> for ApiError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::Unauthorized => Self::Unauthorized,
            SdkError::Misconfigured => Self::Misconfigured,
            SdkError::NotFound(what) => Self::NotFound(what),
            SdkError::InvalidInput(why) => Self::BadRequest(why),
            other => Self::internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = ErrorPayload {
            error: self.to_string(),
        };
        (self.status(), Json(payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_store::StoreError;

    #[test]
    fn sdk_errors_map_to_statuses() {
        let cases = [
            (SdkError::Unauthorized, StatusCode::UNAUTHORIZED),
            (SdkError::Misconfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (SdkError::NotFound("snippet x".into()), StatusCode::NOT_FOUND),
            (SdkError::InvalidInput("empty".into()), StatusCode::BAD_REQUEST),
            (SdkError::Store(StoreError::Poisoned), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_details_stay_server_side() {
        let err = ApiError::from(SdkError::Store(StoreError::Serialization("disk layout".into())));
        assert_eq!(err.to_string(), "internal server error");
    }
}
