use crate::app::resource_service::ServiceError;
use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Forbidden(String),
    /// Uniform fallback for every lookup miss and unknown route.
    #[error("Requested resource {0} does not exist")]
    NotFound(String),
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Maps a service outcome onto HTTP. `path` is only used for not-found.
    pub fn from_service(err: ServiceError, path: &str) -> Self {
        match err {
            ServiceError::Validation { message } => Self::BadRequest(message),
            ServiceError::ImmutableField { message } | ServiceError::Duplicate { message } => {
                Self::Forbidden(message)
            }
            ServiceError::NotFound => Self::not_found(path),
            ServiceError::Store(e) => Self::Internal(e),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            error!(error = ?cause, "request failed in the store");
        }
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
