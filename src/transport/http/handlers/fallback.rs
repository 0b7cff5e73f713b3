use crate::transport::http::error::ApiError;
use axum::http::Uri;

/// Shared 404 for unknown routes and unsupported methods on known routes.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}
