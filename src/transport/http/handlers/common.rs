use crate::app::resource_service::ServiceError;
use crate::domain::json::{link_segment, parse_leading_int};
use crate::domain::model::ResourceModel;
use crate::storage::document::{Document, ID_FIELD};
use crate::transport::http::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use axum::Json;
use serde_json::Value as JsonValue;

/// Parses a path id the lenient way (`"3"`, `"3abc"` -> 3). Anything else is a
/// lookup miss, reported with the uniform not-found error.
pub fn parse_id(raw: &str, uri: &Uri) -> Result<i64, ApiError> {
    parse_leading_int(raw).ok_or_else(|| ApiError::not_found(uri.path()))
}

/// Unwraps a JSON body. Malformed or missing bodies fail like a schema miss.
pub fn json_body(
    model: &dyn ResourceModel,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<JsonValue, ApiError> {
    match body {
        Ok(Json(v)) => Ok(v),
        Err(e) => {
            tracing::debug!(resource = model.resource_name(), error = %e, "unreadable JSON body");
            Err(ApiError::BadRequest(model.invalid_body_message()))
        }
    }
}

pub fn document_id(doc: &Document) -> Result<i64, ApiError> {
    doc.get(ID_FIELD)
        .and_then(JsonValue::as_i64)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("stored document has no integer id")))
}

/// Link to the business a review/photo points at.
pub fn business_link(doc: &Document) -> Option<String> {
    doc.get("businessid")
        .map(|v| format!("/businesses/{}", link_segment(v)))
}

pub fn service_error(uri: &Uri) -> impl Fn(ServiceError) -> ApiError + '_ {
    move |e| ApiError::from_service(e, uri.path())
}
