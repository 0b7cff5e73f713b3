//! Read-only listings for a user. Users are not stored; each listing filters
//! one collection by the field that names the user.

use crate::domain::json::parse_leading_int;
use crate::domain::model::{ResourceModel, BUSINESS, PHOTO, REVIEW};
use crate::storage::document::Document;
use crate::transport::http::error::ApiResult;
use crate::transport::http::handlers::common::service_error;
use crate::transport::http::types::{
    AppState, BusinessListResponse, ErrorResponse, PhotoListResponse, ReviewListResponse,
};
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::Json;
use serde_json::Value as JsonValue;

/// Documents of `model` whose `field` equals the path user id.
///
/// A user id that does not parse matches nothing.
async fn owned_by(
    state: &AppState,
    uri: &Uri,
    model: &dyn ResourceModel,
    field: &str,
    userid: &str,
) -> ApiResult<Vec<Document>> {
    let Some(userid) = parse_leading_int(userid) else {
        return Ok(Vec::new());
    };
    state
        .service
        .find_by(model, field, JsonValue::from(userid))
        .await
        .map_err(service_error(uri))
}

#[utoipa::path(
    get,
    path = "/users/{userid}/businesses",
    params(
        ("userid" = String, Path, description = "User id (matched against ownerid)")
    ),
    responses(
        (status = 200, description = "Businesses owned by the user", body = BusinessListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn user_businesses_handler(
    State(state): State<AppState>,
    Path(userid): Path<String>,
    uri: Uri,
) -> ApiResult<Json<BusinessListResponse>> {
    let businesses = owned_by(&state, &uri, &BUSINESS, "ownerid", &userid).await?;
    Ok(Json(BusinessListResponse { businesses }))
}

#[utoipa::path(
    get,
    path = "/users/{userid}/reviews",
    params(
        ("userid" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Reviews written by the user", body = ReviewListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn user_reviews_handler(
    State(state): State<AppState>,
    Path(userid): Path<String>,
    uri: Uri,
) -> ApiResult<Json<ReviewListResponse>> {
    let reviews = owned_by(&state, &uri, &REVIEW, "userid", &userid).await?;
    Ok(Json(ReviewListResponse { reviews }))
}

#[utoipa::path(
    get,
    path = "/users/{userid}/photos",
    params(
        ("userid" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Photos posted by the user", body = PhotoListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn user_photos_handler(
    State(state): State<AppState>,
    Path(userid): Path<String>,
    uri: Uri,
) -> ApiResult<Json<PhotoListResponse>> {
    let photos = owned_by(&state, &uri, &PHOTO, "userid", &userid).await?;
    Ok(Json(PhotoListResponse { photos }))
}
