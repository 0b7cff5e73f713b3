use crate::domain::model::{ResourceModel, REVIEW};
use crate::storage::document::Document;
use crate::transport::http::error::ApiResult;
use crate::transport::http::handlers::common::{
    business_link, document_id, json_body, parse_id, service_error,
};
use crate::transport::http::types::{
    AppState, CreatedResponse, DocumentBody, ErrorResponse, ResourceLinks, UpdatedResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

fn review_links(id: i64, review: &Document) -> ResourceLinks {
    ResourceLinks {
        review: Some(REVIEW.self_link(&id.to_string())),
        business: business_link(review),
        ..Default::default()
    }
}

#[utoipa::path(
    post,
    path = "/reviews",
    request_body(content = DocumentBody, description = "Review fields"),
    responses(
        (status = 201, description = "Review created", body = CreatedResponse),
        (status = 400, description = "Request body is not a valid review object", body = ErrorResponse),
        (status = 403, description = "User has already posted a review of this business", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_review_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let body = json_body(&REVIEW, body)?;
    let stored = state
        .service
        .create(&REVIEW, &body)
        .await
        .map_err(service_error(&uri))?;
    let id = document_id(&stored)?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            links: review_links(id, &stored),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/reviews/{reviewid}",
    params(
        ("reviewid" = String, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "The review", body = DocumentBody),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_review_handler(
    State(state): State<AppState>,
    Path(reviewid): Path<String>,
    uri: Uri,
) -> ApiResult<Json<Document>> {
    let id = parse_id(&reviewid, &uri)?;
    let review = state
        .service
        .get(&REVIEW, id)
        .await
        .map_err(service_error(&uri))?;
    Ok(Json(review))
}

#[utoipa::path(
    put,
    path = "/reviews/{reviewid}",
    params(
        ("reviewid" = String, Path, description = "Review id")
    ),
    request_body(content = DocumentBody, description = "Review fields; businessid and userid must match the stored review"),
    responses(
        (status = 200, description = "Review replaced", body = UpdatedResponse),
        (status = 400, description = "Request body is not a valid review object", body = ErrorResponse),
        (status = 403, description = "Updated review cannot modify businessid or userid", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_review_handler(
    State(state): State<AppState>,
    Path(reviewid): Path<String>,
    uri: Uri,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> ApiResult<Json<UpdatedResponse>> {
    let id = parse_id(&reviewid, &uri)?;
    state
        .service
        .get(&REVIEW, id)
        .await
        .map_err(service_error(&uri))?;
    let body = json_body(&REVIEW, body)?;
    let updated = state
        .service
        .update(&REVIEW, id, &body)
        .await
        .map_err(service_error(&uri))?;
    Ok(Json(UpdatedResponse {
        links: review_links(id, &updated),
    }))
}

#[utoipa::path(
    delete,
    path = "/reviews/{reviewid}",
    params(
        ("reviewid" = String, Path, description = "Review id")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_review_handler(
    State(state): State<AppState>,
    Path(reviewid): Path<String>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    let id = parse_id(&reviewid, &uri)?;
    state
        .service
        .delete(&REVIEW, id)
        .await
        .map_err(service_error(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}
