use crate::domain::model::{ResourceModel, PHOTO};
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

fn photo_links(id: i64, photo: &Document) -> ResourceLinks {
    ResourceLinks {
        photo: Some(PHOTO.self_link(&id.to_string())),
        business: business_link(photo),
        ..Default::default()
    }
}

#[utoipa::path(
    post,
    path = "/photos",
    request_body(content = DocumentBody, description = "Photo fields"),
    responses(
        (status = 201, description = "Photo created", body = CreatedResponse),
        (status = 400, description = "Request body is not a valid photo object", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_photo_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let body = json_body(&PHOTO, body)?;
    let stored = state
        .service
        .create(&PHOTO, &body)
        .await
        .map_err(service_error(&uri))?;
    let id = document_id(&stored)?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            links: photo_links(id, &stored),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/photos/{photoid}",
    params(
        ("photoid" = String, Path, description = "Photo id")
    ),
    responses(
        (status = 200, description = "The photo", body = DocumentBody),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_photo_handler(
    State(state): State<AppState>,
    Path(photoid): Path<String>,
    uri: Uri,
) -> ApiResult<Json<Document>> {
    let id = parse_id(&photoid, &uri)?;
    let photo = state
        .service
        .get(&PHOTO, id)
        .await
        .map_err(service_error(&uri))?;
    Ok(Json(photo))
}

#[utoipa::path(
    put,
    path = "/photos/{photoid}",
    params(
        ("photoid" = String, Path, description = "Photo id")
    ),
    request_body(content = DocumentBody, description = "Photo fields; businessid and userid must match the stored photo"),
    responses(
        (status = 200, description = "Photo replaced", body = UpdatedResponse),
        (status = 400, description = "Request body is not a valid photo object", body = ErrorResponse),
        (status = 403, description = "Updated photo cannot modify businessid or userid", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_photo_handler(
    State(state): State<AppState>,
    Path(photoid): Path<String>,
    uri: Uri,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> ApiResult<Json<UpdatedResponse>> {
    let id = parse_id(&photoid, &uri)?;
    state
        .service
        .get(&PHOTO, id)
        .await
        .map_err(service_error(&uri))?;
    let body = json_body(&PHOTO, body)?;
    let updated = state
        .service
        .update(&PHOTO, id, &body)
        .await
        .map_err(service_error(&uri))?;
    Ok(Json(UpdatedResponse {
        links: photo_links(id, &updated),
    }))
}

#[utoipa::path(
    delete,
    path = "/photos/{photoid}",
    params(
        ("photoid" = String, Path, description = "Photo id")
    ),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_photo_handler(
    State(state): State<AppState>,
    Path(photoid): Path<String>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    let id = parse_id(&photoid, &uri)?;
    state
        .service
        .delete(&PHOTO, id)
        .await
        .map_err(service_error(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}
