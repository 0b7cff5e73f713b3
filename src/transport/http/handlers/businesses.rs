use crate::domain::json::parse_leading_int;
use crate::domain::model::{ResourceModel, BUSINESS};
use crate::transport::http::error::ApiResult;
use crate::transport::http::handlers::common::{document_id, json_body, parse_id, service_error};
use crate::transport::http::types::{
    AppState, BusinessDetailResponse, BusinessListResponse, CreatedResponse, DocumentBody,
    ErrorResponse, PageQuery, ResourceLinks, UpdatedResponse,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

fn business_links(id: &str) -> ResourceLinks {
    ResourceLinks {
        business: Some(BUSINESS.self_link(id)),
        ..Default::default()
    }
}

#[utoipa::path(
    get,
    path = "/businesses",
    params(PageQuery),
    responses(
        (status = 200, description = "One page (5 entries) of businesses in insertion order", body = BusinessListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_businesses_handler(
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<BusinessListResponse>> {
    // An unreadable query string (repeated or mis-encoded keys) means page 1.
    let page = query
        .ok()
        .and_then(|Query(q)| q.page)
        .as_deref()
        .and_then(parse_leading_int)
        .unwrap_or(1);
    let businesses = state
        .service
        .list_page(&BUSINESS, page)
        .await
        .map_err(service_error(&uri))?;
    Ok(Json(BusinessListResponse { businesses }))
}

#[utoipa::path(
    post,
    path = "/businesses",
    request_body(content = DocumentBody, description = "Business fields"),
    responses(
        (status = 201, description = "Business created", body = CreatedResponse),
        (status = 400, description = "Request body is not a valid business object", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_business_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let body = json_body(&BUSINESS, body)?;
    let stored = state
        .service
        .create(&BUSINESS, &body)
        .await
        .map_err(service_error(&uri))?;
    let id = document_id(&stored)?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            links: business_links(&id.to_string()),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/businesses/{businessid}",
    params(
        ("businessid" = String, Path, description = "Business id")
    ),
    responses(
        (status = 200, description = "Business with its photos and reviews", body = BusinessDetailResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_business_handler(
    State(state): State<AppState>,
    Path(businessid): Path<String>,
    uri: Uri,
) -> ApiResult<Json<BusinessDetailResponse>> {
    let id = parse_id(&businessid, &uri)?;
    let detail = state
        .service
        .business_detail(id)
        .await
        .map_err(service_error(&uri))?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    put,
    path = "/businesses/{businessid}",
    params(
        ("businessid" = String, Path, description = "Business id")
    ),
    request_body(content = DocumentBody, description = "Business fields"),
    responses(
        (status = 200, description = "Business replaced", body = UpdatedResponse),
        (status = 400, description = "Request body is not a valid business object", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_business_handler(
    State(state): State<AppState>,
    Path(businessid): Path<String>,
    uri: Uri,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> ApiResult<Json<UpdatedResponse>> {
    let id = parse_id(&businessid, &uri)?;
    // A missing business is reported before the body is looked at.
    state
        .service
        .get(&BUSINESS, id)
        .await
        .map_err(service_error(&uri))?;
    let body = json_body(&BUSINESS, body)?;
    state
        .service
        .update(&BUSINESS, id, &body)
        .await
        .map_err(service_error(&uri))?;
    Ok(Json(UpdatedResponse {
        links: business_links(&id.to_string()),
    }))
}

#[utoipa::path(
    delete,
    path = "/businesses/{businessid}",
    params(
        ("businessid" = String, Path, description = "Business id")
    ),
    responses(
        (status = 204, description = "Business deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_business_handler(
    State(state): State<AppState>,
    Path(businessid): Path<String>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    let id = parse_id(&businessid, &uri)?;
    state
        .service
        .delete(&BUSINESS, id)
        .await
        .map_err(service_error(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}
