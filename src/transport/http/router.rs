use crate::transport::http::handlers::{businesses, fallback, health, photos, reviews, users};
use crate::transport::http::types::{
    BusinessDetailResponse, BusinessListResponse, CreatedResponse, DocumentBody, ErrorResponse,
    HealthResponse, PhotoListResponse, ResourceLinks, ReviewListResponse, UpdatedResponse,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        businesses::list_businesses_handler,
        businesses::create_business_handler,
        businesses::get_business_handler,
        businesses::update_business_handler,
        businesses::delete_business_handler,
        reviews::create_review_handler,
        reviews::get_review_handler,
        reviews::update_review_handler,
        reviews::delete_review_handler,
        photos::create_photo_handler,
        photos::get_photo_handler,
        photos::update_photo_handler,
        photos::delete_photo_handler,
        users::user_businesses_handler,
        users::user_reviews_handler,
        users::user_photos_handler
    ),
    components(schemas(
        ErrorResponse,
        ResourceLinks,
        CreatedResponse,
        UpdatedResponse,
        DocumentBody,
        BusinessListResponse,
        ReviewListResponse,
        PhotoListResponse,
        BusinessDetailResponse,
        HealthResponse
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

/// Builds the API router. Every miss (unknown path, unsupported method on a
/// known path, absent id) ends in the same 404 body.
pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/businesses",
            get(businesses::list_businesses_handler)
                .post(businesses::create_business_handler)
                .fallback(fallback::not_found_handler),
        )
        .route(
            "/businesses/:businessid",
            get(businesses::get_business_handler)
                .put(businesses::update_business_handler)
                .delete(businesses::delete_business_handler)
                .fallback(fallback::not_found_handler),
        )
        .route(
            "/reviews",
            post(reviews::create_review_handler).fallback(fallback::not_found_handler),
        )
        .route(
            "/reviews/:reviewid",
            get(reviews::get_review_handler)
                .put(reviews::update_review_handler)
                .delete(reviews::delete_review_handler)
                .fallback(fallback::not_found_handler),
        )
        .route(
            "/photos",
            post(photos::create_photo_handler).fallback(fallback::not_found_handler),
        )
        .route(
            "/photos/:photoid",
            get(photos::get_photo_handler)
                .put(photos::update_photo_handler)
                .delete(photos::delete_photo_handler)
                .fallback(fallback::not_found_handler),
        )
        .route(
            "/users/:userid/businesses",
            get(users::user_businesses_handler).fallback(fallback::not_found_handler),
        )
        .route(
            "/users/:userid/reviews",
            get(users::user_reviews_handler).fallback(fallback::not_found_handler),
        )
        .route(
            "/users/:userid/photos",
            get(users::user_photos_handler).fallback(fallback::not_found_handler),
        )
        .fallback(fallback::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
