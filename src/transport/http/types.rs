use crate::app::resource_service::{BusinessDetail, ResourceService};
use crate::storage::document::Document;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ResourceService>,
}

impl AppState {
    pub fn new(service: ResourceService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number. Missing, unparseable or < 1 means page 1.
    #[serde(default)]
    pub page: Option<String>,
}

/// Relative links to the affected resources. Only the relevant keys are present.
#[derive(Serialize, Debug, Default, ToSchema)]
pub struct ResourceLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
    pub links: ResourceLinks,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct UpdatedResponse {
    pub links: ResourceLinks,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct BusinessListResponse {
    #[schema(value_type = Vec<Object>)]
    pub businesses: Vec<Document>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ReviewListResponse {
    #[schema(value_type = Vec<Object>)]
    pub reviews: Vec<Document>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct PhotoListResponse {
    #[schema(value_type = Vec<Object>)]
    pub photos: Vec<Document>,
}

/// Aggregate view of a business.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDetailResponse {
    #[schema(value_type = Object)]
    pub business: Document,
    #[schema(value_type = Vec<Object>)]
    pub business_photos: Vec<Document>,
    #[schema(value_type = Vec<Object>)]
    pub business_reviews: Vec<Document>,
}

impl From<BusinessDetail> for BusinessDetailResponse {
    fn from(detail: BusinessDetail) -> Self {
        Self {
            business: detail.business,
            business_photos: detail.photos,
            business_reviews: detail.reviews,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A resource document as stored: the declared fields plus `id`.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct DocumentBody(pub Document);
