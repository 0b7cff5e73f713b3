//! The resource service.
//!
//! Sits between the HTTP handlers and the document store. It is responsible for:
//! 1.  Validating and projecting request bodies against a resource's schema.
//! 2.  Enforcing cross-record rules (uniqueness keys, immutable fields).
//! 3.  Assembling the business aggregate view from three collections.

use crate::domain::json::json_eq;
use crate::domain::model::{ResourceModel, BUSINESS, PHOTO, REVIEW};
use crate::storage::document::{Document, DocumentStore, Filter, Window};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Fixed page size of the business listing.
pub const PAGE_SIZE: u64 = 5;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    ImmutableField { message: String },
    #[error("{message}")]
    Duplicate { message: String },
    #[error("not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// A business together with the photos and reviews that reference it.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessDetail {
    pub business: Document,
    pub photos: Vec<Document>,
    pub reviews: Vec<Document>,
}

/// Offset of a 1-based page. Pages below 1 are treated as page 1.
pub fn page_offset(page: i64) -> u64 {
    let page = page.max(1) as u64;
    (page - 1).saturating_mul(PAGE_SIZE)
}

/// The main service shared by every handler.
#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn DocumentStore>,
}

impl ResourceService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// One page of a collection in insertion order.
    pub async fn list_page(&self, model: &dyn ResourceModel, page: i64) -> ServiceResult<Vec<Document>> {
        let window = Window::page(page_offset(page), PAGE_SIZE);
        Ok(self
            .store
            .find(model.collection(), &Filter::new(), window)
            .await?)
    }

    /// Every document of `model` whose `field` equals `value`, in insertion order.
    pub async fn find_by(
        &self,
        model: &dyn ResourceModel,
        field: &str,
        value: impl Into<JsonValue>,
    ) -> ServiceResult<Vec<Document>> {
        let filter = Filter::new().eq(field, value);
        Ok(self
            .store
            .find(model.collection(), &filter, Window::all())
            .await?)
    }

    pub async fn get(&self, model: &dyn ResourceModel, id: i64) -> ServiceResult<Document> {
        self.store
            .find_one(model.collection(), &Filter::by_id(id))
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Validates `body`, keeps the declared fields and stores them under a new id.
    ///
    /// Resources with a uniqueness key are inserted conditionally, so two
    /// concurrent creates for the same key cannot both succeed.
    pub async fn create(&self, model: &dyn ResourceModel, body: &JsonValue) -> ServiceResult<Document> {
        let fields = self.accept_body(model, body)?;

        let unique = model.unique_together();
        let stored = if unique.is_empty() {
            self.store.insert(model.collection(), fields).await?
        } else {
            let guard = unique.iter().fold(Filter::new(), |f, name| {
                f.eq(*name, fields.get(*name).cloned().unwrap_or(JsonValue::Null))
            });
            match self
                .store
                .insert_unless_exists(model.collection(), &guard, fields)
                .await?
            {
                Some(doc) => doc,
                None => {
                    debug!(resource = model.resource_name(), "rejected duplicate create");
                    return Err(ServiceError::Duplicate {
                        message: model.duplicate_message(),
                    });
                }
            }
        };

        info!(
            resource = model.resource_name(),
            id = %stored.get("id").cloned().unwrap_or(JsonValue::Null),
            "created"
        );
        Ok(stored)
    }

    /// Replaces the declared fields of document `id` with those in `body`.
    ///
    /// Fields absent from `body` keep their stored value. Immutable fields must
    /// repeat the stored value; the write is filtered on those values so a
    /// concurrent change makes it match nothing.
    pub async fn update(
        &self,
        model: &dyn ResourceModel,
        id: i64,
        body: &JsonValue,
    ) -> ServiceResult<Document> {
        let existing = self.get(model, id).await?;
        let fields = self.accept_body(model, body)?;

        let mut filter = Filter::by_id(id);
        for name in model.immutable_fields() {
            let stored = existing.get(*name).cloned().unwrap_or(JsonValue::Null);
            let submitted = fields.get(*name).cloned().unwrap_or(JsonValue::Null);
            if !json_eq(&stored, &submitted) {
                debug!(resource = model.resource_name(), id, field = *name, "rejected immutable field change");
                return Err(ServiceError::ImmutableField {
                    message: model.immutable_message(),
                });
            }
            filter = filter.eq(*name, stored);
        }

        let updated = self
            .store
            .update_one(model.collection(), &filter, fields)
            .await?
            .ok_or(ServiceError::NotFound)?;
        info!(resource = model.resource_name(), id, "updated");
        Ok(updated)
    }

    pub async fn delete(&self, model: &dyn ResourceModel, id: i64) -> ServiceResult<()> {
        if self
            .store
            .delete_one(model.collection(), &Filter::by_id(id))
            .await?
        {
            info!(resource = model.resource_name(), id, "deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    /// Business `id` plus its photos and reviews. The two child lookups run concurrently.
    pub async fn business_detail(&self, id: i64) -> ServiceResult<BusinessDetail> {
        let business = self.get(&BUSINESS, id).await?;
        let (photos, reviews) = tokio::try_join!(
            self.find_by(&PHOTO, "businessid", id),
            self.find_by(&REVIEW, "businessid", id),
        )?;
        Ok(BusinessDetail {
            business,
            photos,
            reviews,
        })
    }

    fn accept_body(&self, model: &dyn ResourceModel, body: &JsonValue) -> ServiceResult<Document> {
        let schema = model.schema();
        if !schema.validate(body) {
            debug!(resource = model.resource_name(), "rejected invalid body");
            return Err(ServiceError::Validation {
                message: model.invalid_body_message(),
            });
        }
        Ok(schema.extract(body))
    }
}
