pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::resource_service::{ResourceService, ServiceError};
pub use domain::model::{ResourceModel, BUSINESS, PHOTO, REVIEW};
pub use domain::schema::{FieldRule, Schema};
pub use storage::document::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore};
