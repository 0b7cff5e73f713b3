//! Resource model definitions for businesses, reviews and photos.

use crate::domain::schema::Schema;

pub mod resources;

pub use resources::{BusinessModel, PhotoModel, ReviewModel, BUSINESS, PHOTO, REVIEW};

/// Trait that defines the contract for any stored resource.
///
/// The service works with any resource without knowing its fields. Each model provides:
/// - the collection it lives in and the name used in messages and links
/// - the field schema used for validation and projection
/// - optional consistency rules (immutable fields, a uniqueness key)
pub trait ResourceModel: Send + Sync {
    /// Singular name used in error messages and self-links (e.g. `business`).
    fn resource_name(&self) -> &str;

    /// Name of the backing collection (e.g. `businesses`).
    fn collection(&self) -> &str;

    fn schema(&self) -> &Schema;

    /// Fields whose stored value an update must repeat unchanged.
    ///
    /// Default implementation protects nothing.
    fn immutable_fields(&self) -> &[&'static str] {
        &[]
    }

    /// Fields whose combined values must be unique across the collection.
    ///
    /// Default implementation imposes no uniqueness.
    fn unique_together(&self) -> &[&'static str] {
        &[]
    }

    /// Message returned when a create would break `unique_together`.
    fn duplicate_message(&self) -> String {
        format!("A {} with the same values already exists", self.resource_name())
    }

    /// Message returned when a body fails schema validation.
    fn invalid_body_message(&self) -> String {
        format!("Request body is not a valid {} object", self.resource_name())
    }

    /// Message returned when an update tries to change an immutable field.
    fn immutable_message(&self) -> String {
        format!(
            "Updated {} cannot modify {}",
            self.resource_name(),
            self.immutable_fields().join(" or ")
        )
    }

    /// Relative link to a single document.
    fn self_link(&self, id: &str) -> String {
        format!("/{}/{}", self.collection(), id)
    }
}
