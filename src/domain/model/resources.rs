use super::ResourceModel;
use crate::domain::schema::{FieldRule, Schema};

const BUSINESS_SCHEMA: Schema = Schema::new(&[
    FieldRule::required("ownerid"),
    FieldRule::required("name"),
    FieldRule::required("address"),
    FieldRule::required("city"),
    FieldRule::required("state"),
    FieldRule::required("zip"),
    FieldRule::required("phone"),
    FieldRule::required("category"),
    FieldRule::required("subcategory"),
    FieldRule::optional("website"),
    FieldRule::optional("email"),
]);

const REVIEW_SCHEMA: Schema = Schema::new(&[
    FieldRule::required("userid"),
    FieldRule::required("businessid"),
    FieldRule::required("dollars"),
    FieldRule::required("stars"),
    FieldRule::optional("review"),
]);

const PHOTO_SCHEMA: Schema = Schema::new(&[
    FieldRule::required("userid"),
    FieldRule::required("businessid"),
    FieldRule::optional("caption"),
]);

/// Reviews and photos are pinned to the business and user they were created for.
const OWNERSHIP_FIELDS: &[&str] = &["businessid", "userid"];

pub static BUSINESS: BusinessModel = BusinessModel;
pub static REVIEW: ReviewModel = ReviewModel;
pub static PHOTO: PhotoModel = PhotoModel;

/// Businesses. Every field may be replaced on update, `ownerid` included.
pub struct BusinessModel;

impl ResourceModel for BusinessModel {
    fn resource_name(&self) -> &str {
        "business"
    }

    fn collection(&self) -> &str {
        "businesses"
    }

    fn schema(&self) -> &Schema {
        &BUSINESS_SCHEMA
    }
}

/// Reviews. One per (userid, businessid).
pub struct ReviewModel;

impl ResourceModel for ReviewModel {
    fn resource_name(&self) -> &str {
        "review"
    }

    fn collection(&self) -> &str {
        "reviews"
    }

    fn schema(&self) -> &Schema {
        &REVIEW_SCHEMA
    }

    fn immutable_fields(&self) -> &[&'static str] {
        OWNERSHIP_FIELDS
    }

    fn unique_together(&self) -> &[&'static str] {
        &["userid", "businessid"]
    }

    fn duplicate_message(&self) -> String {
        "User has already posted a review of this business".to_string()
    }
}

pub struct PhotoModel;

impl ResourceModel for PhotoModel {
    fn resource_name(&self) -> &str {
        "photo"
    }

    fn collection(&self) -> &str {
        "photos"
    }

    fn schema(&self) -> &Schema {
        &PHOTO_SCHEMA
    }

    fn immutable_fields(&self) -> &[&'static str] {
        OWNERSHIP_FIELDS
    }
}
