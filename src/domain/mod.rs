pub mod json;
pub mod model;
pub mod schema;
