pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod businesses;
    pub mod common;
    pub mod fallback;
    pub mod health;
    pub mod photos;
    pub mod reviews;
    pub mod users;
}

pub use error::{ApiError, ApiResult};
pub use router::{create_router, ApiDoc};
pub use types::AppState;
