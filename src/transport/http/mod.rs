pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod form;
    pub mod health;
    pub mod register;
}

pub use router::{create_router, create_router_with_upload_limit, ApiDoc};
pub use types::AppState;
