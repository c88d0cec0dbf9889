use crate::domain::registration::{FormVariant, SubmissionSummary, TransactionReference};
use crate::transport::http::handlers::{form, health, register};
use crate::transport::http::types::{ApiResponse, RegisterRequest, RegisterResponse};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Upper bound for a single multipart submission (file + fields).
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(health::healthcheck_handler, register::register_handler),
    components(schemas(
        ApiResponse,
        RegisterRequest,
        RegisterResponse,
        SubmissionSummary,
        TransactionReference,
        FormVariant
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    create_router_with_upload_limit(app_state, MAX_UPLOAD_BYTES)
}

/// Same routes with a custom cap on `/api/register` bodies; larger bodies get 413.
pub fn create_router_with_upload_limit(
    app_state: crate::transport::http::types::AppState,
    max_upload_bytes: usize,
) -> Router {
    Router::new()
        .route("/", get(form::form_page_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/register",
            post(register::register_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(app_state)
}
