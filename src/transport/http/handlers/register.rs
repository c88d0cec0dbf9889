use crate::transport::http::handlers::common::{read_registration_form, status_for};
use crate::transport::http::types::{ApiResponse, AppState, RegisterRequest, RegisterResponse};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

#[utoipa::path(
    post,
    path = "/api/register",
    request_body(content = RegisterRequest, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File and metadata pinned, registration submitted", body = ApiResponse),
        (status = 400, description = "Missing or invalid form fields", body = ApiResponse),
        (status = 502, description = "Pinning service or wallet call failed", body = ApiResponse)
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let parsed = match read_registration_form(multipart).await {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };

    let service = match parsed.variant {
        Some(v) if v != state.registration.variant() => state.registration.with_variant(v),
        _ => state.registration.clone(),
    };

    // One form instance per request; overlapping requests are not deduplicated.
    let mut form = service.new_form();
    info!("> API: registration request ({} form)", form.variant());

    match form.submit(parsed.input).await {
        Ok(receipt) => {
            let data = RegisterResponse {
                image_uri: receipt.image_uri.to_string(),
                token_uri: receipt.token_uri.to_string(),
                tx_hash: receipt.transaction.hash.clone(),
                explorer_url: receipt.transaction.explorer_url.clone(),
                recipient: receipt.recipient.clone(),
                summary: receipt.summary.clone(),
            };
            match serde_json::to_value(&data) {
                Ok(value) => (StatusCode::OK, Json(ApiResponse::ok(value))).into_response(),
                Err(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::failure(format!(
                        "Registered (tx {}) but failed to encode response: {}",
                        receipt.transaction.hash, e
                    ))),
                )
                    .into_response(),
            }
        }
        Err(e) => (status_for(&e), Json(ApiResponse::failure(e.to_string()))).into_response(),
    }
}
