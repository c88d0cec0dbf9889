use crate::app::registration_service::RegistrationService;
use crate::domain::registration::{FormVariant, SubmissionSummary};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub registration: RegistrationService,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Multipart body of `POST /api/register`. Documentation only; the handler reads parts directly.
#[derive(Deserialize, Debug, ToSchema)]
#[allow(dead_code)]
pub struct RegisterRequest {
    /// The file to pin.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    #[serde(default)]
    pub description: String,
    /// Checkbox: `on`, `true`, `1` or `yes` mean allowed.
    #[serde(default)]
    pub commercial_use: Option<String>,
    #[serde(default)]
    pub derivatives: Option<String>,
    /// `YYYY-MM-DD`; required by the standard form.
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub custodial_community: Option<String>,
    #[serde(default)]
    pub distribution_region: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    /// Overrides the server's configured form variant.
    #[serde(default)]
    pub variant: Option<FormVariant>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct RegisterResponse {
    pub image_uri: String,
    pub token_uri: String,
    pub tx_hash: String,
    pub explorer_url: String,
    pub recipient: String,
    pub summary: SubmissionSummary,
}

pub fn json_error(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    (status, Json(ApiResponse::failure(error)))
}
