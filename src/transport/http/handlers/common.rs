use crate::domain::registration::{FileUpload, FormVariant, RegistrationInput};
use crate::error::RegistrationError;
use crate::transport::http::types::{json_error, ApiResponse};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::Json;

/// Maps a pipeline error to the HTTP status the form surfaces.
pub fn status_for(err: &RegistrationError) -> StatusCode {
    match err {
        RegistrationError::Validation(_) => StatusCode::BAD_REQUEST,
        RegistrationError::Upload(_) | RegistrationError::Transaction(_) => StatusCode::BAD_GATEWAY,
        RegistrationError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// HTML checkbox semantics: present with `on` (or a truthy string) means checked.
pub fn parse_checkbox(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

/// Form input plus the variant requested by the client, if any.
pub struct ParsedForm {
    pub input: RegistrationInput,
    pub variant: Option<FormVariant>,
}

/// Name used for a file part that carries bytes but no filename.
pub const FALLBACK_FILE_NAME: &str = "file";

/// Picks the upload out of a `file` part.
///
/// A filename means the user selected a file, even a 0-byte one. A part with neither
/// filename nor bytes is what browsers send when nothing is selected.
pub fn file_from_part(file_name: &str, bytes: &[u8]) -> Option<FileUpload> {
    if !file_name.is_empty() {
        Some(FileUpload::new(file_name, bytes.to_vec()))
    } else if !bytes.is_empty() {
        Some(FileUpload::new(FALLBACK_FILE_NAME, bytes.to_vec()))
    } else {
        None
    }
}

/// Multipart read failures keep the status axum assigns (413 past the body limit).
fn multipart_error(err: MultipartError, context: String) -> (StatusCode, Json<ApiResponse>) {
    json_error(err.status(), format!("{}: {}", context, err.body_text()))
}

/// Reads every part of a registration submission.
pub async fn read_registration_form(
    mut multipart: Multipart,
) -> Result<ParsedForm, (StatusCode, Json<ApiResponse>)> {
    let bad_request = |e: String| json_error(StatusCode::BAD_REQUEST, e);

    let mut input = RegistrationInput::default();
    let mut variant = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Invalid multipart body".to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e, "Failed to read file".to_string()))?;
            input.file = file_from_part(&file_name, &bytes);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| multipart_error(e, format!("Failed to read field '{}'", name)))?;
        match name.as_str() {
            "description" => input.description = value,
            "commercial_use" => input.commercial_use_allowed = parse_checkbox(&value),
            "derivatives" => input.derivatives_allowed = parse_checkbox(&value),
            "expiry" => input.expiry = Some(value),
            "location" => input.location = value,
            "custodial_community" => input.custodial_community = value,
            "distribution_region" => input.distribution_region = value,
            "species" => input.species = value,
            "variant" if !value.trim().is_empty() => {
                variant = Some(value.parse::<FormVariant>().map_err(bad_request)?);
            }
            // Unknown parts are ignored.
            _ => {}
        }
    }

    Ok(ParsedForm { input, variant })
}
