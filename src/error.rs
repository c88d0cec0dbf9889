//! Error taxonomy for a registration attempt.
//!
//! Every variant is terminal for the submission that produced it; the user is
//! expected to fix the input (or the environment) and submit again.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Input was rejected before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// The pinning service returned a non-success status or an unusable body.
    #[error("upload failed: {0}")]
    Upload(String),

    /// The wallet rejected the call, the chain reverted it, or it could not be encoded.
    #[error("transaction failed: {0}")]
    Transaction(String),

    /// Missing or malformed environment configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RegistrationError {
    pub fn fill_all_fields() -> Self {
        RegistrationError::Validation(FILL_ALL_FIELDS.to_string())
    }

    /// True for errors raised before the pipeline touched the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, RegistrationError::Validation(_))
    }
}

/// Message shown when a required form field is missing.
pub const FILL_ALL_FIELDS: &str = "Fill all fields";

pub type Result<T> = std::result::Result<T, RegistrationError>;
