//! Form input, identifiers and the post-submission summary.

use crate::error::{RegistrationError, Result};
use chrono::NaiveDate;
use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub mod metadata;

pub use metadata::{Attribute, AttributeValue, MetadataDocument};

/// Fixed license duration sent by the heritage form (one year, in seconds).
pub const ONE_YEAR_SECS: u64 = 365 * 24 * 60 * 60;

/// Which field set and contract signature a form instance uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    /// File, description, license flags and an explicit expiry date.
    #[default]
    Standard,
    /// License flags plus location / custodial community / distribution region / species,
    /// with a fixed one-year duration instead of an expiry date.
    Heritage,
}

impl FormVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormVariant::Standard => "standard",
            FormVariant::Heritage => "heritage",
        }
    }
}

impl FromStr for FormVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(FormVariant::Standard),
            "heritage" => Ok(FormVariant::Heritage),
            other => Err(format!("unknown form variant '{}'", other)),
        }
    }
}

impl fmt::Display for FormVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selected file: its name and raw bytes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        FileUpload {
            name: name.into(),
            bytes,
        }
    }
}

/// Everything the user typed or picked, for one submission.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub file: Option<FileUpload>,
    pub description: String,
    pub commercial_use_allowed: bool,
    pub derivatives_allowed: bool,
    /// `YYYY-MM-DD`; only read by the standard form.
    pub expiry: Option<String>,
    pub location: String,
    pub custodial_community: String,
    pub distribution_region: String,
    pub species: String,
}

impl RegistrationInput {
    /// Expiry with surrounding whitespace removed; `None` when blank.
    pub fn expiry_date(&self) -> Option<&str> {
        self.expiry
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Converts a `YYYY-MM-DD` date to the Unix timestamp of UTC midnight on that day.
pub fn expiry_to_unix(date: &str) -> Result<u64> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        RegistrationError::Validation(format!("Invalid expiry date '{}' (expected YYYY-MM-DD)", date))
    })?;
    let midnight = parsed
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| RegistrationError::Validation(format!("Invalid expiry date '{}'", date)))?;
    let ts = midnight.and_utc().timestamp();
    u64::try_from(ts).map_err(|_| {
        RegistrationError::Validation(format!("Expiry date '{}' is before 1970-01-01", date))
    })
}

/// Opaque `scheme://hash` handle returned by the pinning service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentIdentifier(String);

impl ContentIdentifier {
    pub fn ipfs(hash: &str) -> Self {
        ContentIdentifier(format!("ipfs://{}", hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash of a submitted transaction plus its explorer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TransactionReference {
    pub hash: String,
    pub explorer_url: String,
}

impl TransactionReference {
    pub fn new(hash: impl Into<String>, explorer_base: &str) -> Self {
        let hash = hash.into();
        let explorer_url = format!("{}/tx/{}", explorer_base.trim_end_matches('/'), hash);
        TransactionReference { hash, explorer_url }
    }
}

fn allowed(flag: bool) -> &'static str {
    if flag {
        "Allowed"
    } else {
        "Not allowed"
    }
}

/// What the form shows once a registration went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmissionSummary {
    pub file: String,
    pub description: String,
    pub commercial_use: String,
    pub derivatives: String,
    pub expiry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodial_community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
}

impl SubmissionSummary {
    pub fn from_input(input: &RegistrationInput, file_name: &str, variant: FormVariant) -> Self {
        let heritage = |v: &str| match variant {
            FormVariant::Heritage => Some(v.to_string()),
            FormVariant::Standard => None,
        };
        let expiry = match variant {
            FormVariant::Standard => input.expiry_date().unwrap_or("Not set").to_string(),
            FormVariant::Heritage => "1 year from registration".to_string(),
        };
        SubmissionSummary {
            file: file_name.to_string(),
            description: input.description.clone(),
            commercial_use: allowed(input.commercial_use_allowed).to_string(),
            derivatives: allowed(input.derivatives_allowed).to_string(),
            expiry,
            location: heritage(&input.location),
            custodial_community: heritage(&input.custodial_community),
            distribution_region: heritage(&input.distribution_region),
            species: heritage(&input.species),
        }
    }

    /// Serialized key and display label of every summary field, in display order.
    pub const FIELD_LABELS: [(&'static str, &'static str); 9] = [
        ("file", "File"),
        ("description", "Description"),
        ("commercial_use", "Commercial Use"),
        ("derivatives", "Derivatives"),
        ("expiry", "Expiry"),
        ("location", "Location"),
        ("custodial_community", "Custodial Community"),
        ("distribution_region", "Distribution Region"),
        ("species", "Species"),
    ];

    /// `(label, value)` for every field present in this summary.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        let values = [
            Some(self.file.as_str()),
            Some(self.description.as_str()),
            Some(self.commercial_use.as_str()),
            Some(self.derivatives.as_str()),
            Some(self.expiry.as_str()),
            self.location.as_deref(),
            self.custodial_community.as_deref(),
            self.distribution_region.as_deref(),
            self.species.as_deref(),
        ];
        Self::FIELD_LABELS
            .iter()
            .zip(values)
            .filter_map(|((_, label), value)| value.map(|v| (*label, v)))
            .collect()
    }
}

impl fmt::Display for SubmissionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Submission Summary")?;
        for (label, value) in self.rows() {
            write!(f, "\n  {}: {}", label, value)?;
        }
        Ok(())
    }
}

/// Outcome of a completed pipeline, handed back to the front end.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistrationReceipt {
    #[schema(value_type = String)]
    pub image_uri: ContentIdentifier,
    #[schema(value_type = String)]
    pub token_uri: ContentIdentifier,
    pub transaction: TransactionReference,
    pub summary: SubmissionSummary,
    /// Connected account the registration was made for.
    pub recipient: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_utc_midnight() {
        assert_eq!(expiry_to_unix("2026-01-01").unwrap(), 1_767_225_600);
        assert_eq!(expiry_to_unix("1970-01-01").unwrap(), 0);
    }

    #[test]
    fn malformed_expiry_is_a_validation_error() {
        let err = expiry_to_unix("01/01/2026").unwrap_err();
        assert!(err.is_validation());
        assert!(expiry_to_unix("2026-02-30").is_err());
    }

    #[test]
    fn explorer_link_uses_tx_path() {
        let r = TransactionReference::new("0xabc", "https://basecamp.cloud.blockscout.com/");
        assert_eq!(r.explorer_url, "https://basecamp.cloud.blockscout.com/tx/0xabc");
    }

    #[test]
    fn summary_reports_missing_expiry_and_flags() {
        let input = RegistrationInput {
            description: "melody".into(),
            commercial_use_allowed: true,
            ..Default::default()
        };
        let s = SubmissionSummary::from_input(&input, "song.mp3", FormVariant::Standard);
        assert_eq!(s.commercial_use, "Allowed");
        assert_eq!(s.derivatives, "Not allowed");
        assert_eq!(s.expiry, "Not set");
        assert!(s.location.is_none());
        assert!(s.to_string().contains("File: song.mp3"));
        assert!(s.to_string().ends_with("Expiry: Not set"));
    }

    #[test]
    fn heritage_summary_reports_fixed_duration_and_domain_rows() {
        let input = RegistrationInput {
            location: "Oaxaca".into(),
            species: "Zea mays".into(),
            ..Default::default()
        };
        let s = SubmissionSummary::from_input(&input, "seed.jpg", FormVariant::Heritage);
        assert_eq!(s.expiry, "1 year from registration");
        let labels: Vec<&str> = s.rows().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[2], "Commercial Use");
        assert!(s.to_string().contains("\n  Species: Zea mays"));
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("Heritage".parse::<FormVariant>().unwrap(), FormVariant::Heritage);
        assert!("other".parse::<FormVariant>().is_err());
    }
}
