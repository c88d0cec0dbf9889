// Responsible for all communication with the Pinata pinning API.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::registration::{ContentIdentifier, MetadataDocument};
use crate::error::{RegistrationError, Result};
use crate::infra::config::Settings;

/// Pins content to content-addressed storage and hands back its identifier.
#[async_trait]
pub trait PinningService: Send + Sync {
    async fn upload_file(&self, bytes: &[u8], filename: &str) -> Result<ContentIdentifier>;
    async fn upload_json(&self, document: &MetadataDocument) -> Result<ContentIdentifier>;
}

// Shape of a successful pinFileToIPFS / pinJSONToIPFS response (other fields ignored).
#[derive(Deserialize, Debug)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

#[derive(Clone)]
pub struct PinataClient {
    http: Client,
    base_url: String,
    jwt: String,
}

impl PinataClient {
    /// `base_url` is the pinning base, e.g. `https://api.pinata.cloud/pinning`.
    pub fn new(base_url: impl Into<String>, jwt: impl Into<String>) -> Self {
        PinataClient {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            jwt: jwt.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.pinata_api_url.clone(), settings.pinata_jwt.clone())
    }

    fn api_root(&self) -> &str {
        self.base_url
            .strip_suffix("/pinning")
            .unwrap_or(self.base_url.as_str())
    }

    /// Checks that the JWT is accepted. Used by `preflight`; not part of the pipeline.
    pub async fn test_authentication(&self) -> Result<String> {
        let url = format!("{}/data/testAuthentication", self.api_root());
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.jwt)
            .send()
            .await
            .map_err(|e| RegistrationError::Upload(format!("{}: {}", url, e)))?;
        let resp = ensure_success(resp, "testAuthentication").await?;
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| RegistrationError::Upload(format!("testAuthentication: {}", e)))?;
        Ok(body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("authenticated")
            .to_string())
    }
}

async fn ensure_success(resp: Response, endpoint: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(RegistrationError::Upload(format!(
        "{} returned {}: {}",
        endpoint,
        status,
        body.trim()
    )))
}

async fn read_identifier(resp: Response, endpoint: &str) -> Result<ContentIdentifier> {
    let resp = ensure_success(resp, endpoint).await?;
    let pinned: PinResponse = resp.json().await.map_err(|e| {
        RegistrationError::Upload(format!("{} response has no IpfsHash: {}", endpoint, e))
    })?;
    Ok(ContentIdentifier::ipfs(&pinned.ipfs_hash))
}

#[async_trait]
impl PinningService for PinataClient {
    async fn upload_file(&self, bytes: &[u8], filename: &str) -> Result<ContentIdentifier> {
        let url = format!("{}/pinFileToIPFS", self.base_url);
        debug!("> Pinata: POST {} ({} bytes, file={})", url, bytes.len(), filename);

        let part = Part::bytes(bytes.to_vec()).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RegistrationError::Upload(format!("pinFileToIPFS: {}", e)))?;

        let cid = read_identifier(resp, "pinFileToIPFS").await?;
        info!("> Pinata: pinned file {} as {}", filename, cid);
        Ok(cid)
    }

    async fn upload_json(&self, document: &MetadataDocument) -> Result<ContentIdentifier> {
        let url = format!("{}/pinJSONToIPFS", self.base_url);
        debug!("> Pinata: POST {}", url);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.jwt)
            .json(document)
            .send()
            .await
            .map_err(|e| RegistrationError::Upload(format!("pinJSONToIPFS: {}", e)))?;

        let cid = read_identifier(resp, "pinJSONToIPFS").await?;
        info!("> Pinata: pinned metadata for {} as {}", document.name, cid);
        Ok(cid)
    }
}
