use crate::core::{CdnConfigProvider, ImageHost, ImageOptions, UploadedImage};
use crate::utils::error::{Result, StoreError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Cloudinary-compatible image host.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    cloud_name: String,
    api_key: String,
    api_secret: String,
    api_base: String,
    delivery_base: String,
    defaults: ImageOptions,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryClient {
    pub fn new<C: CdnConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            cloud_name: config.cloud_name().to_string(),
            api_key: config.api_key().to_string(),
            api_secret: config.api_secret().to_string(),
            api_base: config.api_base().trim_end_matches('/').to_string(),
            delivery_base: config.delivery_base().trim_end_matches('/').to_string(),
            defaults: config.default_image_options(),
            client,
        })
    }

    pub fn defaults(&self) -> &ImageOptions {
        &self.defaults
    }

    pub fn upload_endpoint(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.api_base, self.cloud_name)
    }

    async fn send_upload(&self, form: Form) -> Result<UploadedImage> {
        let response = self
            .client
            .post(self.upload_endpoint())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Upload response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) if body.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
                Err(_) => body,
            };
            return Err(StoreError::UploadRejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Metadata as a `context` value: `k=v|k2=v2`, with `|` and `=` inside
/// values escaped by a backslash.
pub fn encode_context(metadata: &BTreeMap<String, String>) -> String {
    metadata
        .iter()
        .map(|(key, value)| format!("{}={}", escape_context(key), escape_context(value)))
        .collect::<Vec<_>>()
        .join("|")
}

fn escape_context(raw: &str) -> String {
    raw.replace('|', "\\|").replace('=', "\\=")
}

/// Parameters that take part in the request signature.
pub fn upload_params(
    public_id: &str,
    metadata: &BTreeMap<String, String>,
    timestamp: i64,
) -> BTreeMap<&'static str, String> {
    let mut params = BTreeMap::new();
    params.insert("public_id", public_id.to_string());
    params.insert("timestamp", timestamp.to_string());
    if !metadata.is_empty() {
        params.insert("context", encode_context(metadata));
    }
    params
}

/// SHA-256 over `k=v` pairs sorted by key and joined with `&`, then the secret.
pub fn sign_params(params: &BTreeMap<&'static str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    fn image_url(&self, public_id: &str, overrides: &ImageOptions) -> String {
        let parts = self.defaults.merge(overrides).transformation_parts();
        let url = if parts.is_empty() {
            format!(
                "{}/{}/image/upload/{}",
                self.delivery_base, self.cloud_name, public_id
            )
        } else {
            format!(
                "{}/{}/image/upload/{}/{}",
                self.delivery_base,
                self.cloud_name,
                parts.join(","),
                public_id
            )
        };
        tracing::debug!("Built image URL: {}", url);
        url
    }

    async fn upload(
        &self,
        path: &Path,
        public_id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<UploadedImage> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        tracing::info!(
            "Uploading {} ({} bytes) as {}",
            path.display(),
            data.len(),
            public_id
        );

        let params = upload_params(public_id, metadata, chrono::Utc::now().timestamp());
        let signature = sign_params(&params, &self.api_secret);

        let mut form = Form::new()
            .part("file", Part::bytes(data).file_name(file_name))
            .text("api_key", self.api_key.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        match self.send_upload(form).await {
            Ok(uploaded) => {
                tracing::info!(
                    "Uploaded {} (version {})",
                    uploaded.public_id,
                    uploaded.version
                );
                Ok(uploaded)
            }
            Err(e) => {
                tracing::error!("Upload of {} failed: {}", public_id, e);
                Err(e)
            }
        }
    }
}
