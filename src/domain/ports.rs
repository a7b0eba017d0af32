use crate::domain::image::{ImageOptions, UploadedImage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

pub trait CdnConfigProvider: Send + Sync {
    fn cloud_name(&self) -> &str;
    fn api_key(&self) -> &str;
    fn api_secret(&self) -> &str;
    fn api_base(&self) -> &str;
    fn delivery_base(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn default_image_options(&self) -> ImageOptions;
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Delivery URL for a stored asset with `overrides` layered over the
    /// configured defaults.
    fn image_url(&self, public_id: &str, overrides: &ImageOptions) -> String;

    /// Uploads a local file under `public_id`. One attempt; any failure is
    /// returned to the caller as-is.
    async fn upload(
        &self,
        path: &Path,
        public_id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<UploadedImage>;
}
