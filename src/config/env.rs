use crate::config::toml_config::{CdnConfig, StorefrontConfig};
use crate::utils::error::{Result, StoreError};
use std::env;

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| StoreError::MissingConfigError {
        field: name.to_string(),
    })
}

/// Unset is `None`; set but unparsable is an error.
fn optional_number(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| StoreError::InvalidConfigValueError {
                field: name.to_string(),
                value,
                reason: format!("Expected a whole number of seconds: {}", e),
            }),
        Err(_) => Ok(None),
    }
}

impl StorefrontConfig {
    /// Builds the configuration from `CLOUDINARY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            cdn: CdnConfig {
                cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
                api_key: required("CLOUDINARY_API_KEY")?,
                api_secret: required("CLOUDINARY_API_SECRET")?,
                api_base: env::var("CLOUDINARY_API_BASE").ok(),
                delivery_base: env::var("CLOUDINARY_DELIVERY_BASE").ok(),
                timeout_seconds: optional_number("CLOUDINARY_TIMEOUT_SECONDS")?,
                defaults: None,
            },
            logging: None,
        })
    }
}
